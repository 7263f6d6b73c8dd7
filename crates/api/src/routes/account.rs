//! Buyer account route handler.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::{OrderRepository, UserRepository};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::{Order, User};
use crate::state::AppState;

/// Account view: profile plus order history.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub user: User,
    pub orders: Vec<Order>,
}

/// `GET /api/account` - the authenticated user's profile and orders.
pub async fn account(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<AccountView>, AppError> {
    let user = UserRepository::new(state.pool())
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("account no longer exists".to_string()))?;

    let orders = OrderRepository::new(state.pool())
        .list_by_user(claims.sub)
        .await?;

    Ok(Json(AccountView { user, orders }))
}
