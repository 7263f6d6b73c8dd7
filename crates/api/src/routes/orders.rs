//! Checkout and order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use souk_core::OrderId;

use crate::db::{CartRepository, OrderRepository};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::{Order, OrderDetail, OrderItemInput, ShippingAddress, order_total};
use crate::state::AppState;

/// Checkout request body: shipping address plus the explicit cart snapshot.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub address: ShippingAddress,
    pub items: Vec<OrderItemInput>,
}

/// `POST /api/checkout` - place an order.
///
/// The submitted snapshot is authoritative for this order: the total is
/// Σ(price × quantity) over the submitted lines, and unit prices are NOT
/// re-read from the product table. That trust boundary is a recorded
/// product decision; changing it means re-pricing here before persisting.
pub async fn checkout(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    if body.items.is_empty() {
        return Err(AppError::Validation("no items in cart".to_string()));
    }
    if !body.address.is_complete() {
        return Err(AppError::Validation(
            "shipping address is incomplete".to_string(),
        ));
    }
    for item in &body.items {
        if item.quantity < 1 {
            return Err(AppError::Validation(
                "item quantity must be at least 1".to_string(),
            ));
        }
        if item.price.is_sign_negative() {
            return Err(AppError::Validation(
                "item price cannot be negative".to_string(),
            ));
        }
    }

    let total = order_total(&body.items)
        .ok_or_else(|| AppError::Validation("order total is out of range".to_string()))?;
    let order = OrderRepository::new(state.pool())
        .create(claims.sub, &body.address, total, &body.items)
        .await?;

    // checkout consumes the live cart; the snapshot already captured it
    CartRepository::new(state.pool()).clear(claims.sub).await?;

    tracing::info!(order_id = %order.id, user_id = %claims.sub, total = %order.total_amount, "order placed");

    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders/{id}` - full order detail for the buyer who owns it.
///
/// A foreign buyer gets 403: the id resolved, but it is not theirs.
pub async fn order_detail(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>, AppError> {
    let detail = OrderRepository::new(state.pool())
        .get_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if detail.order.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "order belongs to another buyer".to_string(),
        ));
    }

    Ok(Json(detail))
}
