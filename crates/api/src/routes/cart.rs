//! Cart route handlers.
//!
//! Adds merge into an existing line for the same product instead of
//! creating a duplicate row; the increment happens in a single statement at
//! the repository layer.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use souk_core::{CartItemId, ProductId};

use crate::db::{CartRepository, ProductRepository};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::CartLine;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

fn require_positive_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// `GET /api/cart` - the caller's cart lines.
pub async fn get_cart(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartLine>>, AppError> {
    let lines = CartRepository::new(state.pool())
        .list_lines(claims.sub)
        .await?;
    Ok(Json(lines))
}

/// `POST /api/cart` - add a quantity of a product.
///
/// Creates the cart lazily on first add. Returns the updated cart lines.
pub async fn add_item(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<Vec<CartLine>>), AppError> {
    require_positive_quantity(body.quantity)?;

    // the product must exist before it can be carted
    ProductRepository::new(state.pool())
        .get_by_id(body.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let carts = CartRepository::new(state.pool());
    let cart_id = carts.get_or_create(claims.sub).await?;
    carts.add_item(cart_id, body.product_id, body.quantity).await?;

    let lines = carts.list_lines(claims.sub).await?;
    Ok((StatusCode::CREATED, Json(lines)))
}

/// `PATCH /api/cart/{id}` - set a line's quantity.
///
/// The line must belong to the caller's cart; quantities below 1 are
/// rejected without touching the row.
pub async fn update_item(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
    Path(item_id): Path<CartItemId>,
    Json(body): Json<UpdateQuantityRequest>,
) -> Result<Json<Vec<CartLine>>, AppError> {
    require_positive_quantity(body.quantity)?;

    let carts = CartRepository::new(state.pool());
    carts
        .update_quantity(item_id, claims.sub, body.quantity)
        .await?;

    let lines = carts.list_lines(claims.sub).await?;
    Ok(Json(lines))
}

/// `DELETE /api/cart/{id}` - remove a line. Idempotent.
pub async fn remove_item(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
    Path(item_id): Path<CartItemId>,
) -> Result<Json<Vec<CartLine>>, AppError> {
    let carts = CartRepository::new(state.pool());
    carts.remove_item(item_id, claims.sub).await?;

    let lines = carts.list_lines(claims.sub).await?;
    Ok(Json(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_negative_quantities_rejected() {
        assert!(matches!(
            require_positive_quantity(0),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            require_positive_quantity(-3),
            Err(AppError::Validation(_))
        ));
        assert!(require_positive_quantity(1).is_ok());
    }
}
