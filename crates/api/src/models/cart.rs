//! Cart models.

use rust_decimal::Decimal;
use serde::Serialize;
use souk_core::{CartItemId, ProductId};
use sqlx::FromRow;

/// A cart line item joined with the current product name and price.
///
/// Quantities are merged at insert time, so a cart holds at most one line
/// per product.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}
