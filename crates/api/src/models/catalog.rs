//! Catalog models: categories and products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use souk_core::{CategoryId, ProductId, SellerId};
use sqlx::FromRow;

/// A product category. Names are unique (case-sensitive) and admin-managed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A product listed by a seller.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub seller_id: SellerId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
}

/// A product joined with its category and shop names, for detail pages.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub seller_id: SellerId,
    pub category_id: CategoryId,
    pub category_name: String,
    pub shop_name: String,
}
