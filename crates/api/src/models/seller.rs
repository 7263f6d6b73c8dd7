//! Seller profile models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use souk_core::{SellerId, UserId};
use sqlx::FromRow;

/// A seller profile, owned by exactly one user.
///
/// `is_verified` moves false→true by admin action only; nothing moves it
/// back.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Seller {
    pub id: SellerId,
    pub user_id: UserId,
    pub shop_name: String,
    pub shop_description: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// A seller joined with its owning user, for the admin verification queue.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SellerWithUser {
    pub id: SellerId,
    pub user_id: UserId,
    pub shop_name: String,
    pub shop_description: String,
    pub is_verified: bool,
    pub user_name: String,
    pub user_email: String,
}
