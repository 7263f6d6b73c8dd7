//! Promotional banner models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use souk_core::{BannerId, BannerState, SellerId};
use sqlx::FromRow;

/// A promotional banner submitted by a seller.
///
/// Created pending (inactive); an admin accept/deny decision moves it to
/// active or soft-deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Banner {
    pub id: BannerId,
    pub seller_id: SellerId,
    pub title: String,
    pub image_url: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Banner {
    /// The moderation state implied by the persisted flag pair.
    #[must_use]
    pub const fn state(&self) -> BannerState {
        BannerState::from_flags(self.is_active, self.is_deleted)
    }
}

/// A banner joined with its shop name, for the admin moderation list.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BannerWithShop {
    pub id: BannerId,
    pub seller_id: SellerId,
    pub title: String,
    pub image_url: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub shop_name: String,
}
