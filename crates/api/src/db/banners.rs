//! Banner repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use souk_core::{BannerId, SellerId};

use super::RepositoryError;
use crate::models::{Banner, BannerWithShop};

const BANNER_COLUMNS: &str =
    "id, seller_id, title, image_url, starts_at, ends_at, is_active, is_deleted, created_at";

/// Repository for promotional banner operations.
pub struct BannerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BannerRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending banner for a seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        seller_id: SellerId,
        title: &str,
        image_url: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Banner, RepositoryError> {
        let banner: Banner = sqlx::query_as(&format!(
            r"
            INSERT INTO banner (seller_id, title, image_url, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BANNER_COLUMNS}
            "
        ))
        .bind(seller_id)
        .bind(title)
        .bind(image_url)
        .bind(starts_at)
        .bind(ends_at)
        .fetch_one(self.pool)
        .await?;

        Ok(banner)
    }

    /// Get a banner by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: BannerId) -> Result<Option<Banner>, RepositoryError> {
        let banner: Option<Banner> =
            sqlx::query_as(&format!("SELECT {BANNER_COLUMNS} FROM banner WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(banner)
    }

    /// List a seller's own banners (including deleted ones, so the seller
    /// sees the moderation outcome).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_seller(&self, seller_id: SellerId) -> Result<Vec<Banner>, RepositoryError> {
        let banners: Vec<Banner> = sqlx::query_as(&format!(
            "SELECT {BANNER_COLUMNS} FROM banner WHERE seller_id = $1 ORDER BY created_at DESC"
        ))
        .bind(seller_id)
        .fetch_all(self.pool)
        .await?;

        Ok(banners)
    }

    /// List banners currently live on the storefront: accepted, not
    /// deleted, and inside their promotion window.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_live(&self) -> Result<Vec<Banner>, RepositoryError> {
        let banners: Vec<Banner> = sqlx::query_as(&format!(
            r"
            SELECT {BANNER_COLUMNS} FROM banner
            WHERE is_active AND NOT is_deleted
              AND starts_at <= now() AND now() <= ends_at
            ORDER BY starts_at
            "
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(banners)
    }

    /// List non-deleted banners joined with shop names, for the admin
    /// moderation view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_moderation(&self) -> Result<Vec<BannerWithShop>, RepositoryError> {
        let banners: Vec<BannerWithShop> = sqlx::query_as(
            r"
            SELECT b.id, b.seller_id, b.title, b.image_url, b.starts_at, b.ends_at,
                   b.is_active, b.is_deleted, s.shop_name
            FROM banner b
            JOIN seller s ON s.id = b.seller_id
            WHERE NOT b.is_deleted
            ORDER BY b.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(banners)
    }

    /// Persist a moderation outcome as the flag pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id does not resolve.
    pub async fn set_flags(
        &self,
        id: BannerId,
        is_active: bool,
        is_deleted: bool,
    ) -> Result<Banner, RepositoryError> {
        let banner: Option<Banner> = sqlx::query_as(&format!(
            r"
            UPDATE banner SET is_active = $2, is_deleted = $3
            WHERE id = $1
            RETURNING {BANNER_COLUMNS}
            "
        ))
        .bind(id)
        .bind(is_active)
        .bind(is_deleted)
        .fetch_optional(self.pool)
        .await?;

        banner.ok_or(RepositoryError::NotFound)
    }

    /// Hard-delete a banner row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id does not resolve.
    pub async fn delete(&self, id: BannerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM banner WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
