//! Seller profile repository.

use sqlx::PgPool;

use souk_core::{Role, SellerId, UserId};

use super::RepositoryError;
use crate::models::{Seller, SellerWithUser};

const SELLER_COLUMNS: &str = "id, user_id, shop_name, shop_description, is_verified, created_at";

/// Repository for seller profile operations.
pub struct SellerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SellerRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a seller profile for a user.
    ///
    /// Used both at signup (empty shop fields) and by the explicit setup
    /// step. A user owns at most one profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has a
    /// profile.
    pub async fn create(
        &self,
        user_id: UserId,
        shop_name: &str,
        shop_description: &str,
    ) -> Result<Seller, RepositoryError> {
        let seller: Seller = sqlx::query_as(&format!(
            r"
            INSERT INTO seller (user_id, shop_name, shop_description)
            VALUES ($1, $2, $3)
            RETURNING {SELLER_COLUMNS}
            "
        ))
        .bind(user_id)
        .bind(shop_name)
        .bind(shop_description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "user already has a seller profile"))?;

        Ok(seller)
    }

    /// Get the seller profile owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user_id(&self, user_id: UserId) -> Result<Option<Seller>, RepositoryError> {
        let seller: Option<Seller> =
            sqlx::query_as(&format!("SELECT {SELLER_COLUMNS} FROM seller WHERE user_id = $1"))
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(seller)
    }

    /// Get a verified seller by id, for the public shop page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_verified_by_id(
        &self,
        id: SellerId,
    ) -> Result<Option<Seller>, RepositoryError> {
        let seller: Option<Seller> = sqlx::query_as(&format!(
            "SELECT {SELLER_COLUMNS} FROM seller WHERE id = $1 AND is_verified"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(seller)
    }

    /// List all sellers joined with their owning user, for the admin
    /// verification queue.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_users(&self) -> Result<Vec<SellerWithUser>, RepositoryError> {
        let sellers: Vec<SellerWithUser> = sqlx::query_as(
            r#"
            SELECT s.id, s.user_id, s.shop_name, s.shop_description, s.is_verified,
                   u.name AS user_name, u.email AS user_email
            FROM seller s
            JOIN "user" u ON u.id = s.user_id
            ORDER BY s.is_verified, s.created_at
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(sellers)
    }

    /// Verify a seller and promote the owning user's role to SELLER.
    ///
    /// One-way: nothing in the API un-verifies. Both writes happen in a
    /// single transaction. Re-verifying an already-verified seller is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the seller id does not
    /// resolve.
    pub async fn verify(&self, id: SellerId) -> Result<Seller, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let seller: Option<Seller> = sqlx::query_as(&format!(
            r"
            UPDATE seller SET is_verified = TRUE
            WHERE id = $1
            RETURNING {SELLER_COLUMNS}
            "
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(seller) = seller else {
            return Err(RepositoryError::NotFound);
        };

        sqlx::query(r#"UPDATE "user" SET role = $2, updated_at = now() WHERE id = $1"#)
            .bind(seller.user_id)
            .bind(Role::Seller)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(seller)
    }
}
