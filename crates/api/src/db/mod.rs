//! Database operations for the marketplace `PostgreSQL`.
//!
//! ## Tables
//!
//! - `user` / `admin` - the two disjoint identity spaces
//! - `seller` - seller profiles, one per user, verified by admins
//! - `category` / `product` - the catalog
//! - `cart` / `cart_item` - per-buyer carts with merge-on-add line items
//! - `"order"` / `order_item` - orders with immutable line-item snapshots
//! - `banner` - promotional banners moderated by admins
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and run at startup via
//! `sqlx::migrate!`.

pub mod admins;
pub mod banners;
pub mod carts;
pub mod categories;
pub mod orders;
pub mod products;
pub mod sellers;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use banners::BannerRepository;
pub use carts::CartRepository;
pub use categories::CategoryRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use sellers::SellerRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email or category name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, converting unique-constraint violations to
    /// [`RepositoryError::Conflict`] with the given message.
    pub fn from_sqlx(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_message.to_string());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
