//! Product repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use souk_core::{CategoryId, ProductId, SellerId};

use super::RepositoryError;
use crate::models::{Product, ProductDetail};

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, image_url, seller_id, category_id, created_at";

/// Repository for product operations.
///
/// Mutations are scoped by seller id at the SQL level; a statement that
/// matches zero rows performed no write.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products: Vec<Product> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Case-insensitive substring search over name and description.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        // escape LIKE metacharacters in user input
        let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        let pattern = format!("%{escaped}%");

        let products: Vec<Product> = sqlx::query_as(&format!(
            r"
            SELECT {PRODUCT_COLUMNS} FROM product
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY created_at DESC
            "
        ))
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product: Option<Product> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(product)
    }

    /// Get a product joined with category and shop names, for the public
    /// detail page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_detail(&self, id: ProductId) -> Result<Option<ProductDetail>, RepositoryError> {
        let detail: Option<ProductDetail> = sqlx::query_as(
            r"
            SELECT p.id, p.name, p.description, p.price, p.image_url,
                   p.seller_id, p.category_id,
                   c.name AS category_name, s.shop_name
            FROM product p
            JOIN category c ON c.id = p.category_id
            JOIN seller s ON s.id = p.seller_id
            WHERE p.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(detail)
    }

    /// List a seller's own products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_seller(&self, seller_id: SellerId) -> Result<Vec<Product>, RepositoryError> {
        let products: Vec<Product> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE seller_id = $1 ORDER BY created_at DESC"
        ))
        .bind(seller_id)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a product for a seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        seller_id: SellerId,
        name: &str,
        description: &str,
        price: Decimal,
        image_url: &str,
        category_id: CategoryId,
    ) -> Result<Product, RepositoryError> {
        let product: Product = sqlx::query_as(&format!(
            r"
            INSERT INTO product (name, description, price, image_url, seller_id, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image_url)
        .bind(seller_id)
        .bind(category_id)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Update a product, scoped to its owning seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches both the
    /// product id and the seller id; the caller distinguishes "missing"
    /// from "foreign" before calling.
    pub async fn update(
        &self,
        id: ProductId,
        seller_id: SellerId,
        name: &str,
        description: &str,
        price: Decimal,
        image_url: &str,
        category_id: CategoryId,
    ) -> Result<Product, RepositoryError> {
        let product: Option<Product> = sqlx::query_as(&format!(
            r"
            UPDATE product
            SET name = $3, description = $4, price = $5, image_url = $6, category_id = $7
            WHERE id = $1 AND seller_id = $2
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(seller_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image_url)
        .bind(category_id)
        .fetch_optional(self.pool)
        .await?;

        product.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product, scoped to its owning seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches both ids.
    pub async fn delete(&self, id: ProductId, seller_id: SellerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1 AND seller_id = $2")
            .bind(id)
            .bind(seller_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
