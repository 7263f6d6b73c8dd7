//! Cart repository.
//!
//! The cart invariant lives here: at most one `cart_item` row per
//! (cart, product) pair, enforced by a unique constraint and an upsert that
//! increments in a single statement. There is no read-modify-write cycle,
//! so concurrent adds to the same line cannot lose updates.

use sqlx::PgPool;

use souk_core::{CartId, CartItemId, ProductId, UserId};

use super::RepositoryError;
use crate::models::CartLine;

/// Merge-on-add upsert: a conflicting insert increments the existing line's
/// quantity in the same statement, so concurrent adds cannot lose updates.
const ADD_ITEM_SQL: &str = r"
    INSERT INTO cart_item (cart_id, product_id, quantity)
    VALUES ($1, $2, $3)
    ON CONFLICT (cart_id, product_id)
    DO UPDATE SET quantity = cart_item.quantity + EXCLUDED.quantity
    RETURNING id
";

/// Repository for cart operations. All item operations take the owning
/// user id and join through `cart`, so a caller can only ever touch rows
/// in their own cart.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's cart id, creating the cart on first use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<CartId, RepositoryError> {
        // the no-op DO UPDATE makes the statement return the existing id
        let (id,): (CartId,) = sqlx::query_as(
            r"
            INSERT INTO cart (user_id) VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id
            ",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// List the user's cart lines joined with current product data.
    ///
    /// Returns an empty list when the user has no cart yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_lines(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines: Vec<CartLine> = sqlx::query_as(
            r"
            SELECT ci.id, ci.product_id, p.name, p.price, ci.quantity
            FROM cart_item ci
            JOIN cart c ON c.id = ci.cart_id
            JOIN product p ON p.id = ci.product_id
            WHERE c.user_id = $1
            ORDER BY ci.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Add a quantity of a product to a cart.
    ///
    /// If the product is already in the cart, its quantity is incremented
    /// by `quantity` in the same statement; it is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn add_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItemId, RepositoryError> {
        let (id,): (CartItemId,) = sqlx::query_as(ADD_ITEM_SQL)
            .bind(cart_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(self.pool)
            .await?;

        Ok(id)
    }

    /// Set the quantity of a cart item owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist in
    /// the caller's cart.
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        user_id: UserId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE cart_item ci
            SET quantity = $3
            FROM cart c
            WHERE ci.cart_id = c.id AND ci.id = $1 AND c.user_id = $2
            ",
        )
        .bind(item_id)
        .bind(user_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Remove a cart item owned by the given user. Idempotent: removing an
    /// already-removed item succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn remove_item(
        &self,
        item_id: CartItemId,
        user_id: UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_item ci
            USING cart c
            WHERE ci.cart_id = c.id AND ci.id = $1 AND c.user_id = $2
            ",
        )
        .bind(item_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Empty the user's cart after a successful checkout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_item ci
            USING cart c
            WHERE ci.cart_id = c.id AND c.user_id = $1
            ",
        )
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_increments_on_conflict() {
        // the unique (cart, product) pair resolves to exactly one row, and a
        // repeated add must increment that row's quantity, never overwrite it
        assert!(ADD_ITEM_SQL.contains("ON CONFLICT (cart_id, product_id)"));
        assert!(
            ADD_ITEM_SQL.contains("DO UPDATE SET quantity = cart_item.quantity + EXCLUDED.quantity")
        );
        assert!(!ADD_ITEM_SQL.contains("DO NOTHING"));
    }
}
