//! Order repository.
//!
//! Orders are created in one transaction (header plus line-item snapshots)
//! and transition through a compare-and-set status update: the UPDATE is
//! keyed on both the order id and the expected current status, so two
//! racing decisions cannot both win.

use rust_decimal::Decimal;
use sqlx::PgPool;

use souk_core::{OrderId, OrderStatus, SellerId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderDetail, OrderItem, OrderItemInput, ShippingAddress};

const ORDER_COLUMNS: &str = "id, user_id, address_line1, address_line2, city, province, \
     postal_code, country, total_amount, status, payment_status, created_at, updated_at";

/// Repository for order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order and its line-item snapshots in one transaction.
    ///
    /// The items are the submitted snapshot, stored as-is; they are
    /// immutable from here on.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing
    /// is written in that case.
    pub async fn create(
        &self,
        user_id: UserId,
        address: &ShippingAddress,
        total_amount: Decimal,
        items: &[OrderItemInput],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order: Order = sqlx::query_as(&format!(
            r#"
            INSERT INTO "order"
                (user_id, address_line1, address_line2, city, province,
                 postal_code, country, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&address.address_line1)
        .bind(&address.address_line2)
        .bind(&address.city)
        .bind(&address.province)
        .bind(&address.postal_code)
        .bind(&address.country)
        .bind(total_amount)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r"
                INSERT INTO order_item (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    /// Get an order header by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order: Option<Order> =
            sqlx::query_as(&format!(r#"SELECT {ORDER_COLUMNS} FROM "order" WHERE id = $1"#))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(order)
    }

    /// Get a full order view: header, line items with product names, and
    /// buyer identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_detail(&self, id: OrderId) -> Result<Option<OrderDetail>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct BuyerRow {
            name: String,
            email: String,
        }

        let Some(order) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let items: Vec<OrderItem> = sqlx::query_as(
            r"
            SELECT oi.id, oi.product_id, p.name AS product_name, oi.quantity, oi.price
            FROM order_item oi
            JOIN product p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let buyer: BuyerRow = sqlx::query_as(r#"SELECT name, email FROM "user" WHERE id = $1"#)
            .bind(order.user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(Some(OrderDetail {
            order,
            items,
            buyer_name: buyer.name,
            buyer_email: buyer.email,
        }))
    }

    /// List a buyer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders: Vec<Order> = sqlx::query_as(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM "order" WHERE user_id = $1 ORDER BY created_at DESC"#
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// List orders containing at least one of the seller's products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_seller(&self, seller_id: SellerId) -> Result<Vec<Order>, RepositoryError> {
        let orders: Vec<Order> = sqlx::query_as(
            r#"
            SELECT DISTINCT o.id, o.user_id, o.address_line1, o.address_line2, o.city,
                   o.province, o.postal_code, o.country, o.total_amount, o.status,
                   o.payment_status, o.created_at, o.updated_at
            FROM "order" o
            JOIN order_item oi ON oi.order_id = o.id
            JOIN product p ON p.id = oi.product_id
            WHERE p.seller_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(seller_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Whether an order contains any of the seller's products. Used as the
    /// ownership predicate for seller order actions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn contains_seller_items(
        &self,
        order_id: OrderId,
        seller_id: SellerId,
    ) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS (
                SELECT 1 FROM order_item oi
                JOIN product p ON p.id = oi.product_id
                WHERE oi.order_id = $1 AND p.seller_id = $2
            )
            ",
        )
        .bind(order_id)
        .bind(seller_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Compare-and-set the order status in a single atomic update.
    ///
    /// Returns the updated order, or `None` when the order was not in
    /// `from` anymore (lost race or repeated action); no write happens in
    /// that case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let order: Option<Order> = sqlx::query_as(&format!(
            r#"
            UPDATE "order" SET status = $3, updated_at = now()
            WHERE id = $1 AND status = $2
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }
}
