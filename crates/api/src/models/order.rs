//! Order models and checkout arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use souk_core::{OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId, UserId};
use sqlx::FromRow;

/// Shipping address submitted at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Whether every required field is non-empty (line 2 is optional).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        ![
            &self.address_line1,
            &self.city,
            &self.province,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}

/// One line of the cart snapshot submitted at checkout.
///
/// The price is the client's snapshot of the unit price, not re-read from
/// the product table; see the trust-boundary note on the checkout handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
}

/// Compute an order total as Σ(unit price × quantity) over the submitted
/// snapshot.
///
/// Returns `None` when a line or the running sum overflows `Decimal`; the
/// snapshot is client-submitted, so the arithmetic must not panic.
#[must_use]
pub fn order_total(items: &[OrderItemInput]) -> Option<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        item.price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line| total.checked_add(line))
    })
}

/// A persisted order.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An immutable order line-item snapshot, joined with the product name for
/// display.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// A full order view: header, line items, and buyer identity.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub buyer_name: String,
    pub buyer_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i32, quantity: i32, price: &str) -> OrderItemInput {
        OrderItemInput {
            product_id: ProductId::new(product_id),
            quantity,
            price: price.parse().expect("valid decimal"),
        }
    }

    #[test]
    fn test_order_total_single_line() {
        let total = order_total(&[item(1, 2, "10")]);
        assert_eq!(total, Some(Decimal::from(20)));
    }

    #[test]
    fn test_order_total_multiple_lines() {
        let total = order_total(&[item(1, 2, "10.50"), item(2, 1, "3.25")]);
        assert_eq!(total, Some("24.25".parse::<Decimal>().expect("valid decimal")));
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(order_total(&[]), Some(Decimal::ZERO));
    }

    #[test]
    fn test_order_total_overflow_is_none() {
        // near-MAX price times a large quantity must not panic
        let total = order_total(&[item(1, 2_000_000_000, "79000000000000000000000000000")]);
        assert_eq!(total, None);
    }

    #[test]
    fn test_order_total_sum_overflow_is_none() {
        let line = item(1, 1, "79000000000000000000000000000");
        assert_eq!(order_total(&[line.clone(), line]), None);
    }

    #[test]
    fn test_address_completeness() {
        let mut address = ShippingAddress {
            address_line1: "1 Harbour Rd".to_string(),
            address_line2: None,
            city: "Hill Valley".to_string(),
            province: "CA".to_string(),
            postal_code: "95420".to_string(),
            country: "US".to_string(),
        };
        assert!(address.is_complete());

        address.city = "  ".to_string();
        assert!(!address.is_complete());
    }
}
