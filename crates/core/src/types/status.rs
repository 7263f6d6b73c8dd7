//! Role and status enums, with their legal transitions.
//!
//! Order and banner lifecycles are modeled as explicit enums plus a
//! transition function. Handlers apply the function first and only write the
//! resulting state, so an illegal move is rejected before any row changes.

use serde::{Deserialize, Serialize};

/// Account role for marketplace users.
///
/// Admins live in a disjoint identity space and are not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
}

/// Order fulfillment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Initial state: the order is placed and awaiting a shipping decision.
    #[default]
    CoordinatingWithShipping,
    /// Accepted and handed to the carrier.
    Shipping,
    /// Terminal: delivered to the buyer.
    Delivered,
    /// Terminal: denied or canceled before shipping.
    Canceled,
}

/// Order payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

/// An action a seller or admin can take on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    Accept,
    Deny,
    Deliver,
}

/// A status transition that is not allowed from the current state.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("illegal transition: cannot {action} from {from}")]
pub struct IllegalTransition {
    /// State the entity was in when the action was attempted.
    pub from: &'static str,
    /// The attempted action.
    pub action: &'static str,
}

impl OrderStatus {
    /// The status string persisted in the database and returned over the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoordinatingWithShipping => "coordinating_with_shipping",
            Self::Shipping => "shipping",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Canceled)
    }

    /// Apply an action, returning the next status.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalTransition`] when the action is not legal from the
    /// current status. Legal moves:
    ///
    /// - `coordinating_with_shipping` --accept--> `shipping`
    /// - `coordinating_with_shipping` --deny--> `canceled`
    /// - `shipping` --deliver--> `delivered`
    pub const fn transition(self, action: OrderAction) -> Result<Self, IllegalTransition> {
        match (self, action) {
            (Self::CoordinatingWithShipping, OrderAction::Accept) => Ok(Self::Shipping),
            (Self::CoordinatingWithShipping, OrderAction::Deny) => Ok(Self::Canceled),
            (Self::Shipping, OrderAction::Deliver) => Ok(Self::Delivered),
            (from, action) => Err(IllegalTransition {
                from: from.as_str(),
                action: action.as_str(),
            }),
        }
    }
}

impl OrderAction {
    /// The action name as it appears in request bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Deny => "deny",
            Self::Deliver => "deliver",
        }
    }
}

/// Moderation state of a promotional banner.
///
/// Persisted as the `(is_active, is_deleted)` flag pair; this enum is the
/// authoritative view of what that pair means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerState {
    /// Submitted by a seller, awaiting an admin decision.
    Pending,
    /// Accepted and visible on the storefront (within its promotion window).
    Active,
    /// Accepted but switched off by an admin.
    Disabled,
    /// Terminal: denied by an admin (soft delete).
    Deleted,
}

/// An action an admin can take on a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerAction {
    Accept,
    Deny,
    Disable,
}

impl BannerState {
    /// Reconstruct the state from the persisted flag pair.
    ///
    /// `is_deleted` wins over `is_active`: a denied banner stays deleted no
    /// matter what the activity flag says.
    #[must_use]
    pub const fn from_flags(is_active: bool, is_deleted: bool) -> Self {
        match (is_active, is_deleted) {
            (_, true) => Self::Deleted,
            (true, false) => Self::Active,
            (false, false) => Self::Pending,
        }
    }

    /// The `(is_active, is_deleted)` flag pair to persist for this state.
    ///
    /// `Pending` and `Disabled` collapse to the same flags; the distinction
    /// only matters while deciding which transitions are legal in memory.
    #[must_use]
    pub const fn flags(self) -> (bool, bool) {
        match self {
            Self::Active => (true, false),
            Self::Pending | Self::Disabled => (false, false),
            Self::Deleted => (false, true),
        }
    }

    /// Apply a moderation action, returning the next state.
    ///
    /// `accept` and `deny` are one-shot decisions on a pending banner.
    /// `disable` is an idempotent switch-off that never deletes.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalTransition`] for `accept`/`deny` on a banner that is
    /// no longer pending, and for any action on a deleted banner.
    pub const fn moderate(self, action: BannerAction) -> Result<Self, IllegalTransition> {
        match (self, action) {
            (Self::Pending, BannerAction::Accept) => Ok(Self::Active),
            (Self::Pending, BannerAction::Deny) => Ok(Self::Deleted),
            (Self::Active | Self::Disabled | Self::Pending, BannerAction::Disable) => {
                Ok(Self::Disabled)
            }
            (from, action) => Err(IllegalTransition {
                from: from.as_str(),
                action: action.as_str(),
            }),
        }
    }

    #[must_use]
    const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Disabled => "disabled",
            Self::Deleted => "deleted",
        }
    }
}

impl BannerAction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Deny => "deny",
            Self::Disable => "disable",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_legal_transitions() {
        let placed = OrderStatus::CoordinatingWithShipping;
        assert_eq!(placed.transition(OrderAction::Accept), Ok(OrderStatus::Shipping));
        assert_eq!(placed.transition(OrderAction::Deny), Ok(OrderStatus::Canceled));
        assert_eq!(
            OrderStatus::Shipping.transition(OrderAction::Deliver),
            Ok(OrderStatus::Delivered)
        );
    }

    #[test]
    fn test_order_terminal_states_reject_everything() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Canceled] {
            assert!(terminal.is_terminal());
            for action in [OrderAction::Accept, OrderAction::Deny, OrderAction::Deliver] {
                assert!(terminal.transition(action).is_err());
            }
        }
    }

    #[test]
    fn test_order_cannot_deny_after_accept() {
        let shipping = OrderStatus::CoordinatingWithShipping
            .transition(OrderAction::Accept)
            .unwrap();
        let err = shipping.transition(OrderAction::Deny).unwrap_err();
        assert_eq!(err.from, "shipping");
        assert_eq!(err.action, "deny");
    }

    #[test]
    fn test_order_status_serde_strings() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::CoordinatingWithShipping).unwrap(),
            "\"coordinating_with_shipping\""
        );
        assert_eq!(serde_json::to_string(&OrderStatus::Shipping).unwrap(), "\"shipping\"");
    }

    #[test]
    fn test_role_serde_strings() {
        assert_eq!(serde_json::to_string(&Role::Buyer).unwrap(), "\"BUYER\"");
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"SELLER\"");
    }

    #[test]
    fn test_banner_accept_and_deny_are_one_shot() {
        let pending = BannerState::Pending;
        assert_eq!(pending.moderate(BannerAction::Accept), Ok(BannerState::Active));
        assert_eq!(pending.moderate(BannerAction::Deny), Ok(BannerState::Deleted));

        let active = BannerState::Active;
        assert!(active.moderate(BannerAction::Accept).is_err());
        assert!(active.moderate(BannerAction::Deny).is_err());
    }

    #[test]
    fn test_banner_disable_is_idempotent_and_never_deletes() {
        let disabled = BannerState::Active.moderate(BannerAction::Disable).unwrap();
        assert_eq!(disabled, BannerState::Disabled);
        assert_eq!(disabled.moderate(BannerAction::Disable), Ok(BannerState::Disabled));
        assert_eq!(disabled.flags(), (false, false));
    }

    #[test]
    fn test_banner_deleted_rejects_all_actions() {
        for action in [BannerAction::Accept, BannerAction::Deny, BannerAction::Disable] {
            assert!(BannerState::Deleted.moderate(action).is_err());
        }
    }

    #[test]
    fn test_banner_flag_roundtrip() {
        assert_eq!(BannerState::from_flags(true, false), BannerState::Active);
        assert_eq!(BannerState::from_flags(false, false), BannerState::Pending);
        // deletion wins over a stale active flag
        assert_eq!(BannerState::from_flags(true, true), BannerState::Deleted);
    }
}
