//! # Order Lifecycle
//!
//! The durable order record and the state machine it moves through.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Order Status Lifecycle                          │
//! │                                                                     │
//! │   pending ──► processing ──► shipped ──► delivered (terminal)       │
//! │      │             │            │                                   │
//! │      │             │            │     no skipping on the happy      │
//! │      ▼             ▼            ▼     path, strictly linear         │
//! │  cancelled / returned  (terminal, reachable from any                │
//! │                         non-terminal state)                         │
//! │                                                                     │
//! │  Nothing leaves delivered, cancelled or returned.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions are operator-initiated; each one is a full read-modify-
//! write of the record through the store layer. From `pending` onward only
//! `status` may change - items and total are immutable snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartItem};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Address recorded when the buyer leaves the delivery field blank.
pub const PICKUP_ADDRESS: &str = "Pickup";

// =============================================================================
// Order Status
// =============================================================================

/// Fulfillment stage of a persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// Whether the status admits no further transitions.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Returned
        )
    }

    /// The next step on the happy path, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Returned => None,
        }
    }

    /// Whether a transition to `to` is legal: one step forward on the
    /// happy path, or sideways into cancelled/returned from any
    /// non-terminal state.
    pub fn can_transition(self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if matches!(to, OrderStatus::Cancelled | OrderStatus::Returned) {
            return true;
        }
        self.next() == Some(to)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
        };
        f.write_str(tag)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A persisted order: an immutable snapshot of the cart at checkout time
/// plus the fulfillment status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    /// Snapshot of the cart lines at checkout; never recomputed.
    pub items: Vec<CartItem>,
    /// Sum of unit price × quantity, computed once at checkout.
    pub total: Money,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub address: String,
}

impl Order {
    /// Checkout: converts a cart into a new order.
    ///
    /// The only way an order comes into existence - the status is always
    /// the lifecycle's initial state and the total is fixed here.
    pub fn from_cart(cart: &Cart, user_id: &str, address: &str) -> CoreResult<Order> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let address = address.trim();
        Ok(Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            items: cart.items.clone(),
            total: cart.total(),
            status: OrderStatus::Pending,
            date: Utc::now(),
            address: if address.is_empty() {
                PICKUP_ADDRESS.to_string()
            } else {
                address.to_string()
            },
        })
    }

    /// Applies an operator-initiated status transition.
    ///
    /// Only `status` changes; illegal transitions are rejected with the
    /// record untouched.
    pub fn transition(&mut self, to: OrderStatus) -> CoreResult<()> {
        if !self.status.can_transition(to) {
            return Err(CoreError::InvalidStatusTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomKitConfig;

    fn cart_with_one_item() -> Cart {
        let mut cart = Cart::new();
        cart.add(CartItem::from_config(CustomKitConfig::default(), 2).unwrap());
        cart
    }

    #[test]
    fn test_checkout_snapshots_cart() {
        let cart = cart_with_one_item();
        let order = Order::from_cart(&cart, "u-1", "10 Botanical St").unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total.units(), 3000); // 1500 × 2
        assert_eq!(order.address, "10 Botanical St");
    }

    #[test]
    fn test_checkout_rejects_empty_cart() {
        let cart = Cart::new();
        assert!(matches!(
            Order::from_cart(&cart, "u-1", ""),
            Err(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_blank_address_defaults_to_pickup() {
        let cart = cart_with_one_item();
        let order = Order::from_cart(&cart, "u-1", "   ").unwrap();
        assert_eq!(order.address, PICKUP_ADDRESS);
    }

    #[test]
    fn test_happy_path_is_strictly_linear() {
        let mut order = Order::from_cart(&cart_with_one_item(), "u-1", "").unwrap();

        // no skipping
        assert!(order.transition(OrderStatus::Shipped).is_err());
        assert!(order.transition(OrderStatus::Delivered).is_err());

        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        order.transition(OrderStatus::Delivered).unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_side_states_reachable_from_any_non_terminal() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
        ] {
            assert!(status.can_transition(OrderStatus::Cancelled));
            assert!(status.can_transition(OrderStatus::Returned));
        }
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for terminal in [
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
        ] {
            for target in [
                OrderStatus::Pending,
                OrderStatus::Processing,
                OrderStatus::Shipped,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
                OrderStatus::Returned,
            ] {
                assert!(!terminal.can_transition(target));
            }
        }
    }

    #[test]
    fn test_self_transition_rejected() {
        assert!(!OrderStatus::Pending.can_transition(OrderStatus::Pending));
        assert!(!OrderStatus::Processing.can_transition(OrderStatus::Processing));
    }

    #[test]
    fn test_rejected_transition_leaves_record_untouched() {
        let mut order = Order::from_cart(&cart_with_one_item(), "u-1", "").unwrap();
        let before = order.clone();
        assert!(order.transition(OrderStatus::Delivered).is_err());
        assert_eq!(order, before);
    }

    #[test]
    fn test_transition_changes_only_status() {
        let mut order = Order::from_cart(&cart_with_one_item(), "u-1", "").unwrap();
        let before = order.clone();
        order.transition(OrderStatus::Processing).unwrap();

        assert_eq!(order.items, before.items);
        assert_eq!(order.total, before.total);
        assert_eq!(order.date, before.date);
        assert_eq!(order.address, before.address);
        assert_ne!(order.status, before.status);
    }

    #[test]
    fn test_order_serde_round_trip() {
        let order = Order::from_cart(&cart_with_one_item(), "u-1", "somewhere").unwrap();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
        assert!(json.contains("\"status\":\"pending\""));
    }
}
