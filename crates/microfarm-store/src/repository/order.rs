//! # Order Repository
//!
//! Persistence for orders and the operator-facing status transitions.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Checkout UI ──► checkout(cart, ...) ──► Order (status: pending)    │
//! │                                             │                       │
//! │  Admin UI ────► set_status(id, next) ──► read-modify-write of the   │
//! │                                          stored record; the state   │
//! │                                          machine in core validates  │
//! │                                                                     │
//! │  Orders are never deleted by normal flow.                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders enter the lifecycle only through [`OrderRepository::checkout`],
//! which builds the record itself - a collaborator cannot hand in an
//! order with a status other than the initial one.

use microfarm_core::{Cart, Order, OrderStatus};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::keys;
use crate::store::Store;

/// Repository for order records.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    store: Store,
}

impl OrderRepository {
    pub fn new(store: Store) -> Self {
        OrderRepository { store }
    }

    /// All orders. The documented default for a fresh store is empty.
    pub fn all(&self) -> Vec<Order> {
        self.store.load(keys::ORDERS)
    }

    /// Orders belonging to one user.
    pub fn for_user(&self, user_id: &str) -> Vec<Order> {
        self.all()
            .into_iter()
            .filter(|o| o.user_id == user_id)
            .collect()
    }

    /// Looks an order up by id.
    pub fn get(&self, id: &str) -> Option<Order> {
        self.all().into_iter().find(|o| o.id == id)
    }

    /// Checkout: converts the cart into a persisted order.
    ///
    /// The returned order is the stored snapshot; the caller clears the
    /// cart afterwards. An empty cart is rejected before any write.
    pub fn checkout(&self, cart: &Cart, user_id: &str, address: &str) -> StoreResult<Order> {
        let order = Order::from_cart(cart, user_id, address)?;

        let mut orders = self.all();
        orders.push(order.clone());
        self.store.save(keys::ORDERS, &orders)?;

        info!(id = %order.id, total = %order.total, "order created");
        Ok(order)
    }

    /// Applies an operator-initiated status transition as a full
    /// read-modify-write of the stored record.
    ///
    /// Illegal transitions are rejected by the lifecycle rules with the
    /// stored record untouched; an unknown order id is a no-op.
    pub fn set_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()> {
        let mut orders = self.all();
        let Some(order) = orders.iter_mut().find(|o| o.id == order_id) else {
            debug!(order_id, "status change for unknown order ignored");
            return Ok(());
        };

        order.transition(status)?;
        self.store.save(keys::ORDERS, &orders)?;

        info!(order_id, %status, "order status updated");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
