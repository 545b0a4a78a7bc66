//! # microfarm-core: Pure Business Logic for MicroFarm
//!
//! This crate is the **heart** of MicroFarm, a build-your-own grow farm
//! shop. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      MicroFarm Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (TypeScript)                       │   │
//! │  │   Builder UI ──► Cart UI ──► Checkout UI ──► Admin UI      │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │ typed data (ts-rs bindings)        │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              ★ microfarm-core (THIS CRATE) ★                │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌────────┐ ┌───────┐ │   │
//! │  │  │ config  │ │ pricing │ │ layout  │ │  cart  │ │ order │ │   │
//! │  │  │KitConfig│ │ price() │ │compose()│ │  Cart  │ │ state │ │   │
//! │  │  │ resolve │ │         │ │         │ │CartItem│ │machine│ │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └────────┘ └───────┘ │   │
//! │  │                                                             │   │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                    │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              microfarm-store (Persistence Layer)            │   │
//! │  │        quota-aware key/value store + repositories           │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Domain types (Product, Equipment, Review, User)
//! - [`config`] - The custom kit configuration model and auto-mode rule
//! - [`pricing`] - Deterministic configuration pricing
//! - [`layout`] - Procedural unit/connector placement
//! - [`cart`] - Cart line items, identity and merge semantics
//! - [`order`] - Order record and fulfillment lifecycle
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`auth`] - Injected authorization policy
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: pricing and layout are deterministic - same
//!    configuration in, same result out
//! 2. **No I/O**: persistence lives in microfarm-store, never here
//! 3. **Integer Money**: all monetary values are whole currency units (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod money;
pub mod order;
pub mod pricing;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use microfarm_core::Money` instead of
// `use microfarm_core::money::Money`

pub use auth::{AdminAllowList, AuthPolicy};
pub use cart::{Cart, CartItem, CartLine};
pub use catalog::{Category, Difficulty, Equipment, Product, ProductVariant, Review, Role, User};
pub use config::{CustomKitConfig, Feature, KitBuilder, Layout, LidType, PowerType, Substrate};
pub use error::{CoreError, CoreResult, ValidationError};
pub use layout::{compose, Assembly};
pub use money::Money;
pub use order::{Order, OrderStatus};
pub use pricing::price;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
