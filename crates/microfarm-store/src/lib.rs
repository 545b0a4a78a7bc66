//! # microfarm-store: Persistence Layer for MicroFarm
//!
//! Key-scoped durable storage for the shop's records, with the
//! quota-aware save/fallback discipline the single-client model calls
//! for.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      MicroFarm Data Flow                            │
//! │                                                                     │
//! │  UI / collaborators                                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                microfarm-store (THIS CRATE)                 │   │
//! │  │                                                             │   │
//! │  │  ┌──────────────┐   ┌──────────────┐   ┌───────────────┐   │   │
//! │  │  │    Store     │   │ Repositories │   │   Bootstrap   │   │   │
//! │  │  │ (store.rs)   │◄──│ product      │   │  default data │   │   │
//! │  │  │ save_safe    │   │ equipment    │   │  (seeded on   │   │   │
//! │  │  │ load_or_seed │   │ review       │   │  first read)  │   │   │
//! │  │  └──────┬───────┘   │ order        │   └───────────────┘   │   │
//! │  │         │           │ session      │                       │   │
//! │  │         ▼           └──────────────┘                       │   │
//! │  │  StorageBackend: memory / file-per-key, byte budget        │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - Key/value backends with quota enforcement
//! - [`store`] - The shared save/fallback discipline
//! - [`repository`] - Repository implementations per record family
//! - [`bootstrap`] - The documented default data set
//! - [`image`] - Image references and the generation collaborator
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use microfarm_store::{OrderRepository, ProductRepository, Store};
//! use microfarm_core::{Cart, CartItem};
//!
//! let store = Store::in_memory();
//! let products = ProductRepository::new(store.clone());
//! let orders = OrderRepository::new(store.clone());
//!
//! let catalog = products.all(); // bootstrap catalog on first read
//! let mut cart = Cart::new();
//! cart.add(CartItem::from_product(&catalog[0], None, 1).unwrap());
//!
//! let order = orders.checkout(&cart, "u-1", "10 Botanical St").unwrap();
//! cart.clear();
//! assert_eq!(orders.for_user("u-1").len(), 1);
//! # drop(order);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod bootstrap;
pub mod error;
pub mod image;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::{StoreError, StoreResult};
pub use image::{ImageGenerator, NoopImageGenerator, PLACEHOLDER_IMAGE};
pub use store::Store;

// Repository re-exports for convenience
pub use repository::equipment::EquipmentRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::review::ReviewRepository;
pub use repository::session::SessionRepository;

// =============================================================================
// Record Keys
// =============================================================================

/// Persisted record keys, namespaced and versioned.
///
/// Each key resolves to a JSON-serialized sequence of the corresponding
/// records (a single record for the session key). Bumping a version
/// abandons the old key, so stale shapes fall back to bootstrap data
/// instead of failing to parse forever.
pub mod keys {
    pub const PRODUCTS: &str = "mf_products_v1";
    pub const ORDERS: &str = "mf_orders_v1";
    pub const REVIEWS: &str = "mf_reviews_v1";
    pub const USER: &str = "mf_user_v1";
    pub const EQUIPMENT: &str = "mf_equipment_v1";
}
