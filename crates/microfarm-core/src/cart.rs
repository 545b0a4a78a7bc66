//! # Cart
//!
//! Ordered collection of line items with merge-by-identity semantics.
//!
//! ## Line Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cart Merge Rule                               │
//! │                                                                     │
//! │  add(catalog line)                                                  │
//! │       │                                                             │
//! │       ├── same productId + variantId already present?               │
//! │       │        yes → existing.quantity += incoming.quantity         │
//! │       │              (price and every other field untouched)        │
//! │       │        no  → append, preserving insertion order             │
//! │       │                                                             │
//! │  add(custom line)                                                   │
//! │       └── always appended: every custom build is unique by          │
//! │           construction-time id, even when value-identical           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are snapshotted at add-time and never re-derived; the total is
//! recomputed from the lines on every read, never cached.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::Product;
use crate::config::CustomKitConfig;
use crate::error::CoreResult;
use crate::money::Money;
use crate::pricing;
use crate::validation::validate_quantity;

/// Image shown for custom builder lines.
pub const BUILDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1585320806297-9794b3e4eeae?auto=format&fit=crop&q=80&w=400";

// =============================================================================
// Cart Line
// =============================================================================

/// What a cart line refers to: a catalog product (optionally a variant of
/// it), or an embedded custom configuration snapshot.
///
/// Modeled as a tagged union so "exactly one kind populated" is enforced
/// structurally; the untagged serde representation keeps the persisted
/// shape flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged, rename_all_fields = "camelCase")]
#[ts(export)]
pub enum CartLine {
    Catalog {
        product_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant_name: Option<String>,
    },
    Custom { custom_config: CustomKitConfig },
}

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Unique per line.
    pub id: String,

    #[serde(flatten)]
    pub line: CartLine,

    /// Display name, frozen at add-time.
    pub name: String,

    /// Unit price, frozen at add-time - never recomputed later.
    pub price: Money,

    /// Always at least 1.
    pub quantity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// Builds a catalog line, snapshotting name, price and image.
    ///
    /// A product with variants requires a variant id that exists in its
    /// list; that rule is enforced here.
    pub fn from_product(
        product: &Product,
        variant_id: Option<&str>,
        quantity: i64,
    ) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        let price = product.unit_price(variant_id)?;
        let variant = variant_id.and_then(|id| product.variant(id));

        Ok(CartItem {
            id: Uuid::new_v4().to_string(),
            line: CartLine::Catalog {
                product_id: product.id.clone(),
                variant_id: variant.map(|v| v.id.clone()),
                variant_name: variant.map(|v| v.name.clone()),
            },
            name: product.name.clone(),
            price,
            quantity,
            image: Some(product.image.clone()),
        })
    }

    /// Builds a custom line from a configuration snapshot, priced by the
    /// pricing engine at this moment.
    pub fn from_config(config: CustomKitConfig, quantity: i64) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        let price = pricing::price(&config);
        let name = format!(
            "Smart Farm ({} / {})",
            config.layout,
            if config.auto_mode { "Auto" } else { "Manual" }
        );

        Ok(CartItem {
            id: Uuid::new_v4().to_string(),
            line: CartLine::Custom {
                custom_config: config,
            },
            name,
            price,
            quantity,
            image: Some(BUILDER_IMAGE.to_string()),
        })
    }

    /// Line identity: two catalog lines match iff productId and variantId
    /// both match; custom lines never merge with one another.
    pub fn same_identity(&self, other: &CartItem) -> bool {
        match (&self.line, &other.line) {
            (
                CartLine::Catalog {
                    product_id: a,
                    variant_id: av,
                    ..
                },
                CartLine::Catalog {
                    product_id: b,
                    variant_id: bv,
                    ..
                },
            ) => a == b && av == bv,
            _ => false,
        }
    }

    /// Line total: unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The session's cart. Owned by the active client session, never shared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds an item, merging into an existing line of the same identity.
    ///
    /// On merge, only the quantity of the existing line changes - its
    /// snapshotted price, name and image stay as they were.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.same_identity(&item)) {
            existing.quantity += item.quantity;
            return;
        }
        self.items.push(item);
    }

    /// Removes the line with the given id; absent ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    /// Adjusts a line's quantity by a signed delta, clamped so the
    /// quantity never drops below 1 - removal is a separate explicit
    /// action. Absent ids are a no-op.
    pub fn update_quantity(&mut self, id: &str, delta: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = (item.quantity + delta).max(1);
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Cart total, recomputed from the lines on every read.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
