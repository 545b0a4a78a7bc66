//! # Catalog Types
//!
//! Canonical product and equipment records, plus users and reviews.
//!
//! ## Dual Relation Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Relations                            │
//! │                                                                     │
//! │  ┌─────────────┐  equipment_ids   ┌─────────────┐                  │
//! │  │   Product   │ ───────────────► │  Equipment  │                  │
//! │  │  (kit/seed) │   non-owning     │ (hardware)  │                  │
//! │  └──────┬──────┘                  └─────────────┘                  │
//! │         │ variants (owned)                                          │
//! │         ▼                                                           │
//! │  ┌─────────────┐                                                   │
//! │  │   Variant   │  e.g. seed weights: 50 г / 100 г / 500 г          │
//! │  └─────────────┘                                                   │
//! │                                                                     │
//! │  Equipment lifecycle is independent of any product - deleting a    │
//! │  product never deletes the hardware records it referenced.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A selectable variant of a product (e.g. a seed packet weight).
///
/// Variants carry their own price; when a variant is chosen the variant
/// price replaces the product's base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductVariant {
    pub id: String,
    pub name: String,
    pub price: Money,
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Category {
    /// A ready-made grow kit.
    Kit,
    /// Seed packets, usually with weight variants.
    Seeds,
    /// Standalone accessories (mats, tools).
    Accessories,
}

/// Growing difficulty shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A catalog product.
///
/// Catalog records are read-mostly reference data; only the admin surface
/// mutates them (through the store layer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description for product cards.
    pub description: String,

    /// Long-form details for the product page.
    pub details: String,

    /// Base price; replaced by the variant price when a variant is chosen.
    pub price: Money,

    /// Struck-through previous price, when the product is discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Money>,

    /// Marks the product as a bestseller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hit: Option<bool>,

    /// Image reference: a remote URL or an inline `data:` payload.
    pub image: String,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Human-readable growth window, e.g. "7-10 days".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_time: Option<String>,

    /// Purchasable variants. When present, a cart line for this product
    /// must reference one of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<ProductVariant>>,

    /// Physical dimensions, e.g. "10 x 20 x 30 cm".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,

    /// Bundled hardware disclosure - non-owning references into the
    /// equipment records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment_ids: Vec<String>,
}

impl Product {
    /// Looks up a variant by id.
    pub fn variant(&self, variant_id: &str) -> Option<&ProductVariant> {
        self.variants
            .as_deref()
            .and_then(|vs| vs.iter().find(|v| v.id == variant_id))
    }

    /// Returns whether the product defines variants.
    pub fn has_variants(&self) -> bool {
        self.variants.as_deref().is_some_and(|vs| !vs.is_empty())
    }

    /// Resolves the unit price for a (possibly variant-qualified) purchase.
    ///
    /// ## Invariant
    /// If the product defines variants, a variant id that exists in the
    /// list is required; otherwise the stored base price applies and any
    /// variant id is rejected as unknown.
    pub fn unit_price(&self, variant_id: Option<&str>) -> CoreResult<Money> {
        if self.has_variants() {
            let variant_id = variant_id.ok_or_else(|| CoreError::VariantRequired {
                product_id: self.id.clone(),
            })?;
            let variant = self
                .variant(variant_id)
                .ok_or_else(|| CoreError::VariantNotFound {
                    product_id: self.id.clone(),
                    variant_id: variant_id.to_string(),
                })?;
            Ok(variant.price)
        } else {
            match variant_id {
                Some(variant_id) => Err(CoreError::VariantNotFound {
                    product_id: self.id.clone(),
                    variant_id: variant_id.to_string(),
                }),
                None => Ok(self.price),
            }
        }
    }
}

// =============================================================================
// Equipment
// =============================================================================

/// A hardware record: lights, pumps, sensors, power modules.
///
/// Referenced by id from [`Product::equipment_ids`]; the relation is
/// non-owning and equipment records outlive any product that points at
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub price: Money,
    /// Purpose tag used for iconography and bundled-hardware disclosure.
    pub purpose: String,
    pub description: String,
    /// Image reference: a remote URL or an inline `data:` payload.
    pub image: String,
    /// Free-form consumption figure, e.g. "15 W".
    pub power_consumption: String,
    /// Free-form rating figure, e.g. "1200 lm".
    pub power_rating: String,
}

// =============================================================================
// Review
// =============================================================================

/// A customer review, optionally attached to a specific product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Star rating, 1-5.
    pub rating: u8,
    pub comment: String,
    #[ts(as = "String")]
    pub date: chrono::DateTime<chrono::Utc>,
}

// =============================================================================
// User
// =============================================================================

/// Session role. Carried as plain data; the admin surface checks it before
/// invoking catalog mutations or order transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    User,
    Admin,
}

/// The signed-in user of the single active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    /// Display name, derived from the email local-part.
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// Checks whether the session carries the admin role.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_product() -> Product {
        Product {
            id: "seed-001".to_string(),
            name: "Madras Pea Seeds".to_string(),
            description: "Sweet, crunchy shoots".to_string(),
            details: String::new(),
            price: Money::from_units(150),
            old_price: None,
            is_hit: None,
            image: "https://example.com/peas.jpg".to_string(),
            category: Category::Seeds,
            difficulty: None,
            growth_time: None,
            variants: Some(vec![
                ProductVariant {
                    id: "50g".to_string(),
                    name: "50 g".to_string(),
                    price: Money::from_units(150),
                },
                ProductVariant {
                    id: "100g".to_string(),
                    name: "100 g".to_string(),
                    price: Money::from_units(280),
                },
            ]),
            dimensions: None,
            equipment_ids: Vec::new(),
        }
    }

    #[test]
    fn test_unit_price_resolves_variant() {
        let product = seed_product();
        assert_eq!(product.unit_price(Some("100g")).unwrap().units(), 280);
    }

    #[test]
    fn test_unit_price_requires_variant_when_present() {
        let product = seed_product();
        assert!(matches!(
            product.unit_price(None),
            Err(CoreError::VariantRequired { .. })
        ));
        assert!(matches!(
            product.unit_price(Some("9kg")),
            Err(CoreError::VariantNotFound { .. })
        ));
    }

    #[test]
    fn test_unit_price_without_variants() {
        let mut product = seed_product();
        product.variants = None;
        assert_eq!(product.unit_price(None).unwrap().units(), 150);
        assert!(product.unit_price(Some("50g")).is_err());
    }

    #[test]
    fn test_product_serde_round_trip() {
        let product = seed_product();
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);

        // Optional fields that are absent stay absent on the wire
        assert!(!json.contains("oldPrice"));
        assert!(json.contains("\"variants\""));
    }

    #[test]
    fn test_role_serde_shape() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Category::Accessories).unwrap(),
            "\"accessories\""
        );
    }
}
