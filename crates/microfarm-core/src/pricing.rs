//! # Pricing Engine
//!
//! Deterministic pricing for custom kit configurations.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      price(config)                                  │
//! │                                                                     │
//! │  base 1500                                                          │
//! │    + surcharge per active feature flag                              │
//! │    + 1000 when powered by battery                                   │
//! │    = per-unit subtotal                                              │
//! │         │                                                           │
//! │         ▼  × unit multiplier (single 1, double 2, quad 4)           │
//! │    multiplied total                                                 │
//! │         │                                                           │
//! │         ▼  × 0.9 bulk discount, ONLY when multiplier > 1,           │
//! │            applied after multiplication, rounded to whole units     │
//! │    final price                                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog products need no derivation: their price is the stored price,
//! or the selected variant's price (see [`crate::catalog::Product::unit_price`]).

use crate::config::{CustomKitConfig, Feature, PowerType};
use crate::money::Money;

// =============================================================================
// Pricing Constants
// =============================================================================

/// Base price of a single bare unit.
pub const BASE_PRICE: Money = Money::from_units(1500);

/// Surcharge for battery power.
pub const BATTERY_SURCHARGE: Money = Money::from_units(1000);

/// Bulk discount applied to multi-unit layouts, in basis points (10%).
///
/// Uniform for every multiplier above one - two-unit and four-unit
/// layouts get the same factor.
pub const BULK_DISCOUNT_BPS: u32 = 1000;

/// Fixed surcharge per feature flag.
pub const FEATURE_SURCHARGES: [(Feature, Money); 11] = [
    (Feature::Light, Money::from_units(1200)),
    (Feature::Fan, Money::from_units(600)),
    (Feature::Pump, Money::from_units(800)),
    (Feature::Heater, Money::from_units(900)),
    (Feature::TempSensor, Money::from_units(300)),
    (Feature::HumiditySensor, Money::from_units(350)),
    (Feature::LightSensor, Money::from_units(250)),
    (Feature::Timer, Money::from_units(450)),
    (Feature::Controller, Money::from_units(2500)),
    (Feature::Camera, Money::from_units(2000)),
    (Feature::Music, Money::from_units(1800)),
];

/// Looks up the surcharge for one feature.
pub fn feature_surcharge(feature: Feature) -> Money {
    FEATURE_SURCHARGES
        .iter()
        .find(|(f, _)| *f == feature)
        .map(|(_, s)| *s)
        .unwrap_or_else(Money::zero)
}

// =============================================================================
// Price Function
// =============================================================================

/// Prices a configuration. Pure and deterministic: same configuration in,
/// same price out.
pub fn price(config: &CustomKitConfig) -> Money {
    let mut subtotal = BASE_PRICE;

    for (feature, surcharge) in FEATURE_SURCHARGES {
        if config.feature(feature) {
            subtotal += surcharge;
        }
    }

    if config.power_type == PowerType::Battery {
        subtotal += BATTERY_SURCHARGE;
    }

    let multiplier = config.layout.unit_multiplier();
    let total = subtotal.multiply_quantity(multiplier as i64);

    // The discount never applies to a single-unit configuration, and it
    // is applied to the multiplied total, not per unit.
    if multiplier > 1 {
        total.apply_percentage_discount(BULK_DISCOUNT_BPS)
    } else {
        total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;

    #[test]
    fn test_base_config_prices_at_base() {
        let config = CustomKitConfig::default();
        assert_eq!(price(&config), BASE_PRICE);
    }

    #[test]
    fn test_light_surcharge() {
        let mut config = CustomKitConfig::default();
        config.has_light = true;
        assert_eq!(price(&config).units(), 2700); // 1500 + 1200
    }

    #[test]
    fn test_battery_surcharge() {
        let mut config = CustomKitConfig::default();
        config.power_type = PowerType::Battery;
        assert_eq!(price(&config).units(), 2500);
    }

    #[test]
    fn test_quad_applies_bulk_discount_after_multiplication() {
        let mut config = CustomKitConfig::default();
        config.has_light = true;
        config.layout = Layout::Quad;
        // (1500 + 1200) × 4 × 0.9 = 9720
        assert_eq!(price(&config).units(), 9720);
    }

    #[test]
    fn test_double_layouts_share_the_discount_factor() {
        let mut config = CustomKitConfig::default();
        config.layout = Layout::DoubleH;
        assert_eq!(price(&config).units(), 2700); // 1500 × 2 × 0.9

        config.layout = Layout::DoubleV;
        assert_eq!(price(&config).units(), 2700);
    }

    #[test]
    fn test_single_never_discounted() {
        let mut config = CustomKitConfig::default();
        config.has_light = true;
        config.has_controller = true;
        config.layout = Layout::Single;
        // 1500 + 1200 + 2500, no discount factor
        assert_eq!(price(&config).units(), 5200);
    }

    #[test]
    fn test_price_never_below_base() {
        let config = CustomKitConfig::default();
        assert!(price(&config) >= BASE_PRICE);
    }

    #[test]
    fn test_price_monotonic_in_feature_flags() {
        // Holding layout fixed, enabling flags one by one never lowers
        // the price.
        let mut config = CustomKitConfig::default();
        config.layout = Layout::DoubleV;
        let mut last = price(&config);

        let mut builder = crate::config::KitBuilder::with_seed_ids([]);
        builder.set_layout(Layout::DoubleV);
        for feature in Feature::ALL {
            builder.set_feature(feature, true);
            let next = price(builder.config());
            assert!(next >= last, "enabling {feature:?} lowered the price");
            last = next;
        }
    }

    #[test]
    fn test_fully_loaded_quad() {
        let mut builder = crate::config::KitBuilder::with_seed_ids([]);
        for feature in Feature::ALL {
            builder.set_feature(feature, true);
        }
        builder.set_power_type(PowerType::Battery);
        builder.set_layout(Layout::Quad);

        // 1500 + 11150 surcharges + 1000 battery = 13650 per unit
        // 13650 × 4 = 54600, × 0.9 = 49140
        assert_eq!(price(builder.config()).units(), 49_140);
    }
}
