//! # Custom Kit Configuration
//!
//! The mutable, in-progress custom-kit specification plus its validation
//! and dependency rules.
//!
//! ## Auto Mode
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Auto-Mode Resolution                             │
//! │                                                                     │
//! │  Every configuration write flows through resolve():                 │
//! │                                                                     │
//! │  set_layout(..) ─┐                                                  │
//! │  set_feature(..) ├──► mutate field ──► resolve()                    │
//! │  set_auto_mode() ┘                        │                         │
//! │                                           ▼                         │
//! │              auto_mode == true?  ──yes──► force controller, temp,   │
//! │                     │                     humidity + light sensors, │
//! │                     no                    fan, light, pump ON       │
//! │                     ▼                                               │
//! │              leave flags as-is (disabling auto mode reverts         │
//! │              nothing - the rule is enable-only)                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Making the rule an explicit derivation pass (instead of a hidden
//! mutation reaction) keeps it visible, testable and extensible.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Category, Product};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Option Enums
// =============================================================================

/// Growing substrate placed in each tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Substrate {
    Coco,
    Linen,
    Wool,
}

/// Lid style. Encodes two independent booleans (domed vs flat, vented vs
/// sealed) in one tag, matching the persisted shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LidType {
    #[serde(rename = "flat")]
    Flat,
    #[serde(rename = "flat-vent")]
    FlatVent,
    #[serde(rename = "domed")]
    Domed,
    #[serde(rename = "domed-vent")]
    DomedVent,
}

impl LidType {
    fn from_parts(domed: bool, vented: bool) -> Self {
        match (domed, vented) {
            (false, false) => LidType::Flat,
            (false, true) => LidType::FlatVent,
            (true, false) => LidType::Domed,
            (true, true) => LidType::DomedVent,
        }
    }

    /// Whether the lid is domed (taller stacking, higher-mounted light).
    #[inline]
    pub fn is_domed(self) -> bool {
        matches!(self, LidType::Domed | LidType::DomedVent)
    }

    /// Whether the lid has ventilation openings.
    #[inline]
    pub fn is_vented(self) -> bool {
        matches!(self, LidType::FlatVent | LidType::DomedVent)
    }

    /// Returns the lid with dome-ness changed and vent-ness preserved.
    #[must_use]
    pub fn with_domed(self, domed: bool) -> Self {
        LidType::from_parts(domed, self.is_vented())
    }

    /// Returns the lid with vent-ness changed and dome-ness preserved.
    #[must_use]
    pub fn with_vented(self, vented: bool) -> Self {
        LidType::from_parts(self.is_domed(), vented)
    }
}

/// Number and arrangement of physical grow units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Layout {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "double-h")]
    DoubleH,
    #[serde(rename = "double-v")]
    DoubleV,
    #[serde(rename = "quad")]
    Quad,
}

impl Layout {
    /// How many physical units the layout produces.
    #[inline]
    pub fn unit_multiplier(self) -> u32 {
        match self {
            Layout::Single => 1,
            Layout::DoubleH | Layout::DoubleV => 2,
            Layout::Quad => 4,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Layout::Single => "single",
            Layout::DoubleH => "double-h",
            Layout::DoubleV => "double-v",
            Layout::Quad => "quad",
        };
        f.write_str(tag)
    }
}

/// Power source for the assembled farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PowerType {
    Grid,
    Battery,
    Mixed,
    None,
}

/// Add-on feature toggles of a configuration.
///
/// Each feature maps to one boolean flag on [`CustomKitConfig`] and one
/// fixed pricing surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Feature {
    Light,
    Fan,
    Pump,
    Heater,
    TempSensor,
    HumiditySensor,
    LightSensor,
    Timer,
    Controller,
    Camera,
    Music,
}

/// The features auto mode forces on, in resolution order.
pub const AUTO_MODE_FEATURES: [Feature; 7] = [
    Feature::Controller,
    Feature::TempSensor,
    Feature::HumiditySensor,
    Feature::LightSensor,
    Feature::Fan,
    Feature::Light,
    Feature::Pump,
];

// =============================================================================
// CustomKitConfig
// =============================================================================

/// The in-progress specification of a custom buildable kit.
///
/// Owned exclusively by the active builder session; committed to the cart
/// as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomKitConfig {
    /// Tray color value (CSS hex string).
    pub tray_color: String,
    pub substrate: Substrate,
    /// Selected seed product ids. A set: order irrelevant, duplicates
    /// impossible.
    pub seeds: BTreeSet<String>,
    pub lid_type: LidType,
    pub layout: Layout,
    pub power_type: PowerType,
    pub has_light: bool,
    pub has_fan: bool,
    pub has_pump: bool,
    pub has_heater: bool,
    pub has_temp_sensor: bool,
    pub has_humidity_sensor: bool,
    pub has_light_sensor: bool,
    pub has_timer: bool,
    pub has_controller: bool,
    pub has_camera: bool,
    pub has_music: bool,
    /// When true, auto mode is the authority over the dependent flags in
    /// [`AUTO_MODE_FEATURES`].
    pub auto_mode: bool,
}

impl Default for CustomKitConfig {
    /// The builder's starting configuration: a bare single unit.
    fn default() -> Self {
        CustomKitConfig {
            tray_color: "#e2e8f0".to_string(),
            substrate: Substrate::Linen,
            seeds: BTreeSet::new(),
            lid_type: LidType::Flat,
            layout: Layout::Single,
            power_type: PowerType::Grid,
            has_light: false,
            has_fan: false,
            has_pump: false,
            has_heater: false,
            has_temp_sensor: false,
            has_humidity_sensor: false,
            has_light_sensor: false,
            has_timer: false,
            has_controller: false,
            has_camera: false,
            has_music: false,
            auto_mode: false,
        }
    }
}

impl CustomKitConfig {
    /// Reads one feature flag.
    pub fn feature(&self, feature: Feature) -> bool {
        *self.feature_slot(feature)
    }

    fn feature_slot(&self, feature: Feature) -> &bool {
        match feature {
            Feature::Light => &self.has_light,
            Feature::Fan => &self.has_fan,
            Feature::Pump => &self.has_pump,
            Feature::Heater => &self.has_heater,
            Feature::TempSensor => &self.has_temp_sensor,
            Feature::HumiditySensor => &self.has_humidity_sensor,
            Feature::LightSensor => &self.has_light_sensor,
            Feature::Timer => &self.has_timer,
            Feature::Controller => &self.has_controller,
            Feature::Camera => &self.has_camera,
            Feature::Music => &self.has_music,
        }
    }

    fn feature_slot_mut(&mut self, feature: Feature) -> &mut bool {
        match feature {
            Feature::Light => &mut self.has_light,
            Feature::Fan => &mut self.has_fan,
            Feature::Pump => &mut self.has_pump,
            Feature::Heater => &mut self.has_heater,
            Feature::TempSensor => &mut self.has_temp_sensor,
            Feature::HumiditySensor => &mut self.has_humidity_sensor,
            Feature::LightSensor => &mut self.has_light_sensor,
            Feature::Timer => &mut self.has_timer,
            Feature::Controller => &mut self.has_controller,
            Feature::Camera => &mut self.has_camera,
            Feature::Music => &mut self.has_music,
        }
    }

    /// Number of active feature flags (pricing monotonicity hook).
    pub fn active_feature_count(&self) -> usize {
        Feature::ALL.iter().filter(|f| self.feature(**f)).count()
    }

    /// The auto-mode derivation pass.
    ///
    /// Invoked after every configuration write. While `auto_mode` is on,
    /// the dependent flags are held true; the rule is enable-only and
    /// idempotent, so re-running it is always safe and disabling auto
    /// mode reverts nothing.
    pub fn resolve(&mut self) {
        if self.auto_mode {
            for feature in AUTO_MODE_FEATURES {
                *self.feature_slot_mut(feature) = true;
            }
        }
    }
}

impl Feature {
    /// Every feature, in display order.
    pub const ALL: [Feature; 11] = [
        Feature::Light,
        Feature::Fan,
        Feature::Pump,
        Feature::Heater,
        Feature::TempSensor,
        Feature::HumiditySensor,
        Feature::LightSensor,
        Feature::Timer,
        Feature::Controller,
        Feature::Camera,
        Feature::Music,
    ];
}

// =============================================================================
// KitBuilder
// =============================================================================

/// The builder session: an in-progress configuration plus the set of seed
/// ids it may legally reference.
///
/// All mutation goes through the setters below, so every write ends with
/// the auto-mode derivation pass and invalid writes leave the
/// configuration untouched.
#[derive(Debug, Clone)]
pub struct KitBuilder {
    config: CustomKitConfig,
    seed_ids: BTreeSet<String>,
}

impl KitBuilder {
    /// Creates a builder session over the given seed catalog.
    pub fn new(seed_catalog: &[Product]) -> Self {
        let seed_ids = seed_catalog
            .iter()
            .filter(|p| p.category == Category::Seeds)
            .map(|p| p.id.clone())
            .collect();
        KitBuilder {
            config: CustomKitConfig::default(),
            seed_ids,
        }
    }

    /// Creates a builder session from a plain set of valid seed ids.
    pub fn with_seed_ids<I>(seed_ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        KitBuilder {
            config: CustomKitConfig::default(),
            seed_ids: seed_ids.into_iter().collect(),
        }
    }

    /// The current configuration.
    pub fn config(&self) -> &CustomKitConfig {
        &self.config
    }

    /// Consumes the session, returning the configuration snapshot.
    pub fn into_config(self) -> CustomKitConfig {
        self.config
    }

    /// Live price of the current configuration.
    pub fn price(&self) -> Money {
        crate::pricing::price(&self.config)
    }

    pub fn set_tray_color(&mut self, color: impl Into<String>) {
        self.config.tray_color = color.into();
        self.config.resolve();
    }

    pub fn set_substrate(&mut self, substrate: Substrate) {
        self.config.substrate = substrate;
        self.config.resolve();
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.config.layout = layout;
        self.config.resolve();
    }

    pub fn set_power_type(&mut self, power_type: PowerType) {
        self.config.power_type = power_type;
        self.config.resolve();
    }

    /// Changes the lid's dome-ness, preserving vent-ness.
    pub fn set_domed(&mut self, domed: bool) {
        self.config.lid_type = self.config.lid_type.with_domed(domed);
        self.config.resolve();
    }

    /// Changes the lid's vent-ness, preserving dome-ness.
    pub fn set_vented(&mut self, vented: bool) {
        self.config.lid_type = self.config.lid_type.with_vented(vented);
        self.config.resolve();
    }

    pub fn set_feature(&mut self, feature: Feature, enabled: bool) {
        *self.config.feature_slot_mut(feature) = enabled;
        self.config.resolve();
    }

    pub fn set_auto_mode(&mut self, enabled: bool) {
        self.config.auto_mode = enabled;
        self.config.resolve();
    }

    /// Adds a seed selection. Unknown seed ids are rejected and the
    /// configuration is left unchanged.
    pub fn add_seed(&mut self, seed_id: &str) -> CoreResult<()> {
        if !self.seed_ids.contains(seed_id) {
            return Err(CoreError::UnknownSeed(seed_id.to_string()));
        }
        self.config.seeds.insert(seed_id.to_string());
        self.config.resolve();
        Ok(())
    }

    /// Removes a seed selection; removing an absent id is a no-op.
    pub fn remove_seed(&mut self, seed_id: &str) {
        self.config.seeds.remove(seed_id);
        self.config.resolve();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
