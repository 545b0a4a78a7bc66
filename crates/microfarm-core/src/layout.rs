//! # Layout Composer
//!
//! Turns a configuration into a tree of positioned physical units and
//! connectors. Pure and geometry-agnostic: the output is abstract 3D
//! offsets, never renderable primitives - the rendering collaborator owns
//! materials, cameras and lighting.
//!
//! ## Composition Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  single    [U]                 one unit at the origin               │
//! │                                                                     │
//! │  double-h  [U]──b──[U]         side by side, bridge at midpoint     │
//! │                                                                     │
//! │  double-v  [U]                 stacked; pitch depends on lid dome   │
//! │            ║║║║  four struts   (domed lids stack taller)            │
//! │            [U]                                                      │
//! │                                                                     │
//! │  quad      double-h of two double-v stacks, plus bridges joining    │
//! │            the stacks at the base and the top level                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stacking rule is a single helper reused by `double-v` and `quad`,
//! so a new layout variant only has to arrange existing sub-assemblies.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::{CustomKitConfig, Layout, PowerType};

// =============================================================================
// Placement Constants
// =============================================================================

/// Horizontal offset of each unit (or stack) from the assembly center in
/// side-by-side arrangements.
pub const ROW_OFFSET_X: f32 = 2.1;

/// Vertical pitch between stacked units under a flat lid.
pub const STACK_PITCH_FLAT: f32 = 2.5;

/// Vertical pitch between stacked units under a domed lid - the dome adds
/// height, so stacks sit taller.
pub const STACK_PITCH_DOMED: f32 = 3.5;

/// Base elevation of stacked assemblies (keeps the stack centered).
pub const STACK_BASE_Y: f32 = -1.5;

/// Support struts land at the four corners of a stacked pair.
const STRUT_X: f32 = 1.9;
const STRUT_Z: f32 = 1.4;

// =============================================================================
// Output Types
// =============================================================================

/// An abstract offset in assembly space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    /// Component-wise translation.
    #[must_use]
    pub fn translated(self, by: Vec3) -> Self {
        Vec3::new(self.x + by.x, self.y + by.y, self.z + by.z)
    }
}

/// A module mounted inside a unit, at a fixed offset relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
#[ts(export)]
pub enum AttachmentKind {
    LightBar,
    /// Support posts carrying the light bar over a flat lid.
    LightPost,
    LightSensor,
    Fan,
    Pump,
    Heater,
    TempSensor,
    HumiditySensor,
    /// Wall display shown whenever any climate sensor is fitted.
    SensorDisplay,
    Camera,
    MusicBox,
    Controller,
    Timer,
    BatteryPack,
    Vent { radius: f32 },
}

/// One attachment placement inside a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Attachment {
    pub kind: AttachmentKind,
    /// Offset relative to the owning unit.
    pub offset: Vec3,
}

/// A positioned physical grow unit with its conditional attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UnitPlacement {
    /// Offset of the unit within the assembly.
    pub offset: Vec3,
    pub attachments: Vec<Attachment>,
}

/// Structural connector between units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
#[ts(export)]
pub enum ConnectorKind {
    /// Horizontal coupler joining side-by-side units or stacks.
    Bridge,
    /// Vertical support carrying a stacked unit; length equals the
    /// stacking pitch.
    Strut { length: f32 },
}

/// One connector placement within the assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Connector {
    pub kind: ConnectorKind,
    pub offset: Vec3,
}

/// The composed assembly: every unit and connector, positioned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Assembly {
    pub units: Vec<UnitPlacement>,
    pub connectors: Vec<Connector>,
}

impl Assembly {
    fn merge(&mut self, other: Assembly) {
        self.units.extend(other.units);
        self.connectors.extend(other.connectors);
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Stacking pitch for the configuration's lid.
pub fn stack_pitch(config: &CustomKitConfig) -> f32 {
    if config.lid_type.is_domed() {
        STACK_PITCH_DOMED
    } else {
        STACK_PITCH_FLAT
    }
}

/// Composes the full assembly for a configuration.
pub fn compose(config: &CustomKitConfig) -> Assembly {
    match config.layout {
        Layout::Single => Assembly {
            units: vec![unit(config, Vec3::ORIGIN)],
            connectors: Vec::new(),
        },
        Layout::DoubleH => Assembly {
            units: vec![
                unit(config, Vec3::new(-ROW_OFFSET_X, 0.0, 0.0)),
                unit(config, Vec3::new(ROW_OFFSET_X, 0.0, 0.0)),
            ],
            connectors: vec![Connector {
                kind: ConnectorKind::Bridge,
                offset: Vec3::ORIGIN,
            }],
        },
        Layout::DoubleV => stack(config, Vec3::new(0.0, STACK_BASE_Y, 0.0)),
        Layout::Quad => {
            // double-h of two double-v stacks
            let pitch = stack_pitch(config);
            let mut assembly = stack(config, Vec3::new(-ROW_OFFSET_X, STACK_BASE_Y, 0.0));
            assembly.merge(stack(config, Vec3::new(ROW_OFFSET_X, STACK_BASE_Y, 0.0)));
            // bridges joining the stacks at the base and the top level
            assembly.connectors.push(Connector {
                kind: ConnectorKind::Bridge,
                offset: Vec3::new(0.0, STACK_BASE_Y, 0.0),
            });
            assembly.connectors.push(Connector {
                kind: ConnectorKind::Bridge,
                offset: Vec3::new(0.0, STACK_BASE_Y + pitch, 0.0),
            });
            assembly
        }
    }
}

/// The stacked-pair building block: two units separated by the stacking
/// pitch, carried on four corner struts.
fn stack(config: &CustomKitConfig, base: Vec3) -> Assembly {
    let pitch = stack_pitch(config);
    let units = vec![
        unit(config, base),
        unit(config, base.translated(Vec3::new(0.0, pitch, 0.0))),
    ];

    let mut connectors = Vec::with_capacity(4);
    for sx in [-STRUT_X, STRUT_X] {
        for sz in [-STRUT_Z, STRUT_Z] {
            connectors.push(Connector {
                kind: ConnectorKind::Strut { length: pitch },
                offset: base.translated(Vec3::new(sx, pitch / 2.0 - 0.5, sz)),
            });
        }
    }

    Assembly { units, connectors }
}

/// Places one unit and its conditional attachments.
///
/// Two placements are environment-sensitive: the light mounts higher over
/// a domed lid, and vent position/radius differ between dome and flat.
fn unit(config: &CustomKitConfig, offset: Vec3) -> UnitPlacement {
    let domed = config.lid_type.is_domed();
    let mut attachments = Vec::new();

    let mut attach = |kind: AttachmentKind, offset: Vec3| {
        attachments.push(Attachment { kind, offset });
    };

    if config.has_heater {
        attach(AttachmentKind::Heater, Vec3::new(0.0, 0.2, 0.0));
    }

    if config.has_light {
        let light_y = if domed { 3.5 } else { 2.5 };
        attach(AttachmentKind::LightBar, Vec3::new(0.0, light_y, 0.0));
        if !domed {
            // flat lids need posts to carry the bar
            attach(AttachmentKind::LightPost, Vec3::new(-1.8, light_y - 0.75, 0.0));
            attach(AttachmentKind::LightPost, Vec3::new(1.8, light_y - 0.75, 0.0));
        }
        if config.has_light_sensor {
            // mounted on the light bar itself
            attach(AttachmentKind::LightSensor, Vec3::new(1.5, light_y - 0.1, 0.0));
        }
    }

    if config.has_timer && !config.has_controller {
        // the controller subsumes the standalone timer
        attach(AttachmentKind::Timer, Vec3::new(2.05, 0.8, 0.0));
    }

    if config.has_controller {
        attach(AttachmentKind::Controller, Vec3::new(-2.1, 0.2, 1.0));
    }

    if config.has_pump {
        attach(AttachmentKind::Pump, Vec3::new(-2.3, -0.5, -0.8));
    }

    if config.has_temp_sensor || config.has_humidity_sensor {
        attach(AttachmentKind::SensorDisplay, Vec3::new(-2.02, 0.4, 0.0));
        if config.has_temp_sensor {
            attach(AttachmentKind::TempSensor, Vec3::new(1.4, 0.7, 0.8));
        }
        if config.has_humidity_sensor {
            attach(AttachmentKind::HumiditySensor, Vec3::new(-1.4, 0.7, 0.8));
        }
    }

    if config.has_camera {
        let camera_y = if domed { 2.8 } else { 1.2 };
        attach(AttachmentKind::Camera, Vec3::new(0.0, camera_y, 0.0));
    }

    if config.has_fan {
        let fan_y = if domed { 1.5 } else { 0.8 };
        attach(AttachmentKind::Fan, Vec3::new(1.5, fan_y, 0.0));
    }

    if config.has_music {
        attach(AttachmentKind::MusicBox, Vec3::new(1.0, -0.2, 1.55));
    }

    if config.power_type == PowerType::Battery {
        attach(AttachmentKind::BatteryPack, Vec3::new(2.1, 0.0, 0.0));
    }

    if config.lid_type.is_vented() {
        let (vent_y, radius, spread) = if domed {
            (1.0, 0.3, 0.8)
        } else {
            (0.1, 0.05, 0.5)
        };
        for wall_x in [-2.01, 2.01] {
            for dz in [-spread, 0.0, spread] {
                attach(
                    AttachmentKind::Vent { radius },
                    Vec3::new(wall_x, vent_y, dz),
                );
            }
        }
    }

    UnitPlacement {
        offset,
        attachments,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Feature, KitBuilder, LidType};

    fn count_kind(assembly: &Assembly, pred: impl Fn(&AttachmentKind) -> bool) -> usize {
        assembly
            .units
            .iter()
            .flat_map(|u| u.attachments.iter())
            .filter(|a| pred(&a.kind))
            .count()
    }

    #[test]
    fn test_single_is_one_unit_at_origin() {
        let config = CustomKitConfig::default();
        let assembly = compose(&config);
        assert_eq!(assembly.units.len(), 1);
        assert_eq!(assembly.units[0].offset, Vec3::ORIGIN);
        assert!(assembly.connectors.is_empty());
    }

    #[test]
    fn test_double_h_bridge_at_midpoint() {
        let mut config = CustomKitConfig::default();
        config.layout = Layout::DoubleH;
        let assembly = compose(&config);

        assert_eq!(assembly.units.len(), 2);
        assert_eq!(assembly.units[0].offset.x, -ROW_OFFSET_X);
        assert_eq!(assembly.units[1].offset.x, ROW_OFFSET_X);
        assert_eq!(assembly.connectors.len(), 1);
        assert_eq!(assembly.connectors[0].kind, ConnectorKind::Bridge);
        assert_eq!(assembly.connectors[0].offset, Vec3::ORIGIN);
    }

    #[test]
    fn test_double_v_pitch_follows_lid_dome() {
        let mut config = CustomKitConfig::default();
        config.layout = Layout::DoubleV;

        let flat = compose(&config);
        let dy = flat.units[1].offset.y - flat.units[0].offset.y;
        assert_eq!(dy, STACK_PITCH_FLAT);

        config.lid_type = LidType::Domed;
        let domed = compose(&config);
        let dy = domed.units[1].offset.y - domed.units[0].offset.y;
        assert_eq!(dy, STACK_PITCH_DOMED);
    }

    #[test]
    fn test_double_v_has_four_struts() {
        let mut config = CustomKitConfig::default();
        config.layout = Layout::DoubleV;
        let assembly = compose(&config);

        let struts: Vec<_> = assembly
            .connectors
            .iter()
            .filter(|c| matches!(c.kind, ConnectorKind::Strut { .. }))
            .collect();
        assert_eq!(struts.len(), 4);
        for strut in struts {
            assert_eq!(strut.kind, ConnectorKind::Strut { length: STACK_PITCH_FLAT });
        }
    }

    #[test]
    fn test_quad_is_two_stacks_plus_bridges() {
        let mut config = CustomKitConfig::default();
        config.layout = Layout::Quad;
        let assembly = compose(&config);

        assert_eq!(assembly.units.len(), 4);
        let struts = assembly
            .connectors
            .iter()
            .filter(|c| matches!(c.kind, ConnectorKind::Strut { .. }))
            .count();
        let bridges = assembly
            .connectors
            .iter()
            .filter(|c| c.kind == ConnectorKind::Bridge)
            .count();
        assert_eq!(struts, 8);
        assert_eq!(bridges, 2);

        // bridges sit at the base level and one pitch above it
        let bridge_ys: Vec<f32> = assembly
            .connectors
            .iter()
            .filter(|c| c.kind == ConnectorKind::Bridge)
            .map(|c| c.offset.y)
            .collect();
        assert!(bridge_ys.contains(&STACK_BASE_Y));
        assert!(bridge_ys.contains(&(STACK_BASE_Y + STACK_PITCH_FLAT)));
    }

    #[test]
    fn test_quad_reuses_stack_rule() {
        // A quad must be exactly two double-v stacks shifted sideways.
        let mut config = CustomKitConfig::default();
        config.layout = Layout::DoubleV;
        let stack = compose(&config);
        config.layout = Layout::Quad;
        let quad = compose(&config);

        let shifted: Vec<f32> = quad.units.iter().map(|u| u.offset.y).collect();
        for unit in &stack.units {
            assert_eq!(shifted.iter().filter(|y| **y == unit.offset.y).count(), 2);
        }
    }

    #[test]
    fn test_light_mounts_higher_on_domed_lids() {
        let mut builder = KitBuilder::with_seed_ids([]);
        builder.set_feature(Feature::Light, true);

        let flat = compose(builder.config());
        let light = flat.units[0]
            .attachments
            .iter()
            .find(|a| a.kind == AttachmentKind::LightBar)
            .unwrap();
        assert_eq!(light.offset.y, 2.5);
        // flat lids carry the bar on two posts
        assert_eq!(count_kind(&flat, |k| *k == AttachmentKind::LightPost), 2);

        builder.set_domed(true);
        let domed = compose(builder.config());
        let light = domed.units[0]
            .attachments
            .iter()
            .find(|a| a.kind == AttachmentKind::LightBar)
            .unwrap();
        assert_eq!(light.offset.y, 3.5);
        assert_eq!(count_kind(&domed, |k| *k == AttachmentKind::LightPost), 0);
    }

    #[test]
    fn test_vents_follow_lid_dome() {
        let mut config = CustomKitConfig::default();
        config.lid_type = LidType::FlatVent;
        let flat = compose(&config);
        assert_eq!(
            count_kind(&flat, |k| matches!(k, AttachmentKind::Vent { radius } if *radius == 0.05)),
            6
        );

        config.lid_type = LidType::DomedVent;
        let domed = compose(&config);
        assert_eq!(
            count_kind(&domed, |k| matches!(k, AttachmentKind::Vent { radius } if *radius == 0.3)),
            6
        );
    }

    #[test]
    fn test_controller_subsumes_timer() {
        let mut config = CustomKitConfig::default();
        config.has_timer = true;
        let assembly = compose(&config);
        assert_eq!(count_kind(&assembly, |k| *k == AttachmentKind::Timer), 1);

        config.has_controller = true;
        let assembly = compose(&config);
        assert_eq!(count_kind(&assembly, |k| *k == AttachmentKind::Timer), 0);
        assert_eq!(count_kind(&assembly, |k| *k == AttachmentKind::Controller), 1);
    }

    #[test]
    fn test_sensor_display_appears_with_any_climate_sensor() {
        let mut config = CustomKitConfig::default();
        config.has_humidity_sensor = true;
        let assembly = compose(&config);
        assert_eq!(count_kind(&assembly, |k| *k == AttachmentKind::SensorDisplay), 1);
        assert_eq!(count_kind(&assembly, |k| *k == AttachmentKind::TempSensor), 0);
    }

    #[test]
    fn test_attachments_repeat_per_unit() {
        let mut config = CustomKitConfig::default();
        config.has_fan = true;
        config.layout = Layout::Quad;
        let assembly = compose(&config);
        assert_eq!(count_kind(&assembly, |k| *k == AttachmentKind::Fan), 4);
    }

    #[test]
    fn test_battery_pack_placement() {
        let mut config = CustomKitConfig::default();
        config.power_type = PowerType::Battery;
        let assembly = compose(&config);
        assert_eq!(count_kind(&assembly, |k| *k == AttachmentKind::BatteryPack), 1);
    }
}
