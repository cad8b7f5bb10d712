//! Built-in Vega robot family.
//!
//! Three hardware revisions (`vega_1`, `vega_1p` pro, `vega_1u` upper body),
//! each with a bare, an F5D6-hand and a gripper variant. Each config only
//! carries the sensors its revision is fitted with, see
//! [`SENSOR_EXCLUSIONS`](crate::modifier::SENSOR_EXCLUSIONS).

use crate::component::{ComponentConfig, Side};
use crate::error::Result;
use crate::hand::{HandConfig, HandModel};
use crate::modifier::filter_sensors;
use crate::named_map::NamedMap;
use crate::registry::VariantRegistry;
use crate::robot::RobotConfig;
use crate::sensor::SensorConfig;

pub const VEGA_ABBR: &str = "vg";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Body {
    /// Arms, head, torso and wheeled chassis.
    Full,
    /// Arms and head on a fixed mount.
    Upper,
}

fn vega_components(body: Body, hand: Option<HandModel>) -> NamedMap<ComponentConfig> {
    let mut components = NamedMap::new();
    for side in Side::BILATERAL {
        components.insert(side.component_key("arm"), ComponentConfig::arm(side));
    }
    if body == Body::Full {
        components.insert("torso", ComponentConfig::torso());
        components.insert("chassis", ComponentConfig::chassis());
    }
    components.insert("head", ComponentConfig::head());
    if let Some(model) = hand {
        for side in Side::BILATERAL {
            components.insert(
                side.component_key("hand"),
                ComponentConfig::hand(HandConfig::new(side, model)),
            );
        }
    }
    if body == Body::Full {
        components.insert("battery", ComponentConfig::battery());
    }
    components.insert("estop", ComponentConfig::estop());
    components.insert("heartbeat", ComponentConfig::heartbeat());
    components
}

fn vega_sensors(wrist_cameras: bool) -> NamedMap<SensorConfig> {
    let mut sensors: NamedMap<SensorConfig> = [
        ("head_camera", SensorConfig::zed_x("head_camera")),
        ("head_imu", SensorConfig::zed_imu("head_camera")),
        ("chassis_imu", SensorConfig::chassis_imu()),
        ("front_lidar", SensorConfig::rplidar("rplidar")),
        ("front_lidar_3d", SensorConfig::lidar_3d("lidar_3d_front")),
        ("ultrasonic", SensorConfig::ultrasonic()),
    ]
    .into_iter()
    .collect();
    if wrist_cameras {
        for side in Side::BILATERAL {
            sensors.insert(
                side.component_key("wrist_camera"),
                SensorConfig::zed_x_one(side),
            );
        }
    }
    sensors
}

fn vega_querables() -> NamedMap<String> {
    [
        ("version_info", "info/versions"),
        ("status_info", "info/status"),
        ("hand_info", "info/hand_type"),
        ("reboot", "system/reboot"),
        ("clear_error", "system/clear_error"),
        ("soc_ntp", "time/soc"),
        ("chassis_led", "system/led"),
    ]
    .into_iter()
    .map(|(k, v)| (k, v.to_owned()))
    .collect()
}

fn vega(model: &str, body: Body, hand: Option<HandModel>) -> RobotConfig {
    let urdf_stem = match hand {
        None => model.to_owned(),
        Some(m) if m.is_gripper() => format!("{model}_gripper"),
        Some(_) => format!("{model}_f5d6"),
    };
    let mut config = RobotConfig {
        robot_model: model.to_owned(),
        abbr: VEGA_ABBR.to_owned(),
        urdf_path: format!("robots/humanoid/{model}/{urdf_stem}.urdf"),
        components: vega_components(body, hand),
        sensors: vega_sensors(hand.is_some_and(HandModel::is_gripper)),
        querables: vega_querables(),
    };
    filter_sensors(&mut config);
    config
}

/// Vega-1 base, no hands.
pub fn vega_1() -> RobotConfig {
    vega("vega_1", Body::Full, None)
}

pub fn vega_1_f5d6() -> RobotConfig {
    vega("vega_1", Body::Full, Some(HandModel::F5D6V2))
}

/// Vega-1 with D-grippers and wrist cameras.
pub fn vega_1_gripper() -> RobotConfig {
    vega("vega_1", Body::Full, Some(HandModel::DexDGripper))
}

/// Vega-1 Pro base, no hands.
pub fn vega_1p() -> RobotConfig {
    vega("vega_1p", Body::Full, None)
}

pub fn vega_1p_f5d6() -> RobotConfig {
    vega("vega_1p", Body::Full, Some(HandModel::F5D6V2))
}

pub fn vega_1p_gripper() -> RobotConfig {
    vega("vega_1p", Body::Full, Some(HandModel::DexDGripper))
}

/// Vega-1 upper body, no hands.
pub fn vega_1u() -> RobotConfig {
    vega("vega_1u", Body::Upper, None)
}

pub fn vega_1u_f5d6() -> RobotConfig {
    vega("vega_1u", Body::Upper, Some(HandModel::F5D6V2))
}

pub fn vega_1u_gripper() -> RobotConfig {
    vega("vega_1u", Body::Upper, Some(HandModel::DexDGripper))
}

impl VariantRegistry {
    /// Registers the built-in Vega variants, in family order.
    pub fn register_builtin_variants(&mut self) -> Result<()> {
        let mappings: [(&str, fn() -> RobotConfig); 9] = [
            ("vega_1", vega_1),
            ("vega_1_f5d6", vega_1_f5d6),
            ("vega_1_gripper", vega_1_gripper),
            ("vega_1p", vega_1p),
            ("vega_1p_f5d6", vega_1p_f5d6),
            ("vega_1p_gripper", vega_1p_gripper),
            ("vega_1u", vega_1u),
            ("vega_1u_f5d6", vega_1u_f5d6),
            ("vega_1u_gripper", vega_1u_gripper),
        ];

        for (name, factory) in mappings {
            self.register(name, factory)?;
        }
        Ok(())
    }

    /// A registry holding only the built-in variants.
    pub fn with_builtin_variants() -> Result<Self> {
        let mut registry = Self::new();
        registry.register_builtin_variants()?;
        Ok(registry)
    }
}
