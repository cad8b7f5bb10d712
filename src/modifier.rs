//! Runtime adjustments applied to a freshly built config before it is exposed.
//!
//! [`RuntimeOverrides::apply`] consumes a config and returns the adjusted one.
//! It runs in a fixed order: e-stop/heartbeat toggles, sensor filtering,
//! detected hand types, then end-effector auto-detection for slots left on
//! [`HandModel::Auto`]. The registry is never touched; each call works on its
//! own instance.

use crate::component::{ComponentConfig, ComponentKind, Side};
use crate::env::EnvSnapshot;
use crate::error::{Error, Result};
use crate::hand::{HandConfig, HandModel, HandType};
use crate::robot::RobotConfig;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Sensors physically absent on a hardware revision, keyed by robot model.
pub const SENSOR_EXCLUSIONS: &[(&str, &[&str])] = &[
    ("vega_1", &["front_lidar_3d"]),
    ("vega_1p", &["front_lidar"]),
    (
        "vega_1u",
        &[
            "head_imu",
            "chassis_imu",
            "front_lidar",
            "front_lidar_3d",
            "ultrasonic",
        ],
    ),
];

/// Sensors excluded for `robot_model`. Empty for models without an entry.
pub fn excluded_sensors(robot_model: &str) -> &'static [&'static str] {
    SENSOR_EXCLUSIONS
        .iter()
        .find(|(model, _)| *model == robot_model)
        .map(|(_, sensors)| *sensors)
        .unwrap_or(&[])
}

/// Reads the hand type implied by the URDF file stem (`*_f5d6`, `*_gripper`).
pub fn static_hand_indicator(urdf_path: &str, side: Side) -> Result<HandType> {
    let stem = Path::new(urdf_path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let fail = |reason: String| Error::HandDetection {
        side: side.as_str().to_owned(),
        reason,
    };

    match (stem.contains("f5d6"), stem.contains("gripper")) {
        (true, false) => Ok(HandType::HandF5D6V2),
        (false, true) => Ok(HandType::DexGripper),
        (true, true) => Err(fail(format!(
            "URDF '{urdf_path}' names both an F5D6 hand and a gripper"
        ))),
        (false, false) => Err(fail(format!(
            "no end-effector detected at runtime and URDF '{urdf_path}' carries no end-effector indicator"
        ))),
    }
}

/// Runtime inputs that adjust a resolved config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeOverrides {
    /// Hand types reported by the robot controller, per side.
    pub hand_types: BTreeMap<Side, HandType>,
    /// Replace a configured hand that disagrees with the detected type.
    pub enable_hand_type_override: bool,
    pub disable_estop_checking: bool,
    pub disable_heartbeat: bool,
}

impl Default for RuntimeOverrides {
    fn default() -> Self {
        Self {
            hand_types: BTreeMap::new(),
            enable_hand_type_override: true,
            disable_estop_checking: false,
            disable_heartbeat: false,
        }
    }
}

impl RuntimeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up the e-stop and heartbeat switches from the environment.
    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self {
            disable_estop_checking: env.disable_estop_checking,
            disable_heartbeat: env.disable_heartbeat,
            ..Self::default()
        }
    }

    pub fn with_hand_type(mut self, side: Side, hand_type: HandType) -> Self {
        self.hand_types.insert(side, hand_type);
        self
    }

    pub fn with_hand_type_override(mut self, enabled: bool) -> Self {
        self.enable_hand_type_override = enabled;
        self
    }

    /// Applies every adjustment to `config` and returns it.
    pub fn apply(&self, mut config: RobotConfig) -> Result<RobotConfig> {
        self.apply_component_switches(&mut config);
        filter_sensors(&mut config);
        self.apply_detected_hands(&mut config);
        self.resolve_auto_hands(&mut config)?;
        Ok(config)
    }

    fn apply_component_switches(&self, config: &mut RobotConfig) {
        if self.disable_estop_checking
            && let Some(estop) = config.components.get_mut("estop")
        {
            estop.enabled = false;
            warn!("EStop checking is disabled via environment variable");
        }
        if self.disable_heartbeat
            && let Some(heartbeat) = config.components.get_mut("heartbeat")
        {
            heartbeat.enabled = false;
            warn!("Heartbeat is disabled via environment variable");
        }
    }

    fn apply_detected_hands(&self, config: &mut RobotConfig) {
        for (&side, &hand_type) in &self.hand_types {
            if hand_type.is_known()
                && let Some(ComponentConfig {
                    kind: ComponentKind::Arm(arm),
                    ..
                }) = config.components.get_mut(&side.component_key("arm"))
            {
                arm.enable_ee_pass_through = false;
            }

            let key = side.component_key("hand");
            let Some(slot) = config.components.get_mut(&key) else {
                // Nothing configured: inject only what the controller actually reports.
                if let Some(model) = hand_type.default_model() {
                    config.components.insert(
                        key.clone(),
                        ComponentConfig::hand(HandConfig::new(side, model)),
                    );
                    warn!(component = %key, detected = %hand_type, "Auto-adding end-effector config based on runtime detection");
                }
                continue;
            };

            let ComponentKind::Hand(hand) = &slot.kind else {
                warn!(component = %key, kind = slot.kind_name(), "Slot is not an end-effector, skipping detected type");
                continue;
            };
            let Some(configured) = hand.model.hand_type() else {
                // Auto slots are resolved afterwards.
                continue;
            };

            match hand_type.default_model() {
                None => {
                    slot.enabled = false;
                    warn!(component = %key, "Disabling end-effector: no known end-effector reported by the robot controller");
                }
                Some(_) if configured == hand_type => {}
                Some(model) if self.enable_hand_type_override => {
                    *slot = ComponentConfig::hand(HandConfig::new(side, model));
                    warn!(component = %key, configured = %configured, detected = %hand_type, "Overriding end-effector config with detected type");
                }
                Some(_) => {
                    warn!(component = %key, configured = %configured, detected = %hand_type, "Detected end-effector type differs from config");
                }
            }
        }
    }

    fn resolve_auto_hands(&self, config: &mut RobotConfig) -> Result<()> {
        for side in Side::BILATERAL {
            let key = side.component_key("hand");
            let Some(ComponentConfig {
                enabled,
                kind: ComponentKind::Hand(hand),
            }) = config.components.get(&key)
            else {
                continue;
            };
            if hand.model != HandModel::Auto {
                continue;
            }
            let (enabled, pv_mode) = (*enabled, hand.pv_mode);

            let hand_type = match self.hand_types.get(&side).copied().filter(|t| t.is_known()) {
                Some(detected) => detected,
                None => static_hand_indicator(&config.urdf_path, side)?,
            };
            let model = hand_type.default_model().ok_or_else(|| Error::HandDetection {
                side: side.as_str().to_owned(),
                reason: format!("no sub-config for detected type {hand_type}"),
            })?;

            debug!(component = %key, detected = %hand_type, "resolved auto end-effector slot");
            config.components.insert(
                key,
                ComponentConfig {
                    enabled,
                    kind: ComponentKind::Hand(HandConfig {
                        side,
                        pv_mode,
                        model,
                    }),
                },
            );
        }
        Ok(())
    }
}

/// Drops sensors listed in [`SENSOR_EXCLUSIONS`] for the config's model.
pub fn filter_sensors(config: &mut RobotConfig) {
    let excluded = excluded_sensors(&config.robot_model);
    if excluded.is_empty() {
        return;
    }
    config.sensors.retain(|name, _| !excluded.contains(&name));
    debug!(model = %config.robot_model, ?excluded, "filtered sensors");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_hand_indicator() {
        assert_eq!(
            static_hand_indicator("robots/vega_1/vega_1_f5d6.urdf", Side::Left),
            Ok(HandType::HandF5D6V2)
        );
        assert_eq!(
            static_hand_indicator("robots/vega_1/vega_1_gripper.urdf", Side::Right),
            Ok(HandType::DexGripper)
        );
    }

    #[test]
    fn test_static_hand_indicator_reports_end_effector_wording() {
        let err = static_hand_indicator("robots/vega_1/vega_1.urdf", Side::Left).unwrap_err();
        assert!(matches!(err, Error::HandDetection { .. }));
        let msg = err.to_string();
        assert!(msg.contains("End-effector detection"), "{msg}");
        assert!(!msg.to_lowercase().contains("hand detection"), "{msg}");
    }

    #[test]
    fn test_excluded_sensors_unknown_model_is_empty() {
        assert!(excluded_sensors("prototype_7").is_empty());
        assert!(excluded_sensors("vega_1u").contains(&"chassis_imu"));
    }
}
