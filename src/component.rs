//! Component configuration records.
//!
//! A component is one actuated or bookkeeping subsystem of a robot (arm, hand,
//! head, torso, chassis, battery, e-stop, heartbeat). Joint names and
//! communication identifiers are derived from the component kind and its
//! [`Side`], so mirroring a bilateral part only ever means flipping `side`.

use crate::error::{Error, Result};
use crate::hand::HandConfig;
use crate::named_map::NamedMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ARM_JOINTS: [&str; 7] = [
    "arm_j1", "arm_j2", "arm_j3", "arm_j4", "arm_j5", "arm_j6", "arm_j7",
];
const HEAD_JOINTS: [&str; 3] = ["head_j1", "head_j2", "head_j3"];
const TORSO_JOINTS: [&str; 3] = ["torso_j1", "torso_j2", "torso_j3"];

/// Sign applied per arm joint when mirroring a left-arm pose onto the right arm.
const ARM_MIRROR_SIGNS: [f32; 7] = [-1.0, -1.0, -1.0, 1.0, -1.0, -1.0, -1.0];

/// Which side of the robot a bilateral component sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    /// Centerline component (head, torso, chassis).
    #[default]
    None,
}

impl Side {
    pub const BILATERAL: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::None => "none",
        }
    }

    /// Joint-name prefix, without the separator.
    pub fn joint_prefix(self) -> Option<&'static str> {
        match self {
            Self::Left => Some("L"),
            Self::Right => Some("R"),
            Self::None => None,
        }
    }

    /// Component table key for a sided part, e.g. `left` + `hand` = `left_hand`.
    pub fn component_key(self, canonical: &str) -> String {
        match self {
            Self::None => canonical.to_owned(),
            side => format!("{}_{canonical}", side.as_str()),
        }
    }

    pub fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefixes each canonical joint name with the side tag (`L_arm_j1`).
pub fn sided_joints(side: Side, canonical: &[&str]) -> Vec<String> {
    canonical
        .iter()
        .map(|name| match side.joint_prefix() {
            Some(prefix) => format!("{prefix}_{name}"),
            None => (*name).to_owned(),
        })
        .collect()
}

/// Appends the side tag as a trailing path segment (`state/arm/left`).
pub fn sided_topic(base: &str, side: Side) -> String {
    match side {
        Side::None => base.to_owned(),
        side => format!("{base}/{side}"),
    }
}

macro_rules! name_tags {
    ($(#[$meta:meta])* $name:ident, $what:literal { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|k| k.as_str() == s)
                    .ok_or_else(|| Error::Config(format!("unknown {} kind '{s}'", $what)))
            }
        }
    };
}

name_tags!(
    /// Publish/subscribe channel a component exposes.
    TopicKind, "topic" {
        State => "state",
        Control => "control",
        Wrench => "wrench",
        WristButton => "wrist_button",
        PassThrough => "pass_through",
        PassThroughState => "pass_through_state",
        TouchSensor => "touch_sensor",
        SteerControl => "steer_control",
        SteerState => "steer_state",
        DriveControl => "drive_control",
        DriveState => "drive_state",
        Heartbeat => "heartbeat",
    }
);

name_tags!(
    /// Request/reply service a component exposes.
    QueryKind, "query" {
        Mode => "mode",
        Pid => "pid",
        Brake => "brake",
        BaudRate => "baud_rate",
        ForceTorqueSensor => "force_torque_sensor",
        Estop => "estop",
    }
);

/// Arm configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmConfig {
    pub side: Side,
    /// Position-velocity control mode flag.
    pub pv_mode: bool,
    pub default_control_hz: u32,
    /// Forward raw end-effector traffic through the arm controller.
    /// Cleared once a concrete hand type is detected.
    pub enable_ee_pass_through: bool,
}

impl ArmConfig {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            pv_mode: false,
            default_control_hz: 100,
            enable_ee_pass_through: true,
        }
    }

    /// Predefined arm poses. Right-arm poses mirror the left-arm table.
    pub fn pose_pool(&self) -> NamedMap<Vec<f32>> {
        let left: [(&str, [f32; 7]); 5] = [
            ("folded", [1.57079, 0.0, 0.0, -3.1, 0.0, 0.0, -0.69813]),
            ("folded_closed_hand", [1.57079, 0.0, 0.0, -3.1, 0.0, 0.0, -0.9]),
            ("L_shape", [0.064, 0.3, 0.0, -1.556, 1.271, 0.0, 0.0]),
            ("lift_up", [0.064, 0.3, 0.0, -2.756, 1.271, 0.0, 0.0]),
            ("zero", [-1.57079, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ];
        left.into_iter()
            .map(|(name, pose)| {
                let pose = match self.side {
                    Side::Right => pose
                        .iter()
                        .zip(ARM_MIRROR_SIGNS)
                        .map(|(q, sign)| q * sign)
                        .collect(),
                    _ => pose.to_vec(),
                };
                (name, pose)
            })
            .collect()
    }
}

/// Head configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadConfig {
    pub pv_mode: bool,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self { pv_mode: true }
    }
}

/// Torso configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TorsoConfig {
    pub pv_mode: bool,
}

impl Default for TorsoConfig {
    fn default() -> Self {
        Self { pv_mode: true }
    }
}

/// Chassis (mobile base) configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChassisConfig {
    pub pv_mode: bool,
    /// Maximum linear velocity (m/s).
    pub max_linear_vel: f32,
    /// Maximum steering angle (rad).
    pub max_steering_angle: f32,
    /// Distance from base center to wheel axis (m).
    pub center_to_wheel_axis_dist: f32,
    /// Distance between the two wheels (m).
    pub wheels_dist: f32,
    pub steer_joints: Vec<String>,
    pub drive_joints: Vec<String>,
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            pv_mode: false,
            max_linear_vel: 0.8,
            max_steering_angle: 2.35,
            center_to_wheel_axis_dist: 0.219,
            wheels_dist: 0.45,
            steer_joints: Side::BILATERAL
                .iter()
                .flat_map(|&side| sided_joints(side, &["wheel_j1"]))
                .collect(),
            drive_joints: Side::BILATERAL
                .iter()
                .flat_map(|&side| sided_joints(side, &["wheel_j2"]))
                .collect(),
        }
    }
}

/// Heartbeat monitor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    pub timeout_seconds: f32,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 1.0,
        }
    }
}

/// The known component kinds, each with its own parameter record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentKind {
    Arm(ArmConfig),
    Hand(HandConfig),
    Head(HeadConfig),
    Torso(TorsoConfig),
    Chassis(ChassisConfig),
    Battery,
    #[serde(rename = "estop")]
    EStop,
    Heartbeat(HeartbeatConfig),
}

/// One entry of a robot's component table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Whether the component is enabled in the configuration.
    pub enabled: bool,
    #[serde(flatten)]
    pub kind: ComponentKind,
}

impl From<ComponentKind> for ComponentConfig {
    fn from(kind: ComponentKind) -> Self {
        Self {
            enabled: true,
            kind,
        }
    }
}

impl ComponentConfig {
    pub fn arm(side: Side) -> Self {
        ComponentKind::Arm(ArmConfig::new(side)).into()
    }

    pub fn hand(hand: HandConfig) -> Self {
        ComponentKind::Hand(hand).into()
    }

    pub fn head() -> Self {
        ComponentKind::Head(HeadConfig::default()).into()
    }

    pub fn torso() -> Self {
        ComponentKind::Torso(TorsoConfig::default()).into()
    }

    pub fn chassis() -> Self {
        ComponentKind::Chassis(ChassisConfig::default()).into()
    }

    pub fn battery() -> Self {
        ComponentKind::Battery.into()
    }

    pub fn estop() -> Self {
        ComponentKind::EStop.into()
    }

    pub fn heartbeat() -> Self {
        ComponentKind::Heartbeat(HeartbeatConfig::default()).into()
    }

    /// Short kind label used in listings and error messages.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ComponentKind::Arm(_) => "arm",
            ComponentKind::Hand(h) if h.model.is_gripper() => "gripper",
            ComponentKind::Hand(_) => "hand",
            ComponentKind::Head(_) => "head",
            ComponentKind::Torso(_) => "torso",
            ComponentKind::Chassis(_) => "chassis",
            ComponentKind::Battery => "battery",
            ComponentKind::EStop => "estop",
            ComponentKind::Heartbeat(_) => "heartbeat",
        }
    }

    pub fn side(&self) -> Side {
        match &self.kind {
            ComponentKind::Arm(arm) => arm.side,
            ComponentKind::Hand(hand) => hand.side,
            _ => Side::None,
        }
    }

    /// Position-velocity mode flag, `None` for kinds without one.
    pub fn pv_mode(&self) -> Option<bool> {
        match &self.kind {
            ComponentKind::Arm(c) => Some(c.pv_mode),
            ComponentKind::Hand(c) => Some(c.pv_mode),
            ComponentKind::Head(c) => Some(c.pv_mode),
            ComponentKind::Torso(c) => Some(c.pv_mode),
            ComponentKind::Chassis(c) => Some(c.pv_mode),
            _ => None,
        }
    }

    /// Ordered joint names. Empty for components without actuated joints.
    pub fn joints(&self) -> Vec<String> {
        match &self.kind {
            ComponentKind::Arm(arm) => sided_joints(arm.side, &ARM_JOINTS),
            ComponentKind::Hand(hand) => hand.joints(),
            ComponentKind::Head(_) => sided_joints(Side::None, &HEAD_JOINTS),
            ComponentKind::Torso(_) => sided_joints(Side::None, &TORSO_JOINTS),
            ComponentKind::Chassis(c) => c
                .steer_joints
                .iter()
                .chain(&c.drive_joints)
                .cloned()
                .collect(),
            ComponentKind::Battery | ComponentKind::EStop | ComponentKind::Heartbeat(_) => {
                Vec::new()
            }
        }
    }

    pub fn dof(&self) -> usize {
        self.joints().len()
    }

    pub fn pose_pool(&self) -> NamedMap<Vec<f32>> {
        match &self.kind {
            ComponentKind::Arm(arm) => arm.pose_pool(),
            ComponentKind::Hand(hand) => hand.pose_pool(),
            ComponentKind::Head(_) => [("home", vec![0.0, 0.0, 0.0]), ("tucked", vec![0.0, 0.0, -1.37])]
                .into_iter()
                .collect(),
            ComponentKind::Torso(_) => [
                ("home", vec![0.0, 0.0, 0.0]),
                ("folded", vec![0.0, 0.0, -1.5708]),
                ("crouch20_low", vec![0.0, 0.0, -0.35]),
                ("crouch20_medium", vec![0.52, 1.05, 0.18]),
                ("crouch20_high", vec![0.78, 1.57, 0.44]),
                ("crouch45_low", vec![0.0, 0.0, -0.79]),
                ("crouch45_medium", vec![0.52, 1.05, -0.26]),
                ("crouch45_high", vec![0.78, 1.57, 0.0]),
                ("crouch90_low", vec![0.0, 0.0, -1.57]),
                ("crouch90_medium", vec![0.52, 1.05, -1.04]),
                ("crouch90_high", vec![0.78, 1.57, -0.78]),
            ]
            .into_iter()
            .collect(),
            _ => NamedMap::new(),
        }
    }

    /// Topic for the given channel, or [`Error::Config`] if this component has none.
    pub fn topic_name(&self, kind: TopicKind) -> Result<String> {
        let topic = match (&self.kind, kind) {
            (ComponentKind::Arm(arm), kind) => {
                let base = match kind {
                    TopicKind::State => Some("state/arm"),
                    TopicKind::Control => Some("control/arm"),
                    TopicKind::Wrench => Some("state/wrench"),
                    TopicKind::WristButton => Some("state/wrist_button"),
                    TopicKind::PassThrough => Some("control/ee_pass_through"),
                    TopicKind::PassThroughState => Some("state/ee_pass_through"),
                    _ => None,
                };
                base.map(|base| sided_topic(base, arm.side))
            }
            (ComponentKind::Hand(hand), kind) => hand.topic_name(kind),
            (ComponentKind::Head(_), TopicKind::State) => Some("state/head".to_owned()),
            (ComponentKind::Head(_), TopicKind::Control) => Some("control/head".to_owned()),
            (ComponentKind::Torso(_), TopicKind::State) => Some("state/torso".to_owned()),
            (ComponentKind::Torso(_), TopicKind::Control) => Some("control/torso".to_owned()),
            (ComponentKind::Chassis(_), TopicKind::SteerControl) => {
                Some("control/chassis/steer".to_owned())
            }
            (ComponentKind::Chassis(_), TopicKind::SteerState) => {
                Some("state/chassis/steer".to_owned())
            }
            (ComponentKind::Chassis(_), TopicKind::DriveControl) => {
                Some("control/chassis/drive".to_owned())
            }
            (ComponentKind::Chassis(_), TopicKind::DriveState) => {
                Some("state/chassis/drive".to_owned())
            }
            (ComponentKind::Battery, TopicKind::State) => Some("state/bms".to_owned()),
            (ComponentKind::EStop, TopicKind::State) => Some("state/estop".to_owned()),
            (ComponentKind::Heartbeat(_), TopicKind::Heartbeat) => Some("heartbeat".to_owned()),
            _ => None,
        };
        topic.ok_or_else(|| self.missing_mapping("topic", kind.as_str()))
    }

    /// Service name for the given query, or [`Error::Config`] if this component has none.
    pub fn query_name(&self, kind: QueryKind) -> Result<String> {
        let query = match (&self.kind, kind) {
            (ComponentKind::Arm(arm), kind) => {
                let base = match kind {
                    QueryKind::Mode => Some("mode/arm"),
                    QueryKind::Pid => Some("system/arm_pid"),
                    QueryKind::Brake => Some("system/arm_brake"),
                    QueryKind::BaudRate => Some("system/ee_baud_rate"),
                    QueryKind::ForceTorqueSensor => Some("mode/force_torque_sensor"),
                    QueryKind::Estop => None,
                };
                base.map(|base| sided_topic(base, arm.side))
            }
            (ComponentKind::Head(_), QueryKind::Mode) => Some("mode/head".to_owned()),
            (ComponentKind::EStop, QueryKind::Estop) => Some("system/estop".to_owned()),
            _ => None,
        };
        query.ok_or_else(|| self.missing_mapping("query", kind.as_str()))
    }

    fn missing_mapping(&self, what: &str, tag: &str) -> Error {
        let side = match self.side() {
            Side::None => String::new(),
            side => format!("{side} "),
        };
        Error::Config(format!(
            "no {what} mapping for '{tag}' on {side}{} component",
            self.kind_name()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sided_joints_prefix() {
        assert_eq!(sided_joints(Side::Left, &["arm_j1"]), vec!["L_arm_j1"]);
        assert_eq!(sided_joints(Side::Right, &["arm_j1"]), vec!["R_arm_j1"]);
        assert_eq!(sided_joints(Side::None, &["head_j1"]), vec!["head_j1"]);
    }

    #[test]
    fn test_component_key() {
        assert_eq!(Side::Left.component_key("hand"), "left_hand");
        assert_eq!(Side::None.component_key("torso"), "torso");
    }

    #[test]
    fn test_tag_parse_rejects_unknown() {
        assert_eq!("baud_rate".parse::<QueryKind>(), Ok(QueryKind::BaudRate));
        assert!(matches!(
            "warp_drive".parse::<TopicKind>(),
            Err(Error::Config(msg)) if msg.contains("warp_drive")
        ));
    }
}
