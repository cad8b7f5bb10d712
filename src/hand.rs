//! End-effector models and the hand types reported by a robot controller.

use crate::component::{Side, TopicKind, sided_joints, sided_topic};
use crate::error::{Error, Result};
use crate::named_map::NamedMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const F5D6_JOINTS: [&str; 6] = ["th_j1", "ff_j1", "mf_j1", "rf_j1", "lf_j1", "th_j0"];
const GRIPPER_JOINTS: [&str; 1] = ["gripper_j1"];

/// Hand type as detected at runtime by the robot controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandType {
    /// Controller reports no known end-effector.
    Unknown,
    HandF5D6V1,
    /// F5D6 version 2, adds touch sensing.
    HandF5D6V2,
    /// Dex gripper, single or double.
    DexGripper,
}

impl HandType {
    /// The controller's wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::HandF5D6V1 => "HandF5D6_V1",
            Self::HandF5D6V2 => "HandF5D6_V2",
            Self::DexGripper => "DexGripper",
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// The sub-config injected when this type is detected.
    pub fn default_model(self) -> Option<HandModel> {
        match self {
            Self::Unknown => None,
            Self::HandF5D6V1 => Some(HandModel::F5D6V1),
            Self::HandF5D6V2 => Some(HandModel::F5D6V2),
            Self::DexGripper => Some(HandModel::DexDGripper),
        }
    }
}

impl fmt::Display for HandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [
            Self::Unknown,
            Self::HandF5D6V1,
            Self::HandF5D6V2,
            Self::DexGripper,
        ]
        .into_iter()
        .find(|t| t.as_str() == s)
        .ok_or_else(|| Error::Config(format!("unknown hand type '{s}'")))
    }
}

/// Concrete end-effector hardware fitted to an arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandModel {
    F5D6V1,
    F5D6V2,
    DexSGripper,
    DexDGripper,
    /// Placeholder resolved by end-effector detection before the config is exposed.
    Auto,
}

impl HandModel {
    /// The detected type this model answers to. `None` for [`HandModel::Auto`].
    pub fn hand_type(self) -> Option<HandType> {
        match self {
            Self::F5D6V1 => Some(HandType::HandF5D6V1),
            Self::F5D6V2 => Some(HandType::HandF5D6V2),
            Self::DexSGripper | Self::DexDGripper => Some(HandType::DexGripper),
            Self::Auto => None,
        }
    }

    pub fn is_gripper(self) -> bool {
        matches!(self, Self::DexSGripper | Self::DexDGripper)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::F5D6V1 => "f5d6_v1",
            Self::F5D6V2 => "f5d6_v2",
            Self::DexSGripper => "dex_s_gripper",
            Self::DexDGripper => "dex_d_gripper",
            Self::Auto => "auto",
        }
    }
}

/// Configuration for a hand or gripper mounted on one arm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandConfig {
    pub side: Side,
    /// Position-velocity control mode flag.
    pub pv_mode: bool,
    pub model: HandModel,
}

impl HandConfig {
    pub fn new(side: Side, model: HandModel) -> Self {
        Self {
            side,
            pv_mode: false,
            model,
        }
    }

    /// An unresolved slot, filled in by end-effector detection.
    pub fn auto(side: Side) -> Self {
        Self::new(side, HandModel::Auto)
    }

    pub fn joints(&self) -> Vec<String> {
        match self.model {
            HandModel::F5D6V1 | HandModel::F5D6V2 => sided_joints(self.side, &F5D6_JOINTS),
            HandModel::DexSGripper | HandModel::DexDGripper => {
                sided_joints(self.side, &GRIPPER_JOINTS)
            }
            HandModel::Auto => Vec::new(),
        }
    }

    pub fn pose_pool(&self) -> NamedMap<Vec<f32>> {
        match self.model {
            HandModel::F5D6V1 | HandModel::F5D6V2 => [
                ("open", vec![0.1834, 0.2891, 0.2801, 0.284, 0.2811, -0.0158]),
                ("close", vec![-0.1, -1.0946, -1.0844, -1.0154, -1.0118, 0.84]),
            ]
            .into_iter()
            .collect(),
            HandModel::DexSGripper | HandModel::DexDGripper => {
                [("open", vec![0.7854]), ("close", vec![0.0])]
                    .into_iter()
                    .collect()
            }
            HandModel::Auto => NamedMap::new(),
        }
    }

    pub(crate) fn topic_name(&self, kind: TopicKind) -> Option<String> {
        // TODO: move grippers onto the hand namespace once the controller reports gripper types.
        let ns = if self.model.is_gripper() {
            "gripper"
        } else {
            "hand"
        };
        match (self.model, kind) {
            (HandModel::Auto, _) => None,
            (_, TopicKind::State) => Some(sided_topic(&format!("state/{ns}"), self.side)),
            (_, TopicKind::Control) => Some(sided_topic(&format!("control/{ns}"), self.side)),
            (HandModel::F5D6V2, TopicKind::TouchSensor) => {
                Some(format!("{}/touch", sided_topic("state/hand", self.side)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_type_parses_controller_strings() {
        assert_eq!("HandF5D6_V2".parse::<HandType>(), Ok(HandType::HandF5D6V2));
        assert_eq!("UNKNOWN".parse::<HandType>(), Ok(HandType::Unknown));
        assert!(matches!(
            "Claw".parse::<HandType>(),
            Err(Error::Config(msg)) if msg.contains("Claw")
        ));
    }

    #[test]
    fn test_gripper_models_share_detected_type() {
        assert_eq!(HandModel::DexSGripper.hand_type(), Some(HandType::DexGripper));
        assert_eq!(HandModel::DexDGripper.hand_type(), Some(HandType::DexGripper));
        assert_eq!(HandModel::Auto.hand_type(), None);
    }
}
