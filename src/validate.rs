//! Require-style component checks for code that only runs on some variants.

use crate::error::{Error, Result};
use crate::robot_info::RobotInfo;

/// Required components absent from `info`, in the order they were asked for.
pub fn missing_components<'a>(info: &RobotInfo, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|name| !info.has_component(name))
        .collect()
}

pub fn has_all_components(info: &RobotInfo, required: &[&str]) -> bool {
    required.iter().all(|name| info.has_component(name))
}

pub fn has_any_component(info: &RobotInfo, candidates: &[&str]) -> bool {
    candidates.iter().any(|name| info.has_component(name))
}

/// Fails with [`Error::MissingComponents`] unless every name in `required` is declared.
pub fn validate_components(info: &RobotInfo, required: &[&str]) -> Result<()> {
    let missing = missing_components(info, required);
    if missing.is_empty() {
        return Ok(());
    }
    Err(Error::MissingComponents {
        robot_type: info.robot_type().to_owned(),
        missing: missing.into_iter().map(str::to_owned).collect(),
        available: info.config().components.key_list(),
    })
}

pub fn validate_component(info: &RobotInfo, name: &str) -> Result<()> {
    validate_components(info, &[name])
}
