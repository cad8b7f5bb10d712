//! Environment snapshot and variant-name derivation.
//!
//! The process environment is read once into an [`EnvSnapshot`]. Everything
//! downstream takes the snapshot as input and never touches `std::env`, so
//! resolution is a pure function of its arguments.
//!
//! Robot serial names follow `dm/<abbr><serial>-<version>`, where the
//! twelve alphanumerics start with the two-letter robot abbreviation and the
//! version is either `\d+[a-z]?` or `rc\d+`:
//!
//! | `ROBOT_NAME`          | variant   |
//! |-----------------------|-----------|
//! | `dm/vgabcd123456-1`   | `vega_1`  |
//! | `dm/vg0123456789-1p`  | `vega_1p` |
//! | `dm/vg0123456789-1u`  | `vega_1u` |
//! | `dm/vg0123456789-rc2` | `vega_rc2`|

use crate::error::{Error, Result};
use crate::named_map::NamedMap;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Direct variant override.
pub const ROBOT_CONFIG_ENV: &str = "ROBOT_CONFIG";
/// Robot identity string, parsed into a variant name.
pub const ROBOT_NAME_ENV: &str = "ROBOT_NAME";
/// Set to `1` to disable the e-stop component.
pub const DISABLE_ESTOP_ENV: &str = "DISABLE_ESTOP_CHECKING";
/// Set to `1` to disable the heartbeat component.
pub const DISABLE_HEARTBEAT_ENV: &str = "DISABLE_HEARTBEAT";

/// The environment variables this crate reads, captured once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    pub robot_config: Option<String>,
    pub robot_name: Option<String>,
    pub disable_estop_checking: bool,
    pub disable_heartbeat: bool,
}

impl EnvSnapshot {
    /// Reads the process environment.
    pub fn capture() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a snapshot from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let flag = |key: &str| {
            non_empty(key).is_some_and(|v| v.trim() == "1" || v.trim().eq_ignore_ascii_case("true"))
        };
        Self {
            robot_config: non_empty(ROBOT_CONFIG_ENV),
            robot_name: non_empty(ROBOT_NAME_ENV),
            disable_estop_checking: flag(DISABLE_ESTOP_ENV),
            disable_heartbeat: flag(DISABLE_HEARTBEAT_ENV),
        }
    }

    pub fn with_robot_config(mut self, variant: impl Into<String>) -> Self {
        self.robot_config = Some(variant.into());
        self
    }

    pub fn with_robot_name(mut self, name: impl Into<String>) -> Self {
        self.robot_name = Some(name.into());
        self
    }
}

/// The parts of a robot serial name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RobotName<'a> {
    /// Two-letter robot abbreviation, e.g. `vg`.
    pub abbr: &'a str,
    /// Full twelve-character serial, abbreviation included.
    pub serial: &'a str,
    /// Version tag, e.g. `1`, `1p`, `rc2`.
    pub version: &'a str,
}

/// `dm/` + two-letter abbreviation + ten more serial characters + `-` + version.
static ROBOT_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^dm/(([a-zA-Z0-9]{2})[a-zA-Z0-9]{10})-([0-9]+[a-z]?|rc[0-9]+)$")
        .expect("robot name pattern is valid")
});

/// Splits a `dm/<serial>-<version>` robot name into its parts.
pub fn parse_robot_name(name: &str) -> Result<RobotName<'_>> {
    let caps = ROBOT_NAME_PATTERN.captures(name).ok_or_else(|| {
        Error::VariantResolution(format!(
            "invalid robot name format: '{name}'. Expected dm/[abbreviation][serial]-[version][suffix] \
             (e.g. 'dm/vgabcd123456-1', 'dm/vg0123456789-1p', 'dm/vg0123456789-1u')"
        ))
    })?;
    let group = |i| caps.get(i).map_or("", |m| m.as_str());

    Ok(RobotName {
        abbr: group(2),
        serial: group(1),
        version: group(3),
    })
}

/// Maps a robot serial name to a variant name through the abbreviation table.
pub fn variant_from_robot_name(name: &str, abbreviations: &NamedMap<String>) -> Result<String> {
    let parsed = parse_robot_name(name)?;
    let robot_type = abbreviations.get(parsed.abbr).ok_or_else(|| {
        Error::VariantResolution(format!(
            "unknown robot abbreviation '{}' in '{name}'. Valid abbreviations: {:?}",
            parsed.abbr,
            abbreviations.key_list()
        ))
    })?;
    Ok(format!("{robot_type}_{}", parsed.version))
}

/// Resolves a variant name from the environment.
///
/// `ROBOT_CONFIG` wins; otherwise `ROBOT_NAME` is parsed. Fails with
/// [`Error::VariantResolution`] when neither is set.
pub fn resolve_variant_from_env(
    env: &EnvSnapshot,
    abbreviations: &NamedMap<String>,
) -> Result<String> {
    if let Some(variant) = &env.robot_config {
        // Older deployments name the config module file, e.g. `vega_1.py`.
        let variant = variant.trim();
        let variant = variant.strip_suffix(".py").unwrap_or(variant);
        debug!(variant = %variant, "variant from {ROBOT_CONFIG_ENV}");
        return Ok(variant.to_owned());
    }

    if let Some(name) = &env.robot_name {
        let variant = variant_from_robot_name(name, abbreviations)?;
        debug!(robot_name = %name, variant = %variant, "variant from {ROBOT_NAME_ENV}");
        return Ok(variant);
    }

    Err(Error::VariantResolution(format!(
        "variant not specified and neither {ROBOT_CONFIG_ENV} nor {ROBOT_NAME_ENV} is set"
    )))
}
