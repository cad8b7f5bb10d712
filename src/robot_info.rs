//! Unified robot information facade.
//!
//! [`RobotInfo`] resolves which variant this process is talking to, runs the
//! [`RuntimeOverrides`] over it and then answers component and URDF questions.
//!
//! Resolution order, first match wins:
//! 1. an explicit [`RobotConfig`] ([`RobotInfoBuilder::config`]),
//! 2. an explicit variant name ([`RobotInfoBuilder::variant`]),
//! 3. the environment snapshot ([`resolve_variant_from_env`]).
//!
//! The URDF is bound on the first URDF-dependent call and the outcome is kept
//! for the life of the instance. A failed bind is not retried.

use crate::component::ComponentConfig;
use crate::env::{EnvSnapshot, resolve_variant_from_env};
use crate::error::{Error, Result};
use crate::modifier::RuntimeOverrides;
use crate::registry::VariantRegistry;
use crate::robot::RobotConfig;
use crate::urdf::{JointLimit, JointType, UrdfLibrary, UrdfLoader, UrdfProvider};
use std::cell::OnceCell;
use std::fmt;
use tracing::{debug, warn};

struct UrdfBinding {
    path: String,
    loader: Box<dyn UrdfLoader>,
    bound: OnceCell<Result<Box<dyn UrdfProvider>>>,
}

impl UrdfBinding {
    fn new(path: String, loader: Box<dyn UrdfLoader>) -> Self {
        Self {
            path,
            loader,
            bound: OnceCell::new(),
        }
    }

    fn bind(&self) -> Result<Box<dyn UrdfProvider>> {
        if self.path.is_empty() {
            return Err(Error::UrdfUnavailable {
                path: String::new(),
                reason: "no URDF path configured".to_owned(),
            });
        }
        self.loader.load(&self.path).map_err(|e| match e {
            Error::UrdfUnavailable { .. } => e,
            other => Error::UrdfUnavailable {
                path: self.path.clone(),
                reason: other.to_string(),
            },
        })
    }

    fn provider(&self) -> Result<&dyn UrdfProvider> {
        let bound = self.bound.get_or_init(|| {
            let result = self.bind();
            match &result {
                Ok(_) => debug!(path = %self.path, "bound URDF"),
                Err(e) => warn!(path = %self.path, error = %e, "continuing without URDF"),
            }
            result
        });
        match bound {
            Ok(provider) => Ok(provider.as_ref()),
            Err(e) => Err(e.clone()),
        }
    }

    /// Binding outcome so far, without attempting to bind.
    fn state(&self) -> &'static str {
        match self.bound.get() {
            None => "not loaded",
            Some(Ok(_)) => "loaded",
            Some(Err(_)) => "unavailable",
        }
    }
}

/// Keeps the entries whose name is in `names`, in the requested order.
fn select<T>(all: Vec<(String, T)>, names: Option<&[&str]>) -> Vec<(String, T)> {
    let Some(names) = names else {
        return all;
    };
    let mut all: Vec<Option<(String, T)>> = all.into_iter().map(Some).collect();
    names
        .iter()
        .filter_map(|wanted| {
            all.iter_mut()
                .find(|e| e.as_ref().is_some_and(|(name, _)| name == wanted))
                .and_then(Option::take)
        })
        .collect()
}

/// Builder for [`RobotInfo`].
#[derive(Default)]
pub struct RobotInfoBuilder<'a> {
    registry: Option<&'a VariantRegistry>,
    variant: Option<String>,
    config: Option<RobotConfig>,
    env: EnvSnapshot,
    overrides: Option<RuntimeOverrides>,
    loader: Option<Box<dyn UrdfLoader>>,
}

impl<'a> RobotInfoBuilder<'a> {
    /// Registry used for name and environment resolution.
    pub fn registry(mut self, registry: &'a VariantRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn variant(mut self, name: impl Into<String>) -> Self {
        self.variant = Some(name.into());
        self
    }

    /// A pre-built config, used as-is apart from the runtime overrides.
    pub fn config(mut self, config: RobotConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn env(mut self, env: EnvSnapshot) -> Self {
        self.env = env;
        self
    }

    /// Runtime overrides. Defaults to [`RuntimeOverrides::from_env`] on the snapshot.
    pub fn overrides(mut self, overrides: RuntimeOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Loader used for the lazy URDF bind. Defaults to an empty [`UrdfLibrary`].
    pub fn urdf_loader(mut self, loader: impl UrdfLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    pub fn build(self) -> Result<RobotInfo> {
        let config = match (self.config, self.variant) {
            (Some(config), variant) => {
                if let Some(variant) = variant {
                    warn!(variant = %variant, model = %config.robot_model, "explicit config given, ignoring variant name");
                }
                config
            }
            (None, Some(variant)) => Self::require(self.registry)?.robot_config(&variant)?,
            (None, None) => {
                let registry = Self::require(self.registry)?;
                let variant = resolve_variant_from_env(&self.env, &registry.abbreviations())?;
                registry.robot_config(&variant)?
            }
        };

        let overrides = self
            .overrides
            .unwrap_or_else(|| RuntimeOverrides::from_env(&self.env));
        let config = overrides.apply(config)?;
        let loader = self
            .loader
            .unwrap_or_else(|| Box::new(UrdfLibrary::new()));

        debug!(model = %config.robot_model, components = config.components.len(), "resolved robot config");
        Ok(RobotInfo {
            urdf: UrdfBinding::new(config.urdf_path.clone(), loader),
            robot_name: self.env.robot_name,
            config,
        })
    }

    fn require(registry: Option<&'a VariantRegistry>) -> Result<&'a VariantRegistry> {
        registry.ok_or_else(|| {
            Error::VariantResolution("a variant registry is required to resolve by name".to_owned())
        })
    }
}

/// Robot configuration plus lazily bound URDF data.
pub struct RobotInfo {
    config: RobotConfig,
    robot_name: Option<String>,
    urdf: UrdfBinding,
}

impl fmt::Debug for RobotInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobotInfo")
            .field("model", &self.config.robot_model)
            .field("components", &self.config.components.len())
            .field("urdf", &self.urdf.state())
            .finish()
    }
}

impl RobotInfo {
    pub fn builder<'a>() -> RobotInfoBuilder<'a> {
        RobotInfoBuilder::default()
    }

    /// Resolves `variant` through the registry.
    pub fn from_variant(registry: &VariantRegistry, variant: &str) -> Result<Self> {
        Self::builder().registry(registry).variant(variant).build()
    }

    /// Wraps a pre-built config.
    pub fn from_config(config: RobotConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Resolves the variant from an environment snapshot.
    pub fn from_env(registry: &VariantRegistry, env: &EnvSnapshot) -> Result<Self> {
        Self::builder().registry(registry).env(env.clone()).build()
    }

    // --- config ---

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// The `ROBOT_NAME` this instance saw, if any.
    pub fn robot_name(&self) -> Option<&str> {
        self.robot_name.as_deref()
    }

    pub fn robot_model(&self) -> &str {
        &self.config.robot_model
    }

    pub fn robot_type(&self) -> &str {
        self.config.robot_type()
    }

    pub fn robot_version(&self) -> &str {
        self.config.robot_version()
    }

    // --- components ---

    pub fn component_list(&self) -> Vec<&str> {
        self.config.components.keys().collect()
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.config.has_component(name)
    }

    pub fn component_config(&self, name: &str) -> Result<&ComponentConfig> {
        self.config.component(name)
    }

    pub fn component_joints(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.component_config(name)?.joints())
    }

    pub fn component_dof(&self, name: &str) -> Result<usize> {
        Ok(self.component_config(name)?.dof())
    }

    /// Components running in position-velocity mode.
    pub fn pv_components(&self) -> Vec<&str> {
        self.config
            .components
            .iter()
            .filter(|(_, c)| c.pv_mode() == Some(true))
            .map(|(name, _)| name)
            .collect()
    }

    pub fn has_left_arm(&self) -> bool {
        self.has_component("left_arm")
    }

    pub fn has_right_arm(&self) -> bool {
        self.has_component("right_arm")
    }

    pub fn has_left_hand(&self) -> bool {
        self.has_component("left_hand")
    }

    pub fn has_right_hand(&self) -> bool {
        self.has_component("right_hand")
    }

    pub fn has_torso(&self) -> bool {
        self.has_component("torso")
    }

    pub fn has_head(&self) -> bool {
        self.has_component("head")
    }

    pub fn has_chassis(&self) -> bool {
        self.has_component("chassis")
    }

    // --- sensors and services ---

    pub fn has_sensor(&self, name: &str) -> bool {
        self.config.has_sensor(name)
    }

    /// Enables or disables a sensor the resolved variant still carries.
    pub fn enable_sensor(&mut self, name: &str, enabled: bool) -> Result<()> {
        self.config.enable_sensor(name, enabled)
    }

    pub fn enabled_sensors(&self) -> Vec<&str> {
        self.config
            .sensors
            .iter()
            .filter(|(_, s)| s.enabled)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn querable(&self, name: &str) -> Option<&str> {
        self.config.querables.get(name).map(String::as_str)
    }

    // --- URDF ---

    pub fn urdf_path(&self) -> &str {
        &self.urdf.path
    }

    /// Binds the URDF if that has not been attempted yet and reports the outcome.
    pub fn has_urdf(&self) -> bool {
        self.urdf.provider().is_ok()
    }

    /// Limits for `names` (all limited joints when `None`).
    pub fn joint_limits(&self, names: Option<&[&str]>) -> Result<Vec<(String, JointLimit)>> {
        Ok(select(self.urdf.provider()?.joint_limits(), names))
    }

    /// `[lower, upper]` position limits.
    pub fn joint_pos_limits(&self, names: Option<&[&str]>) -> Result<Vec<[f32; 2]>> {
        let limits = self.urdf.provider()?.joint_position_limits();
        Ok(select(limits, names).into_iter().map(|(_, l)| l).collect())
    }

    pub fn joint_vel_limits(&self, names: Option<&[&str]>) -> Result<Vec<f32>> {
        let limits = self.urdf.provider()?.joint_velocity_limits();
        Ok(select(limits, names).into_iter().map(|(_, v)| v).collect())
    }

    pub fn joint_effort_limits(&self, names: Option<&[&str]>) -> Result<Vec<f32>> {
        let limits = self.urdf.provider()?.joint_effort_limits();
        Ok(select(limits, names).into_iter().map(|(_, e)| e).collect())
    }

    pub fn link_names(&self) -> Result<Vec<String>> {
        Ok(self.urdf.provider()?.link_names())
    }

    pub fn joint_names(&self) -> Result<Vec<String>> {
        Ok(self.urdf.provider()?.joint_names())
    }

    pub fn movable_joint_names(&self) -> Result<Vec<String>> {
        Ok(self.urdf.provider()?.movable_joint_names())
    }

    /// Joint names filtered by URDF joint type, e.g. only `Continuous` wheels.
    pub fn joint_names_of_type(&self, joint_type: JointType) -> Result<Vec<String>> {
        Ok(self.urdf.provider()?.joint_names_of_type(joint_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_keeps_requested_order_and_skips_unknown() {
        let all = vec![
            ("a".to_owned(), 1),
            ("b".to_owned(), 2),
            ("c".to_owned(), 3),
        ];
        let picked = select(all.clone(), Some(&["c", "missing", "a"]));
        assert_eq!(picked, vec![("c".to_owned(), 3), ("a".to_owned(), 1)]);
        assert_eq!(select(all.clone(), None), all);
    }
}
