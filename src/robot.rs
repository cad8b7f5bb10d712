//! Robot variant configuration: the component table plus robot-level metadata.

use crate::component::ComponentConfig;
use crate::error::{Error, Result};
use crate::named_map::NamedMap;
use crate::sensor::SensorConfig;
use serde::{Deserialize, Serialize};

/// Splits a robot model into `(type, version)` on the last `_`.
///
/// `"vega_1"` becomes `("vega", "1")`. A model without `_` is all type and
/// has an empty version.
pub fn parse_robot_model(model: &str) -> (&str, &str) {
    model.rsplit_once('_').unwrap_or((model, ""))
}

/// The complete description of one robot hardware variant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Hardware revision, e.g. `vega_1`. Hand options are not part of the model.
    pub robot_model: String,

    /// Two-letter code used in robot serial names, e.g. `vg`.
    pub abbr: String,

    /// URDF resource path, relative to the URDF resource root.
    pub urdf_path: String,

    /// Components in declaration order.
    pub components: NamedMap<ComponentConfig>,

    /// Sensors this variant may carry. The key set is the variant's allowed sensor set.
    pub sensors: NamedMap<SensorConfig>,

    /// Queryable services, keyed by purpose.
    pub querables: NamedMap<String>,
}

impl RobotConfig {
    pub fn new(robot_model: impl Into<String>) -> Self {
        Self {
            robot_model: robot_model.into(),
            ..Default::default()
        }
    }

    pub fn robot_type(&self) -> &str {
        parse_robot_model(&self.robot_model).0
    }

    pub fn robot_version(&self) -> &str {
        parse_robot_model(&self.robot_model).1
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn component(&self, name: &str) -> Result<&ComponentConfig> {
        self.components
            .get(name)
            .ok_or_else(|| self.component_not_found(name))
    }

    pub fn component_mut(&mut self, name: &str) -> Result<&mut ComponentConfig> {
        let err = self.component_not_found(name);
        self.components.get_mut(name).ok_or(err)
    }

    /// True when the sensor is part of this variant and enabled.
    pub fn has_sensor(&self, name: &str) -> bool {
        self.sensors.get(name).is_some_and(|s| s.enabled)
    }

    pub fn sensor(&self, name: &str) -> Result<&SensorConfig> {
        self.sensors
            .get(name)
            .ok_or_else(|| self.sensor_not_found(name))
    }

    /// Enables or disables a sensor from this variant's sensor table.
    pub fn enable_sensor(&mut self, name: &str, enabled: bool) -> Result<()> {
        let err = self.sensor_not_found(name);
        let sensor = self.sensors.get_mut(name).ok_or(err)?;
        sensor.enabled = enabled;
        Ok(())
    }

    fn component_not_found(&self, name: &str) -> Error {
        Error::ComponentNotFound {
            component: name.to_owned(),
            available: self.components.key_list(),
        }
    }

    fn sensor_not_found(&self, name: &str) -> Error {
        Error::SensorNotFound {
            sensor: name.to_owned(),
            model: self.robot_model.clone(),
            available: self.sensors.key_list(),
        }
    }
}
