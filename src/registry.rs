//! Variant registry: variant name to config factory.
//!
//! The registry is an explicit object owned by whatever bootstraps the
//! process. It is filled during initialization through
//! [`register`](VariantRegistry::register) and only read afterwards; every
//! registration must happen before the first [`RobotInfo`](crate::RobotInfo)
//! is built.

use crate::env::{EnvSnapshot, resolve_variant_from_env};
use crate::error::{Error, Result};
use crate::named_map::NamedMap;
use crate::robot::RobotConfig;
use tracing::debug;

/// Zero-argument constructor for a fresh variant config.
pub type VariantFactory = Box<dyn Fn() -> RobotConfig + Send + Sync>;

#[derive(Default)]
pub struct VariantRegistry {
    factories: NamedMap<VariantFactory>,
}

impl std::fmt::Debug for VariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("variants", &self.factories.key_list())
            .finish()
    }
}

impl VariantRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`.
    ///
    /// Names are unique: registering an existing name fails with
    /// [`Error::DuplicateVariant`] and leaves the first registration in place.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> RobotConfig + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(Error::DuplicateVariant(name));
        }
        debug!(variant = %name, "registered robot variant");
        self.factories.insert(name, Box::new(factory));
        Ok(())
    }

    /// Registered variant names, in registration order.
    pub fn available_variants(&self) -> impl Iterator<Item = &str> {
        self.factories.keys()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// A fresh config built by the variant's factory.
    pub fn robot_config(&self, name: &str) -> Result<RobotConfig> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::UnknownVariant {
                name: name.to_owned(),
                available: self.factories.key_list(),
            })?;
        Ok(factory())
    }

    /// The unmodified default config for a variant, for callers that want to
    /// adjust it before handing it to [`RobotInfo`](crate::RobotInfo).
    ///
    /// With no explicit `variant` the name is resolved from `env`.
    pub fn default_config(&self, variant: Option<&str>, env: &EnvSnapshot) -> Result<RobotConfig> {
        match variant {
            Some(name) => self.robot_config(name),
            None => {
                let name = resolve_variant_from_env(env, &self.abbreviations())?;
                self.robot_config(&name)
            }
        }
    }

    /// Abbreviation to robot type, e.g. `vg` to `vega`.
    ///
    /// Built from the registered configs; the first registration wins for a
    /// given abbreviation.
    pub fn abbreviations(&self) -> NamedMap<String> {
        let mut mapping = NamedMap::new();
        for factory in self.factories.values() {
            let config = factory();
            if config.abbr.is_empty() || mapping.contains_key(&config.abbr) {
                continue;
            }
            let robot_type = config.robot_type().to_owned();
            mapping.insert(config.abbr, robot_type);
        }
        mapping
    }
}
