//! Error types for robot configuration resolution.
//!
//! Every failure in this crate is recoverable by the caller and names the
//! offending key. Nothing here exits the process; that is left to the binary.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Robot configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Variant name is not registered
    #[error("Unknown robot variant: '{name}'. Available variants: {available:?}")]
    UnknownVariant {
        /// Requested variant name
        name: String,
        /// Registered variant names, in registration order
        available: Vec<String>,
    },

    /// Variant name registered twice
    #[error("Robot variant '{0}' is already registered")]
    DuplicateVariant(String),

    /// Component lookup against a resolved config failed
    #[error("Component '{component}' not found. Available: {available:?}")]
    ComponentNotFound {
        /// Requested component name
        component: String,
        /// Declared component names
        available: Vec<String>,
    },

    /// Sensor is not part of this variant's sensor table
    #[error("Sensor '{sensor}' is not available on '{model}'. Available: {available:?}")]
    SensorNotFound {
        /// Requested sensor name
        sensor: String,
        /// Robot model the lookup ran against
        model: String,
        /// Sensors known to the model
        available: Vec<String>,
    },

    /// End-effector auto-detection could not pick a single sub-config
    #[error("End-effector detection failed for {side} side: {reason}")]
    HandDetection {
        /// Side whose slot could not be resolved
        side: String,
        /// Why no unambiguous match exists
        reason: String,
    },

    /// No usable variant source across config, name and environment
    #[error("Could not resolve robot variant: {0}")]
    VariantResolution(String),

    /// URDF binding or query failed
    #[error("URDF unavailable for '{path}': {reason}")]
    UrdfUnavailable {
        /// URDF path the binding was attempted against
        path: String,
        /// Bind failure
        reason: String,
    },

    /// Malformed topic or query name request
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required components are missing from the resolved config
    #[error("Robot '{robot_type}' is missing components: {missing:?}. Available components: {available:?}")]
    MissingComponents {
        /// Robot type the check ran against
        robot_type: String,
        /// Required but absent components
        missing: Vec<String>,
        /// Declared component names
        available: Vec<String>,
    },
}
