//! # robot-info
//!
//! Robot variant configuration registry for the Vega humanoid family.
//!
//! A [`VariantRegistry`] maps variant names (`vega_1_gripper`, ...) to factories
//! producing a fresh [`RobotConfig`]. [`RobotInfo`] resolves the variant this
//! process runs on, either explicitly or from `ROBOT_CONFIG` / `ROBOT_NAME`,
//! applies the [`RuntimeOverrides`] and answers component, sensor and URDF
//! questions. URDF geometry is bound lazily through a [`UrdfLoader`].
//!
//! ```no_run
//! use robot_info::{RobotInfo, VariantRegistry};
//!
//! let registry = VariantRegistry::with_builtin_variants()?;
//! let info = RobotInfo::from_variant(&registry, "vega_1_f5d6")?;
//! assert_eq!(info.component_dof("left_hand")?, 6);
//! # Ok::<(), robot_info::Error>(())
//! ```

pub mod component;
pub mod env;
pub mod error;
pub mod hand;
pub mod modifier;
pub mod named_map;
pub mod registry;
pub mod robot;
pub mod robot_info;
pub mod sensor;
pub mod urdf;
pub mod validate;
pub mod variants;

pub use component::*;
pub use env::*;
pub use error::{Error, Result};
pub use hand::*;
pub use modifier::*;
pub use named_map::NamedMap;
pub use registry::*;
pub use robot::*;
pub use robot_info::*;
pub use sensor::*;
pub use urdf::*;
pub use validate::*;
