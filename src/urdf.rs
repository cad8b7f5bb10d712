//! URDF provider seam.
//!
//! Geometry lives outside this crate. A [`UrdfLoader`] binds a URDF path to a
//! [`UrdfProvider`], which answers joint-limit and link queries. [`UrdfModel`]
//! is a plain in-memory provider; [`UrdfLibrary`] and [`FileUrdfLoader`] are
//! the two stock loaders.

use crate::error::{Error, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Types of URDF joints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    /// Rigid connection.
    Fixed,
    /// Rotates around a single axis within limits (e.g., elbow).
    Revolute,
    /// Rotates around a single axis without limits (e.g., wheel drive).
    Continuous,
    /// Slides along a single axis.
    Prismatic,
    Floating,
    Planar,
}

impl JointType {
    /// Revolute, continuous and prismatic joints are actuated.
    pub fn is_movable(self) -> bool {
        matches!(self, Self::Revolute | Self::Continuous | Self::Prismatic)
    }
}

/// Limits for a joint's motion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointLimit {
    /// Minimum angle (radians) or distance (meters).
    pub lower: f32,
    /// Maximum angle (radians) or distance (meters).
    pub upper: f32,
    /// Maximum torque (Nm) or force (N) the joint motor can apply.
    pub effort: Option<f32>,
    /// Maximum velocity (rad/s or m/s).
    pub velocity: Option<f32>,
}

/// A kinematic connection between two links.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UrdfJoint {
    pub name: String,
    pub joint_type: JointType,
    /// The link closer to the root.
    pub parent: String,
    pub child: String,
    /// Axis of rotation/translation in the joint frame.
    pub axis: Option<Vec3>,
    pub limit: Option<JointLimit>,
}

/// Geometry queries answered by a bound URDF.
///
/// Only [`joint_limits`](Self::joint_limits) and [`link_names`](Self::link_names)
/// are required; the rest are derived from them unless the provider knows better.
pub trait UrdfProvider {
    /// Every joint that declares a limit, in document order.
    fn joint_limits(&self) -> Vec<(String, JointLimit)>;

    fn link_names(&self) -> Vec<String>;

    /// `(name, [lower, upper])` for every limited joint.
    fn joint_position_limits(&self) -> Vec<(String, [f32; 2])> {
        self.joint_limits()
            .into_iter()
            .map(|(name, l)| (name, [l.lower, l.upper]))
            .collect()
    }

    /// Velocity limits for joints that declare one.
    fn joint_velocity_limits(&self) -> Vec<(String, f32)> {
        self.joint_limits()
            .into_iter()
            .filter_map(|(name, l)| l.velocity.map(|v| (name, v)))
            .collect()
    }

    /// Effort limits for joints that declare one.
    fn joint_effort_limits(&self) -> Vec<(String, f32)> {
        self.joint_limits()
            .into_iter()
            .filter_map(|(name, l)| l.effort.map(|e| (name, e)))
            .collect()
    }

    /// All joint names. Defaults to the limited joints.
    fn joint_names(&self) -> Vec<String> {
        self.joint_limits().into_iter().map(|(name, _)| name).collect()
    }

    /// Actuated joint names. Defaults to the limited joints.
    fn movable_joint_names(&self) -> Vec<String> {
        self.joint_names()
    }

    /// `(name, type)` for every joint, in document order. Empty if the
    /// provider does not track joint types.
    fn joint_types(&self) -> Vec<(String, JointType)> {
        Vec::new()
    }

    /// Joint names of the given type.
    fn joint_names_of_type(&self, joint_type: JointType) -> Vec<String> {
        self.joint_types()
            .into_iter()
            .filter(|(_, t)| *t == joint_type)
            .map(|(name, _)| name)
            .collect()
    }
}

/// In-memory URDF content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UrdfModel {
    /// The `<robot name=...>` attribute.
    pub name: String,
    pub links: Vec<String>,
    pub joints: Vec<UrdfJoint>,
}

impl UrdfModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_link(mut self, name: impl Into<String>) -> Self {
        self.links.push(name.into());
        self
    }

    pub fn with_joint(mut self, joint: UrdfJoint) -> Self {
        self.joints.push(joint);
        self
    }

    pub fn joint(&self, name: &str) -> Option<&UrdfJoint> {
        self.joints.iter().find(|j| j.name == name)
    }

    /// Parent link to the joints hanging off it, in document order.
    pub fn joint_tree(&self) -> HashMap<String, Vec<String>> {
        let mut tree: HashMap<String, Vec<String>> = HashMap::new();
        for joint in &self.joints {
            tree.entry(joint.parent.clone())
                .or_default()
                .push(joint.name.clone());
        }
        tree
    }
}

impl UrdfProvider for UrdfModel {
    fn joint_limits(&self) -> Vec<(String, JointLimit)> {
        self.joints
            .iter()
            .filter_map(|j| j.limit.map(|l| (j.name.clone(), l)))
            .collect()
    }

    fn link_names(&self) -> Vec<String> {
        self.links.clone()
    }

    fn joint_names(&self) -> Vec<String> {
        self.joints.iter().map(|j| j.name.clone()).collect()
    }

    fn movable_joint_names(&self) -> Vec<String> {
        self.joints
            .iter()
            .filter(|j| j.joint_type.is_movable())
            .map(|j| j.name.clone())
            .collect()
    }

    fn joint_types(&self) -> Vec<(String, JointType)> {
        self.joints
            .iter()
            .map(|j| (j.name.clone(), j.joint_type))
            .collect()
    }
}

/// Binds a URDF path to a provider.
pub trait UrdfLoader {
    fn load(&self, path: &str) -> Result<Box<dyn UrdfProvider>>;
}

impl<F> UrdfLoader for F
where
    F: Fn(&str) -> Result<Box<dyn UrdfProvider>>,
{
    fn load(&self, path: &str) -> Result<Box<dyn UrdfProvider>> {
        self(path)
    }
}

fn unavailable(path: &str, reason: impl Into<String>) -> Error {
    Error::UrdfUnavailable {
        path: path.to_owned(),
        reason: reason.into(),
    }
}

/// Loader backed by a table of pre-built models, keyed by URDF path.
#[derive(Clone, Debug, Default)]
pub struct UrdfLibrary {
    models: HashMap<String, UrdfModel>,
}

impl UrdfLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, path: impl Into<String>, model: UrdfModel) -> Self {
        self.models.insert(path.into(), model);
        self
    }
}

impl UrdfLoader for UrdfLibrary {
    fn load(&self, path: &str) -> Result<Box<dyn UrdfProvider>> {
        self.models
            .get(path)
            .map(|m| Box::new(m.clone()) as Box<dyn UrdfProvider>)
            .ok_or_else(|| unavailable(path, "no URDF registered for this path"))
    }
}

type ParseFn = dyn Fn(&str) -> Result<Box<dyn UrdfProvider>>;

/// Loader that reads URDF files from disk and hands their contents to a parser.
///
/// Relative paths resolve against `root`, the URDF resource directory.
pub struct FileUrdfLoader {
    root: PathBuf,
    parse: Box<ParseFn>,
}

impl FileUrdfLoader {
    pub fn new(
        root: impl Into<PathBuf>,
        parse: impl Fn(&str) -> Result<Box<dyn UrdfProvider>> + 'static,
    ) -> Self {
        Self {
            root: root.into(),
            parse: Box::new(parse),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl UrdfLoader for FileUrdfLoader {
    fn load(&self, path: &str) -> Result<Box<dyn UrdfProvider>> {
        let resolved = self.resolve(path);
        if !resolved.is_file() {
            return Err(unavailable(
                path,
                format!("URDF file not found: {}", resolved.display()),
            ));
        }
        let contents = fs::read_to_string(&resolved)
            .map_err(|e| unavailable(path, format!("{}: {e}", resolved.display())))?;
        (self.parse)(&contents).map_err(|e| match e {
            Error::UrdfUnavailable { .. } => e,
            other => unavailable(path, other.to_string()),
        })
    }
}
