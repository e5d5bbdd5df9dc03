//! Records produced by the element builders.
//!
//! These types mirror the URDF element structure: geometry, materials,
//! inertial/visual/collision data on links, and joints with their optional
//! sub-properties. Tree relations on [`Link`] are name references filled in
//! only during model assembly.

use nalgebra::Matrix3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::{Color, Transform, Vector3};
use crate::registry::Named;

// ============================================================================
// Geometry
// ============================================================================

/// Shape from the `<geometry>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Geometry {
    /// Sphere with radius in meters.
    Sphere {
        /// Sphere radius in meters.
        radius: f64,
    },
    /// Box with edge lengths (x, y, z) in meters.
    Box {
        /// Size in x, y, z dimensions.
        dim: Vector3,
    },
    /// Cylinder along the local Z axis.
    Cylinder {
        /// Cylinder length in meters.
        length: f64,
        /// Cylinder radius in meters.
        radius: f64,
    },
    /// Capsule along the local Z axis.
    Capsule {
        /// Length of the cylindrical section in meters.
        length: f64,
        /// Cap and shaft radius in meters.
        radius: f64,
    },
    /// Mesh file reference. The file itself is never opened here.
    Mesh {
        /// Path or URI of the mesh.
        filename: String,
        /// Per-axis scale, (1, 1, 1) when unspecified.
        scale: Vector3,
    },
}

impl Geometry {
    /// Create a sphere geometry.
    #[must_use]
    pub fn sphere(radius: f64) -> Self {
        Self::Sphere { radius }
    }

    /// Create a cylinder geometry.
    #[must_use]
    pub fn cylinder(length: f64, radius: f64) -> Self {
        Self::Cylinder { length, radius }
    }

    /// Create a capsule geometry.
    #[must_use]
    pub fn capsule(length: f64, radius: f64) -> Self {
        Self::Capsule { length, radius }
    }

    /// Create a unit-scale mesh geometry.
    #[must_use]
    pub fn mesh(filename: impl Into<String>) -> Self {
        Self::Mesh {
            filename: filename.into(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// The element tag of this shape.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Box { .. } => "box",
            Self::Cylinder { .. } => "cylinder",
            Self::Capsule { .. } => "capsule",
            Self::Mesh { .. } => "mesh",
        }
    }
}

// ============================================================================
// Material
// ============================================================================

/// A named visual material.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Material name (unique within a model).
    pub name: String,
    /// Texture image reference.
    pub texture_filename: Option<String>,
    /// RGBA color.
    pub color: Option<Color>,
}

impl Material {
    /// Create a name-only material.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the texture.
    #[must_use]
    pub fn with_texture(mut self, filename: impl Into<String>) -> Self {
        self.texture_filename = Some(filename.into());
        self
    }

    /// True if the material carries a color or a texture.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.color.is_some() || self.texture_filename.is_some()
    }
}

impl Named for Material {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Link contents
// ============================================================================

/// Mass properties from `<inertial>`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inertial {
    /// Center-of-mass frame relative to the link frame.
    pub origin: Transform,
    /// Mass in kg.
    pub mass: f64,
    /// Moment of inertia about X.
    pub ixx: f64,
    /// Product of inertia XY.
    pub ixy: f64,
    /// Product of inertia XZ.
    pub ixz: f64,
    /// Moment of inertia about Y.
    pub iyy: f64,
    /// Product of inertia YZ.
    pub iyz: f64,
    /// Moment of inertia about Z.
    pub izz: f64,
}

impl Inertial {
    /// The symmetric 3x3 inertia tensor.
    #[must_use]
    pub fn inertia_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.ixx, self.ixy, self.ixz, self.ixy, self.iyy, self.iyz, self.ixz, self.iyz,
            self.izz,
        )
    }
}

/// Visual properties from `<visual>`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Visual {
    /// Optional name, empty when absent.
    pub name: String,
    /// Origin relative to the link frame.
    pub origin: Transform,
    /// Shape, if a `<geometry>` was given.
    pub geometry: Option<Geometry>,
    /// Referenced material name, empty when absent.
    pub material_name: String,
    /// Inline material before assembly, the registry entry after.
    pub material: Option<Material>,
}

/// Collision properties from `<collision>`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Collision {
    /// Optional name, empty when absent.
    pub name: String,
    /// Origin relative to the link frame.
    pub origin: Transform,
    /// Shape, if a `<geometry>` was given.
    pub geometry: Option<Geometry>,
}

// ============================================================================
// Link
// ============================================================================

/// A rigid body from `<link>`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Link {
    /// Link name (unique within a model).
    pub name: String,
    /// Mass properties; `None` for massless frame links.
    pub inertial: Option<Inertial>,
    /// Collision geometries in document order.
    pub collisions: Vec<Collision>,
    /// Visual geometries in document order.
    pub visuals: Vec<Visual>,
    pub(crate) parent_joint: Option<String>,
    pub(crate) parent_link: Option<String>,
    pub(crate) child_joints: Vec<String>,
    pub(crate) child_links: Vec<String>,
    pub(crate) link_index: Option<usize>,
}

impl Link {
    /// Create a link with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inertial: None,
            collisions: Vec::new(),
            visuals: Vec::new(),
            parent_joint: None,
            parent_link: None,
            child_joints: Vec::new(),
            child_links: Vec::new(),
            link_index: None,
        }
    }

    /// Name of the joint connecting this link to its parent.
    pub fn parent_joint_name(&self) -> Option<&str> {
        self.parent_joint.as_deref()
    }

    /// Name of the parent link.
    pub fn parent_link_name(&self) -> Option<&str> {
        self.parent_link.as_deref()
    }

    /// Names of joints that have this link as parent.
    pub fn child_joint_names(&self) -> &[String] {
        &self.child_joints
    }

    /// Names of links attached below this one.
    pub fn child_link_names(&self) -> &[String] {
        &self.child_links
    }

    /// Depth-first position from the root, set during assembly.
    pub fn link_index(&self) -> Option<usize> {
        self.link_index
    }

    /// True if this link has no parent joint.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_joint.is_none()
    }

    /// True if this link carries no mass properties.
    #[must_use]
    pub fn is_massless(&self) -> bool {
        self.inertial.is_none()
    }
}

impl Named for Link {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Joint
// ============================================================================

/// Joint type from the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointType {
    /// Not yet determined.
    #[default]
    Unknown,
    /// Rotation about the axis with limits.
    Revolute,
    /// Unlimited rotation about the axis.
    Continuous,
    /// Translation along the axis.
    Prismatic,
    /// Six degrees of freedom.
    Floating,
    /// Motion in the plane normal to the axis.
    Planar,
    /// Rigid attachment.
    Fixed,
}

impl JointType {
    /// Parse a joint type attribute. Returns `None` for unrecognized strings.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "revolute" => Some(Self::Revolute),
            "continuous" => Some(Self::Continuous),
            "prismatic" => Some(Self::Prismatic),
            "floating" => Some(Self::Floating),
            "planar" => Some(Self::Planar),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }

    /// Degrees of freedom for this joint type.
    #[must_use]
    pub fn dof(&self) -> usize {
        match self {
            Self::Unknown | Self::Fixed => 0,
            Self::Revolute | Self::Continuous | Self::Prismatic => 1,
            Self::Planar => 3,
            Self::Floating => 6,
        }
    }

    /// True if the `<axis>` element is meaningful for this type.
    #[must_use]
    pub fn uses_axis(&self) -> bool {
        !matches!(self, Self::Floating | Self::Fixed)
    }
}

/// `<dynamics>`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointDynamics {
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Static (Coulomb) friction.
    pub friction: f64,
}

/// `<limit>`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointLimits {
    /// Lower position limit (rad or m).
    pub lower: f64,
    /// Upper position limit (rad or m).
    pub upper: f64,
    /// Maximum effort (N or Nm).
    pub effort: f64,
    /// Maximum velocity (rad/s or m/s).
    pub velocity: f64,
}

/// `<safety_controller>`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointSafety {
    /// Upper soft limit.
    pub upper_limit: f64,
    /// Lower soft limit.
    pub lower_limit: f64,
    /// Position gain of the safety controller.
    pub k_position: f64,
    /// Velocity gain of the safety controller.
    pub k_velocity: f64,
}

/// `<calibration>`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointCalibration {
    /// Rising-edge reference position.
    pub rising: Option<f64>,
    /// Falling-edge reference position.
    pub falling: Option<f64>,
}

/// `<mimic>`: `position = multiplier * other + offset`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointMimic {
    /// Name of the mimicked joint.
    pub joint_name: String,
    /// Additive offset.
    pub offset: f64,
    /// Scale factor.
    pub multiplier: f64,
}

/// A joint connecting a parent link to a child link.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Joint {
    /// Joint name (unique within a model).
    pub name: String,
    /// Joint type.
    pub joint_type: JointType,
    /// Joint axis in the joint frame, (1, 0, 0) by default.
    pub axis: Vector3,
    /// Child link name, empty if unspecified.
    pub child_link_name: String,
    /// Parent link name, empty if unspecified.
    pub parent_link_name: String,
    /// Joint frame relative to the parent link frame.
    pub parent_to_joint_transform: Transform,
    /// `<dynamics>`.
    pub dynamics: Option<JointDynamics>,
    /// `<limit>`.
    pub limits: Option<JointLimits>,
    /// `<safety_controller>`.
    pub safety: Option<JointSafety>,
    /// `<calibration>`.
    pub calibration: Option<JointCalibration>,
    /// `<mimic>`.
    pub mimic: Option<JointMimic>,
}

impl Joint {
    /// Create a joint between two links.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        joint_type: JointType,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type,
            axis: Vector3::x_axis(),
            child_link_name: child.into(),
            parent_link_name: parent.into(),
            parent_to_joint_transform: Transform::identity(),
            dynamics: None,
            limits: None,
            safety: None,
            calibration: None,
            mimic: None,
        }
    }

    /// Set the joint origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Transform) -> Self {
        self.parent_to_joint_transform = origin;
        self
    }
}

impl Named for Joint {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inertia_to_matrix() {
        let inertial = Inertial {
            mass: 1.0,
            ixx: 1.0,
            ixy: 0.1,
            ixz: 0.2,
            iyy: 2.0,
            iyz: 0.3,
            izz: 3.0,
            ..Default::default()
        };
        let m = inertial.inertia_matrix();
        assert_relative_eq!(m[(0, 0)], 1.0, epsilon = 1e-10);
        assert_relative_eq!(m[(0, 1)], 0.1, epsilon = 1e-10);
        assert_relative_eq!(m[(1, 0)], 0.1, epsilon = 1e-10); // Symmetric
        assert_relative_eq!(m[(2, 1)], 0.3, epsilon = 1e-10);
        assert_relative_eq!(m[(2, 2)], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_joint_type_dof() {
        assert_eq!(JointType::Fixed.dof(), 0);
        assert_eq!(JointType::Revolute.dof(), 1);
        assert_eq!(JointType::Continuous.dof(), 1);
        assert_eq!(JointType::Prismatic.dof(), 1);
        assert_eq!(JointType::Planar.dof(), 3);
        assert_eq!(JointType::Floating.dof(), 6);
    }

    #[test]
    fn test_joint_type_from_str() {
        assert_eq!(JointType::from_str("revolute"), Some(JointType::Revolute));
        assert_eq!(JointType::from_str("planar"), Some(JointType::Planar));
        assert_eq!(JointType::from_str("Revolute"), None);
        assert_eq!(JointType::from_str("unknown"), None);
        assert!(!JointType::Fixed.uses_axis());
        assert!(JointType::Planar.uses_axis());
    }

    #[test]
    fn test_joint_defaults() {
        let joint = Joint::new("j", JointType::Revolute, "a", "b");
        assert_eq!(joint.axis, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(joint.parent_to_joint_transform, Transform::identity());
        assert!(joint.limits.is_none());
        assert!(joint.mimic.is_none());
    }

    #[test]
    fn test_material_defined() {
        assert!(!Material::new("grey").is_defined());
        assert!(Material::new("grey").with_texture("grey.png").is_defined());
        assert!(
            Material::new("grey")
                .with_color(Color::new(0.5, 0.5, 0.5, 1.0))
                .is_defined()
        );
    }

    #[test]
    fn test_geometry_constructors() {
        assert_eq!(Geometry::sphere(0.5).type_name(), "sphere");
        match Geometry::mesh("arm.stl") {
            Geometry::Mesh { filename, scale } => {
                assert_eq!(filename, "arm.stl");
                assert_eq!(scale, Vector3::new(1.0, 1.0, 1.0));
            }
            other => panic!("expected mesh, got {other:?}"),
        }
    }

    #[test]
    fn test_new_link_is_unassembled() {
        let link = Link::new("base");
        assert!(link.is_root());
        assert!(link.is_massless());
        assert_eq!(link.link_index(), None);
        assert!(link.child_link_names().is_empty());
    }
}
