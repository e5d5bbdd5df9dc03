//! Error types for URDF parsing and model assembly.
//!
//! Every failure is a single [`UrdfError`]. Builders raise the most specific
//! variant they can; callers add positional context by wrapping it in
//! [`UrdfError::At`] (see [`ResultExt`]). Wrapping never changes
//! [`UrdfError::kind`].

use std::fmt;

use thiserror::Error;

/// Errors that can occur during URDF parsing and model assembly.
#[derive(Debug, Error)]
pub enum UrdfError {
    /// The input is not well-formed XML, or the root element is not `<robot>`.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Missing required attribute.
    #[error("missing required attribute: {attribute} on <{element}>")]
    MissingAttribute {
        /// The missing attribute name.
        attribute: &'static str,
        /// The element that should have the attribute.
        element: String,
    },

    /// Missing required element.
    #[error("missing required element: <{element}> in <{context}>")]
    MissingElement {
        /// The missing element name.
        element: &'static str,
        /// Where the element was expected.
        context: String,
    },

    /// Text that is not a numeral of the target width.
    #[error("'{value}' is not a valid {target}")]
    NumberFormat {
        /// The offending text.
        value: String,
        /// Target numeric type (`f64` or `f32`).
        target: &'static str,
    },

    /// A numeral that does not fit the target width.
    #[error("'{value}' is out of range for {target}")]
    NumberRange {
        /// The offending text.
        value: String,
        /// Target numeric type (`f64` or `f32`).
        target: &'static str,
    },

    /// Vector text without exactly three components.
    #[error("expected 3 values in vector, found {found}: [{value}]")]
    VectorArity {
        /// Number of numeric tokens found.
        found: usize,
        /// The offending text.
        value: String,
    },

    /// Color text without exactly four components.
    #[error("expected 4 values (r g b a) in color, found {found}: [{value}]")]
    ColorArity {
        /// Number of numeric tokens found.
        found: usize,
        /// The offending text.
        value: String,
    },

    /// Shape element not in {sphere, box, cylinder, capsule, mesh}.
    #[error("unknown geometry type '{shape}' in link '{link}'")]
    UnknownGeometryType {
        /// The unrecognized shape tag.
        shape: String,
        /// Enclosing link.
        link: String,
    },

    /// `<geometry>` without any shape child.
    #[error("geometry in link '{link}' does not contain any shape")]
    EmptyGeometry {
        /// Enclosing link.
        link: String,
    },

    /// Top-level material with neither color nor texture.
    #[error("material '{0}' has neither a texture nor a color")]
    IncompleteMaterial(String),

    /// Visual material reference that never resolves.
    #[error("material '{material}' used in link '{link}' is undefined")]
    UndefinedMaterial {
        /// The referenced material name.
        material: String,
        /// The link whose visual references it.
        link: String,
    },

    /// Duplicate material name.
    #[error("duplicate material name: {0}")]
    DuplicateMaterial(String),

    /// `<inertia>` with some of the six tensor components missing.
    #[error("inertia tensor is missing component(s): {}", .missing.join(", "))]
    IncompleteInertiaTensor {
        /// Names of the missing components.
        missing: Vec<&'static str>,
    },

    /// `<link>` without a `name` attribute.
    #[error("link without a name attribute")]
    UnnamedLink,

    /// Duplicate link name.
    #[error("duplicate link name: {0}")]
    DuplicateLink(String),

    /// The document declares no links at all.
    #[error("no link elements found in the document")]
    NoLinksDefined,

    /// `<joint>` without a `name` attribute.
    #[error("joint without a name attribute")]
    UnnamedJoint,

    /// Joint type string not in the known set.
    #[error("joint '{joint}' has unknown type '{type_name}'")]
    UnknownJointType {
        /// The joint name.
        joint: String,
        /// The offending type string.
        type_name: String,
    },

    /// Duplicate joint name.
    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// Joint without a parent link name.
    #[error("joint '{joint}' is missing a parent link specification")]
    MissingParentSpec {
        /// The joint name.
        joint: String,
    },

    /// Joint without a child link name.
    #[error("joint '{joint}' is missing a child link specification")]
    MissingChildSpec {
        /// The joint name.
        joint: String,
    },

    /// Parent link name that is not declared.
    #[error("parent link '{link}' of joint '{joint}' not found")]
    UnknownParentLink {
        /// The referenced link name.
        link: String,
        /// The joint that referenced it.
        joint: String,
    },

    /// Child link name that is not declared.
    #[error("child link '{link}' of joint '{joint}' not found")]
    UnknownChildLink {
        /// The referenced link name.
        link: String,
        /// The joint that referenced it.
        joint: String,
    },

    /// A link claimed as child by two joints.
    #[error("link '{link}' has multiple parent joints: '{first_joint}' and '{second_joint}'")]
    MultipleParentsFound {
        /// The link with two parents.
        link: String,
        /// The joint that claimed it first.
        first_joint: String,
        /// The joint that claimed it second.
        second_joint: String,
    },

    /// Joints forming a closed chain.
    #[error("kinematic cycle detected involving link '{link}'")]
    CycleDetected {
        /// A link on the cycle.
        link: String,
    },

    /// `<dynamics>` with neither damping nor friction.
    #[error("joint dynamics specified with no damping and no friction")]
    EmptyDynamics,

    /// `<limit>` without effort or velocity.
    #[error("joint limit has no {attribute} specified")]
    MissingLimitAttribute {
        /// `effort` or `velocity`.
        attribute: &'static str,
    },

    /// `<safety_controller>` without `k_velocity`.
    #[error("joint safety controller has no {attribute} specified")]
    MissingSafetyAttribute {
        /// The missing attribute.
        attribute: &'static str,
    },

    /// `<mimic>` without a `joint` attribute.
    #[error("joint mimic has no target joint specified")]
    MissingMimicTarget,

    /// Every link is somebody's child.
    #[error("no root link found (all links are children of joints)")]
    NoRootFound,

    /// More than one link without a parent.
    #[error("multiple root links found: '{first}' and '{second}'")]
    MultipleRootsFound {
        /// First root candidate in document order.
        first: String,
        /// Second root candidate in document order.
        second: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error with positional context.
    ///
    /// The wrapped error is part of the message and is not reported again
    /// through [`std::error::Error::source`].
    #[error("{location}: {inner}")]
    At {
        /// Where the inner error occurred.
        location: Location,
        /// The wrapped error.
        inner: Box<UrdfError>,
    },
}

/// Discriminant of a [`UrdfError`], independent of context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`UrdfError::MalformedDocument`].
    MalformedDocument,
    /// See [`UrdfError::MissingAttribute`].
    MissingAttribute,
    /// See [`UrdfError::MissingElement`].
    MissingElement,
    /// See [`UrdfError::NumberFormat`].
    NumberFormat,
    /// See [`UrdfError::NumberRange`].
    NumberRange,
    /// See [`UrdfError::VectorArity`].
    VectorArity,
    /// See [`UrdfError::ColorArity`].
    ColorArity,
    /// See [`UrdfError::UnknownGeometryType`].
    UnknownGeometryType,
    /// See [`UrdfError::EmptyGeometry`].
    EmptyGeometry,
    /// See [`UrdfError::IncompleteMaterial`].
    IncompleteMaterial,
    /// See [`UrdfError::UndefinedMaterial`].
    UndefinedMaterial,
    /// See [`UrdfError::DuplicateMaterial`].
    DuplicateMaterial,
    /// See [`UrdfError::IncompleteInertiaTensor`].
    IncompleteInertiaTensor,
    /// See [`UrdfError::UnnamedLink`].
    UnnamedLink,
    /// See [`UrdfError::DuplicateLink`].
    DuplicateLink,
    /// See [`UrdfError::NoLinksDefined`].
    NoLinksDefined,
    /// See [`UrdfError::UnnamedJoint`].
    UnnamedJoint,
    /// See [`UrdfError::UnknownJointType`].
    UnknownJointType,
    /// See [`UrdfError::DuplicateJoint`].
    DuplicateJoint,
    /// See [`UrdfError::MissingParentSpec`].
    MissingParentSpec,
    /// See [`UrdfError::MissingChildSpec`].
    MissingChildSpec,
    /// See [`UrdfError::UnknownParentLink`].
    UnknownParentLink,
    /// See [`UrdfError::UnknownChildLink`].
    UnknownChildLink,
    /// See [`UrdfError::MultipleParentsFound`].
    MultipleParentsFound,
    /// See [`UrdfError::CycleDetected`].
    CycleDetected,
    /// See [`UrdfError::EmptyDynamics`].
    EmptyDynamics,
    /// See [`UrdfError::MissingLimitAttribute`].
    MissingLimitAttribute,
    /// See [`UrdfError::MissingSafetyAttribute`].
    MissingSafetyAttribute,
    /// See [`UrdfError::MissingMimicTarget`].
    MissingMimicTarget,
    /// See [`UrdfError::NoRootFound`].
    NoRootFound,
    /// See [`UrdfError::MultipleRootsFound`].
    MultipleRootsFound,
    /// See [`UrdfError::Io`].
    Io,
}

/// A context frame attached by [`UrdfError::At`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Inside the named link.
    Link(String),
    /// Inside the named joint.
    Joint(String),
    /// Inside the named material.
    Material(String),
    /// While decoding one attribute of one element.
    Attribute {
        /// Element tag.
        element: String,
        /// Attribute name.
        attribute: &'static str,
    },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(name) => write!(f, "in link '{name}'"),
            Self::Joint(name) => write!(f, "in joint '{name}'"),
            Self::Material(name) => write!(f, "in material '{name}'"),
            Self::Attribute { element, attribute } => {
                write!(f, "in attribute '{attribute}' of <{element}>")
            }
        }
    }
}

impl UrdfError {
    /// Create a malformed document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }

    /// Create a missing element error.
    pub fn missing_element(element: &'static str, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element,
            context: context.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(attribute: &'static str, element: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute,
            element: element.into(),
        }
    }

    /// Wrap this error with a context frame.
    #[must_use]
    pub fn at(self, location: Location) -> Self {
        Self::At {
            location,
            inner: Box::new(self),
        }
    }

    /// The innermost error, with all context frames stripped.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::At { inner, .. } => inner.root_cause(),
            other => other,
        }
    }

    /// Context frames from outermost to innermost.
    pub fn locations(&self) -> Vec<&Location> {
        let mut out = Vec::new();
        let mut current = self;
        while let Self::At { location, inner } = current {
            out.push(location);
            current = inner;
        }
        out
    }

    /// The error kind. Context wrapping is transparent.
    pub fn kind(&self) -> ErrorKind {
        match self.root_cause() {
            Self::MalformedDocument(_) => ErrorKind::MalformedDocument,
            Self::MissingAttribute { .. } => ErrorKind::MissingAttribute,
            Self::MissingElement { .. } => ErrorKind::MissingElement,
            Self::NumberFormat { .. } => ErrorKind::NumberFormat,
            Self::NumberRange { .. } => ErrorKind::NumberRange,
            Self::VectorArity { .. } => ErrorKind::VectorArity,
            Self::ColorArity { .. } => ErrorKind::ColorArity,
            Self::UnknownGeometryType { .. } => ErrorKind::UnknownGeometryType,
            Self::EmptyGeometry { .. } => ErrorKind::EmptyGeometry,
            Self::IncompleteMaterial(_) => ErrorKind::IncompleteMaterial,
            Self::UndefinedMaterial { .. } => ErrorKind::UndefinedMaterial,
            Self::DuplicateMaterial(_) => ErrorKind::DuplicateMaterial,
            Self::IncompleteInertiaTensor { .. } => ErrorKind::IncompleteInertiaTensor,
            Self::UnnamedLink => ErrorKind::UnnamedLink,
            Self::DuplicateLink(_) => ErrorKind::DuplicateLink,
            Self::NoLinksDefined => ErrorKind::NoLinksDefined,
            Self::UnnamedJoint => ErrorKind::UnnamedJoint,
            Self::UnknownJointType { .. } => ErrorKind::UnknownJointType,
            Self::DuplicateJoint(_) => ErrorKind::DuplicateJoint,
            Self::MissingParentSpec { .. } => ErrorKind::MissingParentSpec,
            Self::MissingChildSpec { .. } => ErrorKind::MissingChildSpec,
            Self::UnknownParentLink { .. } => ErrorKind::UnknownParentLink,
            Self::UnknownChildLink { .. } => ErrorKind::UnknownChildLink,
            Self::MultipleParentsFound { .. } => ErrorKind::MultipleParentsFound,
            Self::CycleDetected { .. } => ErrorKind::CycleDetected,
            Self::EmptyDynamics => ErrorKind::EmptyDynamics,
            Self::MissingLimitAttribute { .. } => ErrorKind::MissingLimitAttribute,
            Self::MissingSafetyAttribute { .. } => ErrorKind::MissingSafetyAttribute,
            Self::MissingMimicTarget => ErrorKind::MissingMimicTarget,
            Self::NoRootFound => ErrorKind::NoRootFound,
            Self::MultipleRootsFound { .. } => ErrorKind::MultipleRootsFound,
            Self::Io(_) => ErrorKind::Io,
            // root_cause never returns a wrapper
            Self::At { inner, .. } => inner.kind(),
        }
    }

    /// Name of the nearest enclosing link, if any is known.
    pub fn link_name(&self) -> Option<&str> {
        match self {
            Self::At {
                location: Location::Link(name),
                inner,
            } => inner.link_name().or(Some(name.as_str())),
            Self::At { inner, .. } => inner.link_name(),
            Self::UnknownGeometryType { link, .. }
            | Self::EmptyGeometry { link }
            | Self::UndefinedMaterial { link, .. }
            | Self::MultipleParentsFound { link, .. }
            | Self::CycleDetected { link } => Some(link.as_str()),
            Self::DuplicateLink(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Name of the nearest enclosing joint, if any is known.
    pub fn joint_name(&self) -> Option<&str> {
        match self {
            Self::At {
                location: Location::Joint(name),
                inner,
            } => inner.joint_name().or(Some(name.as_str())),
            Self::At { inner, .. } => inner.joint_name(),
            Self::UnknownJointType { joint, .. }
            | Self::MissingParentSpec { joint }
            | Self::MissingChildSpec { joint }
            | Self::UnknownParentLink { joint, .. }
            | Self::UnknownChildLink { joint, .. } => Some(joint.as_str()),
            Self::DuplicateJoint(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Context attachment for builder results.
///
/// `in_link` and `in_joint` skip the frame when the error already names the
/// same link or joint, so messages never repeat the enclosing name.
pub trait ResultExt<T> {
    /// Attach the enclosing link.
    fn in_link(self, name: &str) -> Result<T>;
    /// Attach the enclosing joint.
    fn in_joint(self, name: &str) -> Result<T>;
    /// Attach the enclosing material.
    fn in_material(self, name: &str) -> Result<T>;
    /// Attach the attribute being decoded.
    fn at_attribute(self, element: &str, attribute: &'static str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn in_link(self, name: &str) -> Result<T> {
        self.map_err(|e| {
            if e.link_name() == Some(name) {
                e
            } else {
                e.at(Location::Link(name.to_string()))
            }
        })
    }

    fn in_joint(self, name: &str) -> Result<T> {
        self.map_err(|e| {
            if e.joint_name() == Some(name) {
                e
            } else {
                e.at(Location::Joint(name.to_string()))
            }
        })
    }

    fn in_material(self, name: &str) -> Result<T> {
        self.map_err(|e| e.at(Location::Material(name.to_string())))
    }

    fn at_attribute(self, element: &str, attribute: &'static str) -> Result<T> {
        self.map_err(|e| {
            e.at(Location::Attribute {
                element: element.to_string(),
                attribute,
            })
        })
    }
}

/// Result type for URDF operations.
pub type Result<T> = std::result::Result<T, UrdfError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn number_format() -> UrdfError {
        UrdfError::NumberFormat {
            value: "abc".into(),
            target: "f64",
        }
    }

    #[test]
    fn test_missing_attribute() {
        let err = UrdfError::missing_attribute("name", "link");
        assert!(err.to_string().contains("name"));
        assert!(err.to_string().contains("link"));
        assert_eq!(err.kind(), ErrorKind::MissingAttribute);
    }

    #[test]
    fn test_missing_element() {
        let err = UrdfError::missing_element("mass", "inertial");
        assert!(err.to_string().contains("mass"));
        assert!(err.to_string().contains("inertial"));
    }

    #[test]
    fn test_context_preserves_kind() {
        let result: Result<f64> = Err(number_format());
        let err = result
            .at_attribute("sphere", "radius")
            .in_link("base_link")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NumberFormat);
        assert_eq!(err.link_name(), Some("base_link"));
        assert!(matches!(err.root_cause(), UrdfError::NumberFormat { .. }));

        let msg = err.to_string();
        assert!(msg.contains("base_link"));
        assert!(msg.contains("radius"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_locations_outermost_first() {
        let err = number_format()
            .at(Location::Attribute {
                element: "limit".into(),
                attribute: "lower",
            })
            .at(Location::Joint("elbow".into()));

        let locations = err.locations();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0], &Location::Joint("elbow".into()));
        assert_eq!(err.joint_name(), Some("elbow"));
        assert_eq!(err.link_name(), None);
    }

    #[test]
    fn test_in_link_skips_redundant_frame() {
        let result: Result<()> = Err(UrdfError::EmptyGeometry {
            link: "arm".into(),
        });
        let err = result.in_link("arm").unwrap_err();
        assert!(err.locations().is_empty());
        assert_eq!(err.kind(), ErrorKind::EmptyGeometry);
    }

    #[test]
    fn test_innermost_link_wins() {
        let err = UrdfError::EmptyGeometry {
            link: "inner".into(),
        }
        .at(Location::Link("outer".into()));
        assert_eq!(err.link_name(), Some("inner"));
    }

    #[test]
    fn test_context_message_not_repeated_in_chain() {
        use std::error::Error as _;

        let err = number_format()
            .at(Location::Material("paint".into()))
            .at(Location::Link("base".into()));

        assert!(err.source().is_none());
        assert_eq!(err.to_string().matches("'abc'").count(), 1);
        assert_eq!(
            err.to_string(),
            "in link 'base': in material 'paint': 'abc' is not a valid f64"
        );

        let io = UrdfError::from(std::io::Error::other("disk"));
        assert!(io.source().is_some());
    }

    #[test]
    fn test_incomplete_inertia_lists_components() {
        let err = UrdfError::IncompleteInertiaTensor {
            missing: vec!["ixy", "iyz"],
        };
        assert!(err.to_string().contains("ixy, iyz"));
    }
}
