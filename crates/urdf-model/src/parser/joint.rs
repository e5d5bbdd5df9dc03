//! `<joint>` builder and its optional sub-elements.

use tracing::trace;

use crate::codec::parse_vector3;
use crate::error::{Result, ResultExt, UrdfError};
use crate::math::Vector3;
use crate::types::{
    Joint, JointCalibration, JointDynamics, JointLimits, JointMimic, JointSafety, JointType,
};
use crate::xml::XmlElement;

use super::{optional_f64, parse_origin, required_f64};

/// Decode `<dynamics damping=".." friction=".."/>`.
///
/// # Errors
///
/// [`UrdfError::EmptyDynamics`] if neither attribute is present.
pub fn parse_dynamics(element: &XmlElement) -> Result<JointDynamics> {
    let damping = optional_f64(element, "damping")?;
    let friction = optional_f64(element, "friction")?;

    if damping.is_none() && friction.is_none() {
        return Err(UrdfError::EmptyDynamics);
    }

    Ok(JointDynamics {
        damping: damping.unwrap_or(0.0),
        friction: friction.unwrap_or(0.0),
    })
}

/// Decode `<limit lower upper effort velocity/>`.
///
/// # Errors
///
/// [`UrdfError::MissingLimitAttribute`] when `effort` or `velocity` is absent.
pub fn parse_limits(element: &XmlElement) -> Result<JointLimits> {
    let lower = optional_f64(element, "lower")?.unwrap_or(0.0);
    let upper = optional_f64(element, "upper")?.unwrap_or(0.0);
    let effort = required_f64(element, "effort", || UrdfError::MissingLimitAttribute {
        attribute: "effort",
    })?;
    let velocity = required_f64(element, "velocity", || UrdfError::MissingLimitAttribute {
        attribute: "velocity",
    })?;

    Ok(JointLimits {
        lower,
        upper,
        effort,
        velocity,
    })
}

/// Decode `<safety_controller upper_limit lower_limit k_position k_velocity/>`.
///
/// # Errors
///
/// [`UrdfError::MissingSafetyAttribute`] when `k_velocity` is absent.
pub fn parse_safety(element: &XmlElement) -> Result<JointSafety> {
    let upper_limit = optional_f64(element, "upper_limit")?.unwrap_or(0.0);
    let lower_limit = optional_f64(element, "lower_limit")?.unwrap_or(0.0);
    let k_position = optional_f64(element, "k_position")?.unwrap_or(0.0);
    let k_velocity = required_f64(element, "k_velocity", || {
        UrdfError::MissingSafetyAttribute {
            attribute: "k_velocity",
        }
    })?;

    Ok(JointSafety {
        upper_limit,
        lower_limit,
        k_position,
        k_velocity,
    })
}

/// Decode `<calibration rising=".." falling=".."/>`. Both are optional.
pub fn parse_calibration(element: &XmlElement) -> Result<JointCalibration> {
    Ok(JointCalibration {
        rising: optional_f64(element, "rising")?,
        falling: optional_f64(element, "falling")?,
    })
}

/// Decode `<mimic joint=".." multiplier=".." offset=".."/>`.
///
/// # Errors
///
/// [`UrdfError::MissingMimicTarget`] without a `joint` attribute.
pub fn parse_mimic(element: &XmlElement) -> Result<JointMimic> {
    let joint_name = element
        .attribute("joint")
        .ok_or(UrdfError::MissingMimicTarget)?;

    Ok(JointMimic {
        joint_name: joint_name.to_string(),
        offset: optional_f64(element, "offset")?.unwrap_or(0.0),
        multiplier: optional_f64(element, "multiplier")?.unwrap_or(0.0),
    })
}

/// Decode a `<joint>` element.
///
/// The origin is decoded before the type is looked at. Parent and child link
/// names default to empty strings; the assembler reports them as missing.
/// Errors are wrapped with the joint name.
///
/// # Errors
///
/// - [`UrdfError::UnnamedJoint`] without a `name`
/// - [`UrdfError::MissingAttribute`] without a `type`
/// - [`UrdfError::UnknownJointType`] for an unrecognized `type`
/// - any error from the sub-element builders
pub fn parse_joint(element: &XmlElement) -> Result<Joint> {
    let name = element.attribute("name").ok_or(UrdfError::UnnamedJoint)?;
    trace!(joint = name, "parsing joint");

    build_joint(element, name).in_joint(name)
}

fn build_joint(element: &XmlElement, name: &str) -> Result<Joint> {
    let origin = parse_origin(element.child("origin"))?;
    let parent = link_reference(element, "parent");
    let child = link_reference(element, "child");

    let type_name = element
        .attribute("type")
        .ok_or_else(|| UrdfError::missing_attribute("type", "joint"))?;
    let joint_type =
        JointType::from_str(type_name).ok_or_else(|| UrdfError::UnknownJointType {
            joint: name.to_string(),
            type_name: type_name.to_string(),
        })?;

    let mut joint = Joint::new(name, joint_type, parent, child).with_origin(origin);

    if joint_type.uses_axis() {
        joint.axis = parse_axis(element.child("axis"))?;
    }

    joint.dynamics = element.child("dynamics").map(parse_dynamics).transpose()?;
    joint.limits = element.child("limit").map(parse_limits).transpose()?;
    joint.safety = element
        .child("safety_controller")
        .map(parse_safety)
        .transpose()?;
    joint.calibration = element
        .child("calibration")
        .map(parse_calibration)
        .transpose()?;
    joint.mimic = element.child("mimic").map(parse_mimic).transpose()?;

    Ok(joint)
}

/// `link` attribute of `<parent>` or `<child>`, empty when absent.
fn link_reference<'a>(element: &'a XmlElement, tag: &str) -> &'a str {
    element
        .child(tag)
        .and_then(|e| e.attribute("link"))
        .unwrap_or_default()
}

fn parse_axis(element: Option<&XmlElement>) -> Result<Vector3> {
    match element.and_then(|e| e.attribute("xyz")) {
        Some(xyz) => parse_vector3(xyz).at_attribute("axis", "xyz"),
        None => Ok(Vector3::x_axis()),
    }
}
