//! Element builders.
//!
//! Each builder turns one element subtree into a record such as
//! [`Link`](crate::Link) or [`Joint`](crate::Joint). Builders only read
//! their own element; they never see other links, joints or the material
//! registry. Cross references are resolved later by the assembler.

mod geometry;
mod joint;
mod link;
mod material;

pub use geometry::parse_geometry;
pub use joint::{
    parse_calibration, parse_dynamics, parse_joint, parse_limits, parse_mimic, parse_safety,
};
pub use link::{parse_collision, parse_inertial, parse_link, parse_visual};
pub use material::parse_material;

use crate::codec::{parse_double, parse_rpy, parse_vector3};
use crate::error::{Result, ResultExt, UrdfError};
use crate::math::{Rotation, Transform, Vector3};
use crate::xml::XmlElement;

/// Decode an `<origin xyz=".." rpy=".."/>` element.
///
/// Both attributes are optional; an absent element is the identity.
///
/// # Errors
///
/// Codec errors from either attribute, tagged with the attribute name.
pub fn parse_origin(element: Option<&XmlElement>) -> Result<Transform> {
    let Some(element) = element else {
        return Ok(Transform::identity());
    };

    let position = match element.attribute("xyz") {
        Some(xyz) => parse_vector3(xyz).at_attribute(element.name(), "xyz")?,
        None => Vector3::zeros(),
    };
    let rotation = match element.attribute("rpy") {
        Some(rpy) => parse_rpy(rpy).at_attribute(element.name(), "rpy")?,
        None => Rotation::identity(),
    };

    Ok(Transform::new(position, rotation))
}

/// Optional numeric attribute.
fn optional_f64(element: &XmlElement, attribute: &'static str) -> Result<Option<f64>> {
    element
        .attribute(attribute)
        .map(|text| parse_double(text).at_attribute(element.name(), attribute))
        .transpose()
}

/// Numeric attribute that must be present; `missing` builds the error otherwise.
fn required_f64(
    element: &XmlElement,
    attribute: &'static str,
    missing: impl FnOnce() -> UrdfError,
) -> Result<f64> {
    optional_f64(element, attribute)?.ok_or_else(missing)
}

/// Numeric attribute whose absence is a plain [`UrdfError::MissingAttribute`].
fn attribute_f64(element: &XmlElement, attribute: &'static str) -> Result<f64> {
    required_f64(element, attribute, || {
        UrdfError::missing_attribute(attribute, element.name())
    })
}
