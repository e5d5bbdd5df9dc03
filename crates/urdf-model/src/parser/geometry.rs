//! `<geometry>` builder.

use crate::codec::parse_vector3;
use crate::error::{Result, ResultExt, UrdfError};
use crate::math::Vector3;
use crate::types::Geometry;
use crate::xml::XmlElement;

use super::attribute_f64;

/// Decode a `<geometry>` element.
///
/// The shape is taken from the first child element. `link` is only used to
/// label [`UrdfError::EmptyGeometry`] and [`UrdfError::UnknownGeometryType`].
///
/// # Errors
///
/// - [`UrdfError::EmptyGeometry`] if there is no shape child
/// - [`UrdfError::UnknownGeometryType`] for an unrecognized tag
/// - [`UrdfError::MissingAttribute`] or a codec error for the shape attributes
pub fn parse_geometry(element: &XmlElement, link: &str) -> Result<Geometry> {
    let shape = element.first_child().ok_or_else(|| UrdfError::EmptyGeometry {
        link: link.to_string(),
    })?;

    match shape.name() {
        "sphere" => Ok(Geometry::Sphere {
            radius: attribute_f64(shape, "radius")?,
        }),
        "box" => {
            let size = shape
                .attribute("size")
                .ok_or_else(|| UrdfError::missing_attribute("size", "box"))?;
            Ok(Geometry::Box {
                dim: parse_vector3(size).at_attribute("box", "size")?,
            })
        }
        "cylinder" => {
            let length = attribute_f64(shape, "length")?;
            let radius = attribute_f64(shape, "radius")?;
            Ok(Geometry::Cylinder { length, radius })
        }
        "capsule" => {
            let length = attribute_f64(shape, "length")?;
            let radius = attribute_f64(shape, "radius")?;
            Ok(Geometry::Capsule { length, radius })
        }
        "mesh" => {
            let filename = shape
                .attribute("filename")
                .ok_or_else(|| UrdfError::missing_attribute("filename", "mesh"))?;
            let scale = match shape.attribute("scale") {
                Some(scale) => parse_vector3(scale).at_attribute("mesh", "scale")?,
                None => Vector3::new(1.0, 1.0, 1.0),
            };
            Ok(Geometry::Mesh {
                filename: filename.to_string(),
                scale,
            })
        }
        other => Err(UrdfError::UnknownGeometryType {
            shape: other.to_string(),
            link: link.to_string(),
        }),
    }
}
