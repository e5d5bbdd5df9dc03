//! `<material>` builder.

use crate::codec::parse_color;
use crate::error::{Result, ResultExt, UrdfError};
use crate::types::Material;
use crate::xml::XmlElement;

/// Decode a `<material>` element.
///
/// With `relaxed` set (a material nested in a `<visual>`), a name-only
/// element is accepted as a reference to be resolved against the model's
/// materials. Top-level declarations are parsed with `relaxed == false` and
/// must carry a color or a texture.
///
/// A `<texture>` without `filename` or a `<color>` without `rgba` counts as
/// absent.
///
/// # Errors
///
/// - [`UrdfError::MissingAttribute`] without a `name`
/// - [`UrdfError::IncompleteMaterial`] for a strict material with neither
/// - codec errors from `rgba`
pub fn parse_material(element: &XmlElement, relaxed: bool) -> Result<Material> {
    let name = element
        .attribute("name")
        .ok_or_else(|| UrdfError::missing_attribute("name", "material"))?;

    build_material(element, name, relaxed).in_material(name)
}

fn build_material(element: &XmlElement, name: &str, relaxed: bool) -> Result<Material> {
    let mut material = Material::new(name);

    if let Some(filename) = element.child("texture").and_then(|t| t.attribute("filename")) {
        material.texture_filename = Some(filename.to_string());
    }

    if let Some(rgba) = element.child("color").and_then(|c| c.attribute("rgba")) {
        material.color = Some(parse_color(rgba).at_attribute("color", "rgba")?);
    }

    if !relaxed && !material.is_defined() {
        return Err(UrdfError::IncompleteMaterial(name.to_string()));
    }

    Ok(material)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Location};
    use crate::math::Color;
    use crate::xml::parse_document;

    fn material(xml: &str, relaxed: bool) -> Result<Material> {
        let element = parse_document(xml).expect("well-formed");
        parse_material(&element, relaxed)
    }

    #[test]
    fn test_color_material() {
        let m = material(
            r#"<material name="Grey"><color rgba="0.2 0.2 0.2 1.0"/></material>"#,
            false,
        )
        .unwrap();
        assert_eq!(m.name, "Grey");
        assert_eq!(m.color, Some(Color::new(0.2, 0.2, 0.2, 1.0)));
        assert_eq!(m.texture_filename, None);
    }

    #[test]
    fn test_texture_and_color() {
        let m = material(
            r#"<material name="wood">
                <texture filename="wood.png"/>
                <color rgba="1 1 1 1"/>
            </material>"#,
            false,
        )
        .unwrap();
        assert_eq!(m.texture_filename.as_deref(), Some("wood.png"));
        assert!(m.color.is_some());
    }

    #[test]
    fn test_bare_texture_falls_back_to_color() {
        let m = material(
            r#"<material name="steel">
                <texture/>
                <color rgba="0.5 0.5 0.5 1"/>
            </material>"#,
            false,
        )
        .unwrap();
        assert_eq!(m.texture_filename, None);
        assert_eq!(m.color, Some(Color::new(0.5, 0.5, 0.5, 1.0)));
    }

    #[test]
    fn test_bare_children_define_nothing() {
        let err = material(r#"<material name="steel"><texture/><color/></material>"#, false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteMaterial);

        let m = material(r#"<material name="steel"><texture/></material>"#, true).unwrap();
        assert!(!m.is_defined());
    }

    #[test]
    fn test_strict_requires_color_or_texture() {
        let err = material(r#"<material name="Grey"/>"#, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteMaterial);
        assert!(err.to_string().contains("Grey"));
    }

    #[test]
    fn test_relaxed_allows_name_only() {
        let m = material(r#"<material name="Grey"/>"#, true).unwrap();
        assert_eq!(m, Material::new("Grey"));
        assert!(!m.is_defined());
    }

    #[test]
    fn test_missing_name() {
        let err = material(r#"<material><color rgba="1 0 0 1"/></material>"#, true).unwrap_err();
        assert!(matches!(
            err,
            UrdfError::MissingAttribute {
                attribute: "name",
                ..
            }
        ));
    }

    #[test]
    fn test_color_error_has_context() {
        let err = material(
            r#"<material name="red"><color rgba="1 0 0"/></material>"#,
            false,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ColorArity);
        assert_eq!(
            err.locations().first(),
            Some(&&Location::Material("red".into()))
        );
    }
}
