//! `<link>` builder with its inertial, visual and collision children.

use tracing::trace;

use crate::codec::parse_double;
use crate::error::{Result, ResultExt, UrdfError};
use crate::types::{Collision, Inertial, Link, Visual};
use crate::xml::XmlElement;

use super::{parse_geometry, parse_material, parse_origin};

const INERTIA_COMPONENTS: [&str; 6] = ["ixx", "ixy", "ixz", "iyy", "iyz", "izz"];

/// Decode an `<inertial>` element.
///
/// # Errors
///
/// - [`UrdfError::MissingElement`] without `<mass>` or `<inertia>`
/// - [`UrdfError::MissingAttribute`] for `<mass>` without `value`
/// - [`UrdfError::IncompleteInertiaTensor`] naming absent tensor components
pub fn parse_inertial(element: &XmlElement) -> Result<Inertial> {
    let origin = parse_origin(element.child("origin"))?;

    let mass_element = element
        .child("mass")
        .ok_or_else(|| UrdfError::missing_element("mass", "inertial"))?;
    let mass_text = mass_element
        .attribute("value")
        .ok_or_else(|| UrdfError::missing_attribute("value", "mass"))?;
    let mass = parse_double(mass_text).at_attribute("mass", "value")?;

    let inertia = element
        .child("inertia")
        .ok_or_else(|| UrdfError::missing_element("inertia", "inertial"))?;

    let missing: Vec<&'static str> = INERTIA_COMPONENTS
        .into_iter()
        .filter(|c| inertia.attribute(c).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(UrdfError::IncompleteInertiaTensor { missing });
    }

    let mut values = [0.0; 6];
    for (value, component) in values.iter_mut().zip(INERTIA_COMPONENTS) {
        let text = inertia.attribute(component).unwrap_or_default();
        *value = parse_double(text).at_attribute("inertia", component)?;
    }
    let [ixx, ixy, ixz, iyy, iyz, izz] = values;

    Ok(Inertial {
        origin,
        mass,
        ixx,
        ixy,
        ixz,
        iyy,
        iyz,
        izz,
    })
}

/// Decode a `<visual>` element.
///
/// A nested `<material>` is parsed in relaxed mode: a name-only reference is
/// kept as a placeholder until the assembler binds it.
pub fn parse_visual(element: &XmlElement, link: &str) -> Result<Visual> {
    let mut visual = Visual {
        name: element.attribute("name").unwrap_or_default().to_string(),
        origin: parse_origin(element.child("origin"))?,
        ..Default::default()
    };

    if let Some(geometry) = element.child("geometry") {
        visual.geometry = Some(parse_geometry(geometry, link)?);
    }

    if let Some(material) = element.child("material") {
        let material = parse_material(material, true)?;
        visual.material_name.clone_from(&material.name);
        visual.material = Some(material);
    }

    Ok(visual)
}

/// Decode a `<collision>` element.
pub fn parse_collision(element: &XmlElement, link: &str) -> Result<Collision> {
    let geometry = element
        .child("geometry")
        .map(|g| parse_geometry(g, link))
        .transpose()?;

    Ok(Collision {
        name: element.attribute("name").unwrap_or_default().to_string(),
        origin: parse_origin(element.child("origin"))?,
        geometry,
    })
}

/// Decode a `<link>` element. Errors are wrapped with the link name.
///
/// # Errors
///
/// [`UrdfError::UnnamedLink`] without a `name`, or any error from the child
/// builders.
pub fn parse_link(element: &XmlElement) -> Result<Link> {
    let name = element.attribute("name").ok_or(UrdfError::UnnamedLink)?;
    trace!(link = name, "parsing link");

    build_link(element, name).in_link(name)
}

fn build_link(element: &XmlElement, name: &str) -> Result<Link> {
    let mut link = Link::new(name);

    if let Some(inertial) = element.child("inertial") {
        link.inertial = Some(parse_inertial(inertial)?);
    }

    for visual in element.children_named("visual") {
        link.visuals.push(parse_visual(visual, name)?);
    }

    for collision in element.children_named("collision") {
        link.collisions.push(parse_collision(collision, name)?);
    }

    Ok(link)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Location};
    use crate::math::{Color, Vector3};
    use crate::types::Geometry;
    use crate::xml::parse_document;
    use approx::assert_relative_eq;

    fn link(xml: &str) -> Result<Link> {
        let element = parse_document(xml).expect("well-formed");
        parse_link(&element)
    }

    #[test]
    fn test_parse_full_link() {
        let l = link(
            r#"<link name="arm">
                <inertial>
                    <origin xyz="0 0 0.25"/>
                    <mass value="2.5"/>
                    <inertia ixx="0.1" ixy="0.01" ixz="0.02" iyy="0.2" iyz="0.03" izz="0.3"/>
                </inertial>
                <visual name="shell">
                    <geometry><cylinder length="0.5" radius="0.05"/></geometry>
                    <material name="blue"><color rgba="0 0 1 1"/></material>
                </visual>
                <visual>
                    <geometry><sphere radius="0.06"/></geometry>
                </visual>
                <collision name="hull">
                    <origin xyz="0 0 0.25"/>
                    <geometry><box size="0.1 0.1 0.5"/></geometry>
                </collision>
            </link>"#,
        )
        .unwrap();

        assert_eq!(l.name, "arm");

        let inertial = l.inertial.unwrap();
        assert_relative_eq!(inertial.mass, 2.5);
        assert_relative_eq!(inertial.ixy, 0.01);
        assert_relative_eq!(inertial.izz, 0.3);
        assert_relative_eq!(inertial.origin.position.z, 0.25);

        assert_eq!(l.visuals.len(), 2);
        assert_eq!(l.visuals[0].name, "shell");
        assert_eq!(l.visuals[0].material_name, "blue");
        assert_eq!(
            l.visuals[0].material.as_ref().and_then(|m| m.color),
            Some(Color::new(0.0, 0.0, 1.0, 1.0))
        );
        assert_eq!(l.visuals[1].name, "");
        assert_eq!(l.visuals[1].material_name, "");
        assert!(l.visuals[1].material.is_none());

        assert_eq!(l.collisions.len(), 1);
        assert_eq!(l.collisions[0].name, "hull");
        assert_eq!(
            l.collisions[0].geometry,
            Some(Geometry::Box {
                dim: Vector3::new(0.1, 0.1, 0.5)
            })
        );
    }

    #[test]
    fn test_massless_link() {
        let l = link(r#"<link name="world"/>"#).unwrap();
        assert!(l.is_massless());
        assert!(l.visuals.is_empty());
        assert!(l.collisions.is_empty());
    }

    #[test]
    fn test_unnamed_link() {
        let err = link("<link/>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnnamedLink);
    }

    #[test]
    fn test_inline_material_name_only() {
        let l = link(
            r#"<link name="a"><visual><material name="Grey"/></visual></link>"#,
        )
        .unwrap();
        assert_eq!(l.visuals[0].material_name, "Grey");
        assert!(l.visuals[0].geometry.is_none());
    }

    #[test]
    fn test_inline_material_requires_name() {
        let err = link(r#"<link name="a"><visual><material/></visual></link>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingAttribute);
        assert_eq!(err.link_name(), Some("a"));
    }

    #[test]
    fn test_missing_mass() {
        let err = link(
            r#"<link name="a"><inertial>
                <inertia ixx="1" ixy="0" ixz="0" iyy="1" iyz="0" izz="1"/>
            </inertial></link>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            UrdfError::MissingElement {
                element: "mass",
                ..
            }
        ));

        let err = link(
            r#"<link name="a"><inertial><mass/>
                <inertia ixx="1" ixy="0" ixz="0" iyy="1" iyz="0" izz="1"/>
            </inertial></link>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingAttribute);
    }

    #[test]
    fn test_missing_inertia() {
        let err = link(r#"<link name="a"><inertial><mass value="1"/></inertial></link>"#)
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            UrdfError::MissingElement {
                element: "inertia",
                ..
            }
        ));
    }

    #[test]
    fn test_incomplete_inertia_tensor() {
        let err = link(
            r#"<link name="a"><inertial>
                <mass value="1"/>
                <inertia ixx="0.1" iyy="0.1" izz="0.1"/>
            </inertial></link>"#,
        )
        .unwrap_err();

        match err.root_cause() {
            UrdfError::IncompleteInertiaTensor { missing } => {
                assert_eq!(missing, &vec!["ixy", "ixz", "iyz"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.link_name(), Some("a"));
    }

    #[test]
    fn test_bad_inertia_value_context() {
        let err = link(
            r#"<link name="base"><inertial>
                <mass value="1"/>
                <inertia ixx="0.1" ixy="0" ixz="0" iyy="x" iyz="0" izz="0.1"/>
            </inertial></link>"#,
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NumberFormat);
        assert_eq!(
            err.locations(),
            vec![
                &Location::Link("base".into()),
                &Location::Attribute {
                    element: "inertia".into(),
                    attribute: "iyy",
                },
            ]
        );
    }

    #[test]
    fn test_geometry_error_names_link() {
        let err = link(
            r#"<link name="gripper"><collision><geometry><torus/></geometry></collision></link>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownGeometryType);
        assert_eq!(err.link_name(), Some("gripper"));
        assert!(err.locations().is_empty());
    }
}
