//! Model assembly.
//!
//! Turns a `<robot>` element into a [`Model`] in four ordered phases:
//!
//! 1. declaration: build materials, links and joints into registries
//! 2. material resolution: bind visual material references
//! 3. tree assembly: wire parent/child relations from the joints
//! 4. root resolution: find the unique root and index the tree
//!
//! Assembly is fail-fast. The first violated rule is returned and no partial
//! model escapes.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{Result, UrdfError};
use crate::math::Vector3;
use crate::model::Model;
use crate::parser::{parse_joint, parse_link, parse_material};
use crate::registry::Registry;
use crate::types::{Joint, JointType, Link, Material};
use crate::xml::XmlElement;

/// Assembly options. Built from [`UrdfLoader`](crate::UrdfLoader).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Assembler {
    pub normalize_axes: bool,
    pub log_ignored_elements: bool,
}

impl Assembler {
    pub fn assemble(&self, robot: &XmlElement) -> Result<Model> {
        if robot.name() != "robot" {
            return Err(UrdfError::malformed(format!(
                "root element is <{}>, expected <robot>",
                robot.name()
            )));
        }
        let name = robot
            .attribute("name")
            .ok_or_else(|| UrdfError::missing_attribute("name", "robot"))?;

        let (mut materials, mut links, joints) = self.declare(robot)?;
        resolve_materials(&mut materials, &mut links)?;
        build_tree(&mut links, &joints)?;
        let root = find_root(&links)?;
        index_tree(&mut links, &root)?;
        check_joints(&joints);

        debug!(robot = name, root = %root, "model assembled");
        Ok(Model::from_parts(
            name.to_string(),
            root,
            links,
            joints,
            materials,
        ))
    }

    /// Phase 1. Materials, then links, then joints, each in document order.
    fn declare(
        &self,
        robot: &XmlElement,
    ) -> Result<(Registry<Material>, Registry<Link>, Registry<Joint>)> {
        let mut materials = Registry::new();
        for element in robot.children_named("material") {
            let material = parse_material(element, false)?;
            materials
                .try_insert(material)
                .map_err(|m| UrdfError::DuplicateMaterial(m.name))?;
        }

        let mut links = Registry::new();
        for element in robot.children_named("link") {
            let link = parse_link(element)?;
            links
                .try_insert(link)
                .map_err(|l| UrdfError::DuplicateLink(l.name))?;
        }
        if links.is_empty() {
            return Err(UrdfError::NoLinksDefined);
        }

        let mut joints = Registry::new();
        for element in robot.children_named("joint") {
            let mut joint = parse_joint(element)?;
            if self.normalize_axes {
                joint.axis = unit_axis(joint.axis);
            }
            joints
                .try_insert(joint)
                .map_err(|j| UrdfError::DuplicateJoint(j.name))?;
        }

        if self.log_ignored_elements {
            for element in robot.children() {
                if !matches!(element.name(), "material" | "link" | "joint") {
                    debug!(element = element.name(), "ignoring unrecognized element");
                }
            }
        }

        debug!(
            materials = materials.len(),
            links = links.len(),
            joints = joints.len(),
            "declared elements"
        );
        Ok((materials, links, joints))
    }
}

fn unit_axis(axis: Vector3) -> Vector3 {
    let norm = axis.norm();
    if norm > 0.0 {
        Vector3::new(axis.x / norm, axis.y / norm, axis.z / norm)
    } else {
        Vector3::x_axis()
    }
}

/// Phase 2.
///
/// Inline definitions are promoted first (first wins), so a later visual may
/// refer by name to a material defined inline on an earlier one. Every
/// visual with a material name then binds the registry entry.
fn resolve_materials(materials: &mut Registry<Material>, links: &mut Registry<Link>) -> Result<()> {
    for link in links.iter() {
        for visual in &link.visuals {
            if let Some(inline) = &visual.material {
                if inline.is_defined() && !materials.contains(&inline.name) {
                    materials
                        .try_insert(inline.clone())
                        .map_err(|m| UrdfError::DuplicateMaterial(m.name))?;
                }
            }
        }
    }

    for link in links.iter_mut() {
        for visual in &mut link.visuals {
            if visual.material_name.is_empty() {
                continue;
            }
            let Some(entry) = materials.get(&visual.material_name) else {
                return Err(UrdfError::UndefinedMaterial {
                    material: visual.material_name.clone(),
                    link: link.name.clone(),
                });
            };
            if let Some(inline) = &visual.material {
                if inline.is_defined() && inline != entry {
                    warn!(
                        link = %link.name,
                        material = %entry.name,
                        "inline material differs from the registered definition, using the registered one"
                    );
                }
            }
            visual.material = Some(entry.clone());
        }
    }

    debug!(materials = materials.len(), "materials resolved");
    Ok(())
}

/// Phase 3.
fn build_tree(links: &mut Registry<Link>, joints: &Registry<Joint>) -> Result<()> {
    // child link -> joint that claimed it
    let mut parent_joint_of: HashMap<&str, &str> = HashMap::new();

    for joint in joints {
        let parent = joint.parent_link_name.as_str();
        let child = joint.child_link_name.as_str();

        if parent.is_empty() {
            return Err(UrdfError::MissingParentSpec {
                joint: joint.name.clone(),
            });
        }
        if child.is_empty() {
            return Err(UrdfError::MissingChildSpec {
                joint: joint.name.clone(),
            });
        }
        if !links.contains(child) {
            return Err(UrdfError::UnknownChildLink {
                link: child.to_string(),
                joint: joint.name.clone(),
            });
        }
        if !links.contains(parent) {
            return Err(UrdfError::UnknownParentLink {
                link: parent.to_string(),
                joint: joint.name.clone(),
            });
        }
        if parent == child {
            return Err(UrdfError::CycleDetected {
                link: child.to_string(),
            });
        }
        if let Some(first) = parent_joint_of.insert(child, &joint.name) {
            return Err(UrdfError::MultipleParentsFound {
                link: child.to_string(),
                first_joint: first.to_string(),
                second_joint: joint.name.clone(),
            });
        }

        if let Some(child_link) = links.get_mut(child) {
            child_link.parent_joint = Some(joint.name.clone());
            child_link.parent_link = Some(parent.to_string());
        }
        if let Some(parent_link) = links.get_mut(parent) {
            parent_link.child_joints.push(joint.name.clone());
            parent_link.child_links.push(child.to_string());
        }
    }

    Ok(())
}

/// Phase 4a. Root candidates are the links without a parent, in document order.
fn find_root(links: &Registry<Link>) -> Result<String> {
    let mut candidates = links.iter().filter(|l| l.is_root());

    let first = candidates.next().ok_or(UrdfError::NoRootFound)?;
    if let Some(second) = candidates.next() {
        return Err(UrdfError::MultipleRootsFound {
            first: first.name.clone(),
            second: second.name.clone(),
        });
    }

    debug!(root = %first.name, "found root link");
    Ok(first.name.clone())
}

/// Phase 4b. Depth-first numbering from the root.
///
/// Every link has at most one parent here, so a link the walk does not
/// reach sits on a closed chain that is disconnected from the root.
fn index_tree(links: &mut Registry<Link>, root: &str) -> Result<()> {
    let mut order = Vec::with_capacity(links.len());
    let mut stack = vec![root.to_string()];

    while let Some(name) = stack.pop() {
        if let Some(link) = links.get(&name) {
            stack.extend(link.child_links.iter().rev().cloned());
        }
        order.push(name);
    }

    for (index, name) in order.iter().enumerate() {
        if let Some(link) = links.get_mut(name) {
            link.link_index = Some(index);
        }
    }

    if let Some(orphan) = links.iter().find(|l| l.link_index.is_none()) {
        return Err(UrdfError::CycleDetected {
            link: orphan.name.clone(),
        });
    }

    Ok(())
}

/// Legal but suspicious joint definitions.
fn check_joints(joints: &Registry<Joint>) {
    for joint in joints {
        if let Some(mimic) = &joint.mimic {
            if !joints.contains(&mimic.joint_name) {
                warn!(
                    joint = %joint.name,
                    target = %mimic.joint_name,
                    "mimic refers to a joint that is not in the model"
                );
            }
        }
        if matches!(joint.joint_type, JointType::Revolute | JointType::Prismatic)
            && joint.limits.is_none()
        {
            warn!(joint = %joint.name, "joint has no <limit> element");
        }
    }
}
