//! The assembled robot model.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::registry::Registry;
use crate::types::{Joint, Link, Material};

/// A validated, single-rooted kinematic tree.
///
/// A `Model` only comes out of a successful assembly. It owns every link,
/// joint and material; tree relations between links are name references
/// into its registries. There is no mutation API.
///
/// With the `serde` feature a model can be serialized. It cannot be
/// deserialized; load it from URDF so the tree is validated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Model {
    name: String,
    root_link: String,
    links: Registry<Link>,
    joints: Registry<Joint>,
    materials: Registry<Material>,
}

impl Model {
    pub(crate) fn from_parts(
        name: String,
        root_link: String,
        links: Registry<Link>,
        joints: Registry<Joint>,
        materials: Registry<Material>,
    ) -> Self {
        Self {
            name,
            root_link,
            links,
            joints,
            materials,
        }
    }

    /// Robot name from `<robot name="..">`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the unique root link.
    pub fn root_link_name(&self) -> &str {
        &self.root_link
    }

    /// The unique root link.
    pub fn root_link(&self) -> Option<&Link> {
        self.links.get(&self.root_link)
    }

    /// All links in document order.
    pub fn links(&self) -> &Registry<Link> {
        &self.links
    }

    /// All joints in document order.
    pub fn joints(&self) -> &Registry<Joint> {
        &self.joints
    }

    /// All materials: top-level declarations in document order, then
    /// promoted inline definitions.
    pub fn materials(&self) -> &Registry<Material> {
        &self.materials
    }

    /// Look up a link by name.
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.links.get(name)
    }

    /// Look up a joint by name.
    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.joints.get(name)
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Parent of the named link. `None` for the root or an unknown name.
    pub fn parent_link(&self, link: &str) -> Option<&Link> {
        self.link(link)?
            .parent_link_name()
            .and_then(|parent| self.link(parent))
    }

    /// Joint connecting the named link to its parent.
    pub fn parent_joint(&self, link: &str) -> Option<&Joint> {
        self.link(link)?
            .parent_joint_name()
            .and_then(|joint| self.joint(joint))
    }

    /// Children of the named link, in joint document order.
    pub fn child_links(&self, link: &str) -> Vec<&Link> {
        self.link(link)
            .map(|l| {
                l.child_link_names()
                    .iter()
                    .filter_map(|child| self.link(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Joints below the named link, in document order.
    pub fn child_joints(&self, link: &str) -> Vec<&Joint> {
        self.link(link)
            .map(|l| {
                l.child_joint_names()
                    .iter()
                    .filter_map(|joint| self.joint(joint))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Links in depth-first order starting at the root.
    pub fn links_in_tree_order(&self) -> Vec<&Link> {
        let mut links: Vec<&Link> = self.links.iter().collect();
        links.sort_by_key(|l| l.link_index());
        links
    }

    /// Total degrees of freedom over all joints.
    pub fn dof(&self) -> usize {
        self.joints.iter().map(|j| j.joint_type.dof()).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use crate::UrdfLoader;

    const ARM: &str = r#"
        <robot name="arm">
            <link name="base"/>
            <link name="upper"/>
            <link name="lower"/>
            <link name="tool"/>
            <joint name="shoulder" type="revolute">
                <parent link="base"/><child link="upper"/>
                <limit effort="10" velocity="1"/>
            </joint>
            <joint name="elbow" type="revolute">
                <parent link="upper"/><child link="lower"/>
                <limit effort="10" velocity="1"/>
            </joint>
            <joint name="mount" type="fixed">
                <parent link="upper"/><child link="tool"/>
            </joint>
        </robot>
    "#;

    #[test]
    fn test_lookup() {
        let model = UrdfLoader::new().load_str(ARM).unwrap();
        assert_eq!(model.name(), "arm");
        assert_eq!(model.root_link_name(), "base");
        assert_eq!(model.root_link().map(|l| l.name.as_str()), Some("base"));
        assert!(model.link("upper").is_some());
        assert!(model.joint("elbow").is_some());
        assert!(model.link("elbow").is_none());
        assert!(model.material("grey").is_none());
        assert_eq!(model.dof(), 2);
    }

    #[test]
    fn test_navigation() {
        let model = UrdfLoader::new().load_str(ARM).unwrap();

        assert!(model.parent_link("base").is_none());
        assert!(model.parent_joint("base").is_none());
        assert_eq!(model.parent_link("lower").map(|l| l.name.as_str()), Some("upper"));
        assert_eq!(model.parent_joint("tool").map(|j| j.name.as_str()), Some("mount"));

        let children: Vec<&str> = model
            .child_links("upper")
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(children, vec!["lower", "tool"]);

        let joints: Vec<&str> = model
            .child_joints("upper")
            .iter()
            .map(|j| j.name.as_str())
            .collect();
        assert_eq!(joints, vec!["elbow", "mount"]);

        assert!(model.child_links("tool").is_empty());
        assert!(model.child_links("nope").is_empty());
    }

    #[test]
    fn test_tree_order() {
        let model = UrdfLoader::new().load_str(ARM).unwrap();
        let order: Vec<&str> = model
            .links_in_tree_order()
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(order, vec!["base", "upper", "lower", "tool"]);

        for (i, link) in model.links_in_tree_order().iter().enumerate() {
            assert_eq!(link.link_index(), Some(i));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_keeps_document_order() {
        let model = UrdfLoader::new().load_str(ARM).unwrap();
        let text = serde_json::to_string(&model).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["name"], "arm");
        assert_eq!(json["root_link"], "base");
        assert_eq!(json["joints"]["elbow"]["parent_link_name"], "upper");

        let positions: Vec<usize> = ["\"base\":", "\"upper\":", "\"lower\":", "\"tool\":"]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
