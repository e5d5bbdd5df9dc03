//! URDF robot description parser.
//!
//! This crate parses [URDF](http://wiki.ros.org/urdf) (Unified Robot Description Format)
//! documents into a validated, fully cross-referenced [`Model`]: a single-rooted
//! tree of links connected by joints, with every name reference resolved.
//!
//! # Features
//!
//! - Parse URDF XML from files or strings
//! - Strict numeric decoding with context-carrying errors
//! - Material resolution between top-level declarations and inline visual materials
//! - Kinematic tree validation (unique names, one root, no multi-parent links or cycles)
//! - Tree navigation and `nalgebra` conversions for downstream kinematics code
//!
//! # Example
//!
//! ```
//! use urdf_model::{load_urdf_str, Geometry};
//!
//! let urdf = r#"
//!     <robot name="simple">
//!         <link name="base_link">
//!             <inertial>
//!                 <mass value="1.0"/>
//!                 <inertia ixx="0.1" ixy="0" ixz="0" iyy="0.1" iyz="0" izz="0.1"/>
//!             </inertial>
//!             <visual>
//!                 <geometry><cylinder length="0.6" radius="0.2"/></geometry>
//!             </visual>
//!         </link>
//!     </robot>
//! "#;
//!
//! let model = load_urdf_str(urdf).expect("should parse");
//! assert_eq!(model.name(), "simple");
//! assert_eq!(model.root_link_name(), "base_link");
//!
//! let base = model.link("base_link").expect("base link");
//! assert_eq!(base.visuals[0].geometry, Some(Geometry::cylinder(0.6, 0.2)));
//! ```
//!
//! # Supported URDF Elements
//!
//! ## Links
//!
//! - `<link name="...">` - Rigid body definition
//! - `<inertial>` - Mass, center of mass, full inertia tensor
//! - `<visual>` - Geometry, origin and material
//! - `<collision>` - Geometry and origin
//!
//! ## Joints
//!
//! - `<joint name="..." type="...">` with types `fixed`, `revolute`, `continuous`,
//!   `prismatic`, `floating`, `planar`
//! - `<parent>`, `<child>`, `<origin>`, `<axis>`
//! - `<limit>`, `<dynamics>`, `<safety_controller>`, `<calibration>`, `<mimic>`
//!
//! ## Geometry
//!
//! - `<box size="x y z"/>`
//! - `<sphere radius="r"/>`
//! - `<cylinder length="l" radius="r"/>`
//! - `<capsule length="l" radius="r"/>`
//! - `<mesh filename="..." scale="x y z"/>` - referenced, never opened
//!
//! ## Materials
//!
//! - `<material name="...">` with `<color rgba="..."/>` and/or `<texture filename="..."/>`
//!
//! Any other element (`<gazebo>`, `<transmission>`, ...) is ignored.
//!
//! # Limitations
//!
//! - Physical plausibility of masses, inertias and limits is not checked
//! - Kinematic loops are rejected (tree structures only)
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.

#![doc(html_root_url = "https://docs.rs/urdf-model/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_wraps,
    clippy::redundant_closure_for_method_calls,
    clippy::should_implement_trait,
    clippy::many_single_char_names,
    clippy::option_if_let_else
)]

mod assembly;
pub mod codec;
mod error;
pub mod math;
mod loader;
mod model;
pub mod parser;
mod registry;
mod types;
pub mod xml;

// Re-export main types
pub use error::{ErrorKind, Location, Result, ResultExt, UrdfError};
pub use loader::{UrdfLoader, load_urdf_file, load_urdf_str};
pub use math::{Color, Rotation, Transform, Vector3};
pub use model::Model;
pub use registry::{Named, Registry};
pub use types::{
    Collision, Geometry, Inertial, Joint, JointCalibration, JointDynamics, JointLimits,
    JointMimic, JointSafety, JointType, Link, Material, Visual,
};
pub use xml::XmlElement;
