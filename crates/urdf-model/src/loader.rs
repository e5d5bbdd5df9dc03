//! Entry points: text or file in, [`Model`] out.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::assembly::Assembler;
use crate::error::{Result, UrdfError};
use crate::model::Model;
use crate::xml::{XmlElement, parse_document};

/// URDF loader with configuration options.
#[derive(Debug, Clone, Default)]
pub struct UrdfLoader {
    /// Scale joint axes to unit length; a zero axis becomes (1, 0, 0)
    /// (default: false).
    pub normalize_axes: bool,
    /// Report unrecognized children of `<robot>` at debug level
    /// (default: false).
    pub log_ignored_elements: bool,
}

impl UrdfLoader {
    /// Create a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether joint axes are normalized.
    #[must_use]
    pub fn with_normalize_axes(mut self, normalize: bool) -> Self {
        self.normalize_axes = normalize;
        self
    }

    /// Set whether ignored elements are logged.
    #[must_use]
    pub fn with_log_ignored_elements(mut self, log: bool) -> Self {
        self.log_ignored_elements = log;
        self
    }

    /// Load a model from a URDF file.
    ///
    /// # Errors
    ///
    /// Returns [`UrdfError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`load_str`](Self::load_str).
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Model> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading URDF file");
        let xml = fs::read_to_string(path)?;
        self.load_str(&xml)
    }

    /// Load a model from URDF text.
    ///
    /// # Errors
    ///
    /// Returns the first parse or validation error.
    pub fn load_str(&self, xml: &str) -> Result<Model> {
        let robot = parse_document(xml)?;
        self.load_element(&robot)
    }

    /// Assemble a model from an already parsed `<robot>` element.
    ///
    /// # Errors
    ///
    /// Returns the first parse or validation error.
    pub fn load_element(&self, robot: &XmlElement) -> Result<Model> {
        self.assembler().assemble(robot)
    }

    fn assembler(&self) -> Assembler {
        Assembler {
            normalize_axes: self.normalize_axes,
            log_ignored_elements: self.log_ignored_elements,
        }
    }
}

/// Load a URDF file with default settings.
///
/// # Errors
///
/// See [`UrdfLoader::load_file`].
pub fn load_urdf_file(path: impl AsRef<Path>) -> Result<Model> {
    UrdfLoader::new().load_file(path)
}

/// Load URDF text with default settings.
///
/// # Errors
///
/// See [`UrdfLoader::load_str`].
pub fn load_urdf_str(xml: &str) -> Result<Model> {
    UrdfLoader::new().load_str(xml)
}

impl FromStr for Model {
    type Err = UrdfError;

    fn from_str(s: &str) -> Result<Self> {
        load_urdf_str(s)
    }
}
