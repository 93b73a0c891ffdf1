//! Template references declared under a document's `templates` key

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::value::Value;

use super::placeholder::Inputs;

/// A reference from one template document to another
///
/// In YAML a reference is either a bare path string or a mapping:
/// ```yaml
/// templates:
///   - base.yml
///   - path: files.yml
///     overwrite: true
///     inputs:
///       version: 1.2.0
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateReference {
    /// Logical path, located through the path resolver
    pub path: PathBuf,
    /// Placeholder arguments for the referenced template
    pub inputs: Inputs,
    /// Replace colliding top-level keys instead of merging them
    pub overwrite: bool,
}

impl TemplateReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inputs: Inputs::new(),
            overwrite: false,
        }
    }

    pub fn with_inputs(mut self, inputs: Inputs) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Parse one element of a `templates` list
    pub(crate) fn from_value(value: &Value, index: usize, origin: &Path) -> Result<Self> {
        let fields = match value {
            Value::String(path) => return Ok(Self::new(path)),
            Value::Mapping(fields) => fields,
            other => {
                return Err(Error::shape(
                    origin,
                    format!("templates[{}] must be a string or a mapping, found {}", index, other.kind()),
                ));
            }
        };

        let path = match fields.get("path") {
            Some(Value::String(path)) => PathBuf::from(path),
            Some(other) => {
                return Err(Error::shape(
                    origin,
                    format!("templates[{}].path must be a string, found {}", index, other.kind()),
                ));
            }
            None => {
                return Err(Error::MissingTemplatePath {
                    origin: origin.display().to_string(),
                    index,
                });
            }
        };

        let overwrite = match fields.get("overwrite") {
            Some(Value::Bool(overwrite)) => *overwrite,
            Some(other) => {
                return Err(Error::shape(
                    origin,
                    format!("templates[{}].overwrite must be a bool, found {}", index, other.kind()),
                ));
            }
            None => false,
        };

        let inputs = match fields.get("inputs") {
            Some(Value::Mapping(inputs)) => {
                if let Some((name, _)) = inputs.iter().find(|(_, v)| !v.is_scalar()) {
                    return Err(Error::shape(
                        origin,
                        format!("templates[{}].inputs.{} must be a scalar", index, name),
                    ));
                }
                inputs.clone()
            }
            Some(other) => {
                return Err(Error::shape(
                    origin,
                    format!("templates[{}].inputs must be a mapping, found {}", index, other.kind()),
                ));
            }
            None => Inputs::new(),
        };

        if let Some(unknown) = fields.keys().find(|k| !matches!(*k, "path" | "overwrite" | "inputs")) {
            return Err(Error::shape(
                origin,
                format!("templates[{}] has unknown field '{}'", index, unknown),
            ));
        }

        Ok(Self {
            path,
            inputs,
            overwrite,
        })
    }
}
