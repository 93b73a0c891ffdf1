//! Template shape checking
//!
//! A template document must be a mapping whose keys are identifiers. The
//! reserved `templates` key, if present, lists parent templates. Every
//! reference is parsed here, so a malformed one fails before any parent is
//! loaded.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::value::{Mapping, Value};

use super::reference::TemplateReference;

/// Reserved top-level key listing parent templates
pub const TEMPLATES_KEY: &str = "templates";

/// A parsed template document, split into its parents and its own fields
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    pub templates: Vec<TemplateReference>,
    pub body: Mapping,
}

impl TemplateDocument {
    pub fn from_yaml(yaml: serde_yaml::Value, origin: &Path) -> Result<Self> {
        debug!(?origin, "TemplateDocument::from_yaml: called");
        let root = match Value::from_yaml(yaml, origin)? {
            Value::Mapping(root) => root,
            other => {
                return Err(Error::shape(
                    origin,
                    format!("document root must be a mapping, found {}", other.kind()),
                ));
            }
        };

        let mut templates = Vec::new();
        let mut body = Mapping::new();
        for (key, value) in root {
            if key == TEMPLATES_KEY {
                let found = value.kind();
                let Value::Sequence(items) = value else {
                    return Err(Error::shape(
                        origin,
                        format!("'{}' must be a list, found {}", TEMPLATES_KEY, found),
                    ));
                };
                templates = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| TemplateReference::from_value(item, index, origin))
                    .collect::<Result<Vec<_>>>()?;
            } else if is_identifier(&key) {
                body.insert(key, value);
            } else {
                return Err(Error::shape(origin, format!("invalid key '{}'", key)));
            }
        }

        debug!(?origin, template_count = templates.len(), field_count = body.len(), "TemplateDocument::from_yaml: parsed");
        Ok(Self { templates, body })
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
