//! Schema validation of a resolved configuration
//!
//! Validation is closed-world and fail-fast: every section and key must be
//! declared by the schema, and the first violation is returned.

use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{Children, FieldMap, RAW_KEY, Schema, SectionDefinition};
use crate::value::{Mapping, Value};

/// Check a configuration tree against a schema
pub fn validate(config: &Mapping, schema: &Schema) -> Result<()> {
    debug!(section_count = config.len(), "validate: called");
    for name in schema.required_sections() {
        if !config.contains_key(name) {
            return Err(Error::MissingRequiredSection {
                section: name.to_string(),
            });
        }
    }

    for (name, body) in config.iter() {
        let definition = schema.section(name).ok_or_else(|| Error::UnknownSection {
            section: name.to_string(),
        })?;
        validate_section(name, body, definition)?;
    }
    Ok(())
}

fn validate_section(name: &str, body: &Value, definition: &SectionDefinition) -> Result<()> {
    debug!(%name, children = ?definition.children, "validate_section: called");
    match definition.children {
        Children::Keys => {
            let fields = section_mapping(name, body, "a mapping of keys")?;
            validate_fields(name, fields, definition.fields())
        }
        Children::Entries => {
            let Value::Sequence(entries) = body else {
                return Err(Error::InvalidSectionBody {
                    section: name.to_string(),
                    expected: "a list of entries",
                    found: body.kind(),
                });
            };
            for (index, entry) in entries.iter().enumerate() {
                let location = format!("{}[{}]", name, index);
                let fields = section_mapping(&location, entry, "a mapping")?;
                validate_fields(&location, fields, definition.fields())?;
            }
            Ok(())
        }
        Children::Raw => validate_raw(name, body, definition),
    }
}

fn validate_fields(location: &str, fields: &Mapping, declared: &FieldMap) -> Result<()> {
    for (key, field) in declared {
        if field.required && !fields.contains_key(key) {
            return Err(Error::MissingRequiredKey {
                location: location.to_string(),
                key: key.clone(),
            });
        }
    }

    for (key, value) in fields.iter() {
        let field = declared.get(key).ok_or_else(|| Error::UnknownKey {
            location: location.to_string(),
            key: key.to_string(),
        })?;
        if let Some(expected) = field.field_type
            && value.kind() != expected
        {
            return Err(Error::TypeMismatch {
                path: format!("{}.{}", location, key),
                expected,
                found: value.kind(),
            });
        }
    }
    Ok(())
}

fn validate_raw(name: &str, body: &Value, definition: &SectionDefinition) -> Result<()> {
    let fields = section_mapping(name, body, "a mapping with a 'raw' member")?;

    match fields.get(RAW_KEY) {
        Some(Value::String(_)) => {}
        Some(other) => {
            return Err(Error::InvalidRawType {
                section: name.to_string(),
                found: other.kind(),
            });
        }
        None if definition.required => {
            return Err(Error::MissingRequiredKey {
                location: name.to_string(),
                key: RAW_KEY.to_string(),
            });
        }
        None => {}
    }

    if let Some(key) = fields.keys().find(|key| *key != RAW_KEY) {
        return Err(Error::UnknownKey {
            location: name.to_string(),
            key: key.to_string(),
        });
    }
    Ok(())
}

fn section_mapping<'a>(location: &str, body: &'a Value, expected: &'static str) -> Result<&'a Mapping> {
    body.as_mapping().ok_or_else(|| Error::InvalidSectionBody {
        section: location.to_string(),
        expected,
        found: body.kind(),
    })
}
