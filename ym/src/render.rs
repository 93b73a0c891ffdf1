//! Output rendering
//!
//! Walks a validated configuration tree in its own order and emits one
//! bracketed block per section, formatting values with [`render_value`].

use std::fmt::Write;

use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{Children, FieldMap, RAW_KEY, Schema, SectionDefinition};
use crate::value::{Mapping, Value, ValueKind, format_float};

/// Format a single value for output
///
/// `declared` is the schema type of the field, if any. It does not change
/// formatting.
pub fn render_value(value: &Value, _declared: Option<ValueKind>) -> Result<String> {
    match value {
        Value::String(s) => Ok(quote(s)),
        Value::Bool(b) => Ok(if *b { "yes" } else { "no" }.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(format_float(*f)),
        Value::Sequence(items) => {
            let texts = items
                .iter()
                .map(|item| item.scalar_text().ok_or(Error::UnsupportedValue { kind: item.kind() }))
                .collect::<Result<Vec<_>>>()?;
            Ok(texts.join(" "))
        }
        Value::Mapping(_) => Err(Error::UnsupportedValue { kind: ValueKind::Map }),
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Render a validated configuration tree
///
/// Sections that the schema does not declare are reported as unknown, so
/// an unvalidated tree cannot produce partial output silently.
pub fn render(config: &Mapping, schema: &Schema) -> Result<String> {
    debug!(section_count = config.len(), "render: called");
    let mut out = String::new();
    for (name, body) in config.iter() {
        let definition = schema.section(name).ok_or_else(|| Error::UnknownSection {
            section: name.to_string(),
        })?;
        out.push_str(&render_section(name, body, definition)?);
    }
    Ok(out)
}

fn render_section(name: &str, body: &Value, definition: &SectionDefinition) -> Result<String> {
    debug!(%name, "render_section: called");
    let mut out = format!("[{}]\n", definition.rendered_name);

    match (definition.children, body) {
        (Children::Keys, Value::Mapping(fields)) => {
            for (key, value) in fields.iter() {
                let (rendered_name, declared) = field(name, definition.fields(), key)?;
                let _ = writeln!(out, "{}={}", rendered_name, render_value(value, declared)?);
            }
        }
        (Children::Entries, Value::Sequence(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                let location = format!("{}[{}]", name, index);
                let fields = entry.as_mapping().ok_or_else(|| Error::InvalidSectionBody {
                    section: location.clone(),
                    expected: "a mapping",
                    found: entry.kind(),
                })?;
                let fragments = fields
                    .iter()
                    .map(|(key, value)| {
                        let (rendered_name, declared) = field(&location, definition.fields(), key)?;
                        Ok(format!("{}: {}", rendered_name, render_value(value, declared)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let _ = writeln!(out, "{}", fragments.join("; "));
            }
        }
        (Children::Raw, Value::Mapping(fields)) => match fields.get(RAW_KEY) {
            Some(Value::String(raw)) => out.push_str(raw),
            Some(other) => {
                return Err(Error::InvalidRawType {
                    section: name.to_string(),
                    found: other.kind(),
                });
            }
            None => {}
        },
        (children, body) => {
            return Err(Error::InvalidSectionBody {
                section: name.to_string(),
                expected: match children {
                    Children::Entries => "a list of entries",
                    _ => "a mapping",
                },
                found: body.kind(),
            });
        }
    }

    out.push('\n');
    Ok(out)
}

fn field<'a>(location: &str, fields: &'a FieldMap, key: &str) -> Result<(&'a str, Option<ValueKind>)> {
    fields
        .get(key)
        .map(|def| (def.rendered_name.as_str(), def.field_type))
        .ok_or_else(|| Error::UnknownKey {
            location: location.to_string(),
            key: key.to_string(),
        })
}
