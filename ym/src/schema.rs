//! Schema model
//!
//! A schema describes the sections a configuration may contain, how each
//! section's body is shaped, and the name every section and field renders
//! as:
//!
//! ```yaml
//! Setup:
//!   renderedName: Setup
//!   required: true
//!   children: keys
//!   keys:
//!     appName:
//!       renderedName: AppName
//!       required: true
//!       type: string
//! Files:
//!   renderedName: Files
//!   children: entries
//!   entry:
//!     source:
//!       renderedName: Source
//!       required: true
//! Code:
//!   renderedName: Code
//!   children: raw
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::value::ValueKind;

/// Reserved member holding the body of a raw section
pub const RAW_KEY: &str = "raw";

/// Field definitions of a section, by internal key name
pub type FieldMap = BTreeMap<String, FieldDefinition>;

static NO_FIELDS: FieldMap = BTreeMap::new();

/// How a section's body is structured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Children {
    /// A flat mapping of keys
    Keys,
    /// A list of entries, each a flat mapping
    Entries,
    /// A single opaque text body under the `raw` member
    Raw,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "renderedName")]
    pub rendered_name: String,

    #[serde(default)]
    pub required: bool,

    /// Expected value kind; unchecked when absent
    #[serde(rename = "type", default)]
    pub field_type: Option<ValueKind>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionDefinition {
    #[serde(rename = "renderedName")]
    pub rendered_name: String,

    #[serde(default)]
    pub required: bool,

    pub children: Children,

    /// Field definitions for `keys` sections
    #[serde(default)]
    pub keys: Option<FieldMap>,

    /// Field definitions for each element of `entries` sections
    #[serde(default)]
    pub entry: Option<FieldMap>,
}

impl SectionDefinition {
    /// Field definitions that apply to this section's kind
    ///
    /// Raw sections have no declared fields.
    pub fn fields(&self) -> &FieldMap {
        let fields = match self.children {
            Children::Keys => self.keys.as_ref(),
            Children::Entries => self.entry.as_ref(),
            Children::Raw => None,
        };
        fields.unwrap_or(&NO_FIELDS)
    }
}

/// Expected structure of a configuration, by section name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    sections: BTreeMap<String, SectionDefinition>,
}

impl Schema {
    /// Build a schema from a parsed YAML document
    pub fn from_yaml(yaml: serde_yaml::Value, origin: &Path) -> Result<Self> {
        let schema: Schema = serde_yaml::from_value(yaml)
            .map_err(|e| Error::InvalidSchema(format!("{}: {}", origin.display(), e)))?;
        schema.check(origin)?;
        Ok(schema)
    }

    /// Parse a schema from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let origin = Path::new("<schema>");
        let yaml = serde_yaml::from_str(text).map_err(|source| Error::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        Self::from_yaml(yaml, origin)
    }

    pub fn section(&self, name: &str) -> Option<&SectionDefinition> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &SectionDefinition)> {
        self.sections.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Names of sections every configuration must contain
    pub fn required_sections(&self) -> impl Iterator<Item = &str> {
        self.sections().filter(|(_, def)| def.required).map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn check(&self, origin: &Path) -> Result<()> {
        for (name, def) in &self.sections {
            let missing = match def.children {
                Children::Keys if def.keys.is_none() => Some("keys"),
                Children::Entries if def.entry.is_none() => Some("entry"),
                _ => None,
            };
            if let Some(member) = missing {
                return Err(Error::InvalidSchema(format!(
                    "{}: section '{}' has no '{}' definition",
                    origin.display(),
                    name,
                    member
                )));
            }
        }
        Ok(())
    }
}
