//! Configuration tree node types
//!
//! A configuration tree is a [`Mapping`] of section names to [`Value`]s.
//! Mappings keep insertion order, which is also the order sections are
//! rendered in.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// A node in a configuration tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// The kind tag of a [`Value`], also used as a schema type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ValueKind {
    String,
    Int,
    Float,
    Bool,
    Map,
    Sequence,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Map => "map",
            ValueKind::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "str" | "string" => Ok(ValueKind::String),
            "int" | "integer" => Ok(ValueKind::Int),
            "float" | "double" => Ok(ValueKind::Float),
            "bool" | "boolean" => Ok(ValueKind::Bool),
            "dict" | "dictionary" | "object" | "map" => Ok(ValueKind::Map),
            "list" | "array" | "sequence" | "tuple" | "collection" => Ok(ValueKind::Sequence),
            other => Err(format!("unknown type tag '{}'", other)),
        }
    }
}

impl TryFrom<String> for ValueKind {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Map,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Plain text of a scalar, as it would appear unquoted in YAML
    ///
    /// Returns `None` for sequences and mappings.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_float(*f)),
            Value::String(s) => Some(s.clone()),
            Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    /// Convert a parsed YAML tree into a configuration node
    ///
    /// Nulls, YAML tags, non-string keys and integers outside the `i64`
    /// range have no counterpart in the configuration model and are
    /// reported as an invalid template shape at their key path.
    pub fn from_yaml(yaml: serde_yaml::Value, origin: &Path) -> Result<Self> {
        convert(yaml, "", origin)
    }
}

fn convert(yaml: serde_yaml::Value, path: &str, origin: &Path) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    let at = if path.is_empty() { "document root" } else { path };
    match yaml {
        Yaml::Null => Err(Error::shape(origin, format!("null value at '{}'", at))),
        Yaml::Bool(b) => Ok(Value::Bool(b)),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if n.is_u64() {
                Err(Error::shape(origin, format!("integer out of range at '{}'", at)))
            } else {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| Error::shape(origin, format!("unsupported number at '{}'", at)))
            }
        }
        Yaml::String(s) => Ok(Value::String(s)),
        Yaml::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| convert(item, &format!("{}[{}]", path, i), origin))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        Yaml::Mapping(map) => {
            let mut mapping = Mapping::new();
            for (key, value) in map {
                let Yaml::String(key) = key else {
                    return Err(Error::shape(
                        origin,
                        format!("non-string key {:?} at '{}'", key, at),
                    ));
                };
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                let value = convert(value, &child, origin)?;
                mapping.insert(key, value);
            }
            Ok(Value::Mapping(mapping))
        }
        Yaml::Tagged(tagged) => Err(Error::shape(
            origin,
            format!("unsupported tag {} at '{}'", tagged.tag, at),
        )),
    }
}

/// Format a float the way it reads in the source document (`2.0`, not `2`)
pub(crate) fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

/// Insertion-ordered string-keyed map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a value, keeping the key's original position if it already exists
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
