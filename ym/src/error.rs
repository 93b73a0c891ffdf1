//! Error types for template resolution, validation and rendering

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::source::DocumentKind;
use crate::value::ValueKind;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling a configuration
///
/// Every failure is fatal: the first violation is returned and nothing is
/// rendered.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid template shape in {origin}: {message}")]
    InvalidTemplateShape { origin: String, message: String },

    #[error("Template reference at index {index} in {origin} has no 'path'")]
    MissingTemplatePath { origin: String, index: usize },

    #[error("Template {origin} uses placeholder '!{name}' but no input named '{name}' was given")]
    MissingTemplateArgument { origin: String, name: String },

    #[error("Template cycle detected: {chain}")]
    TemplateCycle { chain: String },

    #[error("Type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Required section '{section}' missing")]
    MissingRequiredSection { section: String },

    #[error("Section '{section}' not found in schema")]
    UnknownSection { section: String },

    #[error("Required key '{key}' missing in {location}")]
    MissingRequiredKey { location: String, key: String },

    #[error("Key '{key}' in {location} not found in schema")]
    UnknownKey { location: String, key: String },

    #[error("Raw field of section '{section}' must be a string, found {found}")]
    InvalidRawType { section: String, found: ValueKind },

    #[error("Section '{section}' must be {expected}, found {found}")]
    InvalidSectionBody {
        section: String,
        expected: &'static str,
        found: ValueKind,
    },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Cannot render a {kind} value")]
    UnsupportedValue { kind: ValueKind },

    #[error("{kind} file {} not found (tried: {})", .path.display(), join_paths(.tried))]
    NotFound {
        kind: DocumentKind,
        path: PathBuf,
        tried: Vec<PathBuf>,
    },

    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Coarse error classes, one per failure family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structurally malformed template, schema or section body
    Shape,
    /// Missing or unknown section, key or template path
    Reference,
    /// A value has a different kind than expected
    TypeMismatch,
    /// A placeholder had no matching input
    Argument,
    /// A document could not be found, read or parsed
    Io,
    /// A value kind the output format cannot express
    Render,
}

impl Error {
    /// Get the error class for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidTemplateShape { .. } => ErrorKind::Shape,
            Error::InvalidSectionBody { .. } => ErrorKind::Shape,
            Error::InvalidSchema(_) => ErrorKind::Shape,
            Error::MissingTemplatePath { .. } => ErrorKind::Reference,
            Error::TemplateCycle { .. } => ErrorKind::Reference,
            Error::MissingRequiredSection { .. } => ErrorKind::Reference,
            Error::UnknownSection { .. } => ErrorKind::Reference,
            Error::MissingRequiredKey { .. } => ErrorKind::Reference,
            Error::UnknownKey { .. } => ErrorKind::Reference,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::InvalidRawType { .. } => ErrorKind::TypeMismatch,
            Error::MissingTemplateArgument { .. } => ErrorKind::Argument,
            Error::NotFound { .. } => ErrorKind::Io,
            Error::Read { .. } => ErrorKind::Io,
            Error::Parse { .. } => ErrorKind::Io,
            Error::UnsupportedValue { .. } => ErrorKind::Render,
        }
    }

    pub(crate) fn shape(origin: &Path, message: impl Into<String>) -> Self {
        Error::InvalidTemplateShape {
            origin: origin.display().to_string(),
            message: message.into(),
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
