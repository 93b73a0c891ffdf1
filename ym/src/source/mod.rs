//! Document sources
//!
//! The compiler core never touches the filesystem or the process
//! environment directly. Locating, reading and parsing documents is done
//! through the traits in this module, so the resolver can be driven from
//! memory in tests and embedded in other tools.

mod env;
mod fs;
mod search;

use std::fmt;
use std::path::{Path, PathBuf};

pub use env::{Environment, ProcessEnv, StaticEnv};
pub use fs::{FsLoader, YamlParser};
pub use search::SearchPathResolver;

use crate::error::Result;

/// What kind of document is being located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Template,
    Schema,
}

impl DocumentKind {
    /// Environment variable holding the colon-separated search path for this kind
    pub fn env_var(&self) -> &'static str {
        match self {
            DocumentKind::Template => "YAMELINNO_TEMPLATES",
            DocumentKind::Schema => "YAMELINNO_SCHEMAS",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Template => f.write_str("template"),
            DocumentKind::Schema => f.write_str("schema"),
        }
    }
}

/// Turns a logical document path into a concrete one
pub trait PathResolver {
    fn locate(&self, logical: &Path, kind: DocumentKind, hints: &[PathBuf]) -> Result<PathBuf>;
}

/// Reads the text of a located document
pub trait DocumentLoader {
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Parses document text into a structural tree
pub trait DocumentParser {
    /// `origin` is only used to label errors
    fn parse(&self, text: &str, origin: &Path) -> Result<serde_yaml::Value>;
}
