use std::fs;
use std::path::Path;

use tracing::debug;

use super::{DocumentLoader, DocumentParser};
use crate::error::{Error, Result};

/// Reads documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl DocumentLoader for FsLoader {
    fn read_text(&self, path: &Path) -> Result<String> {
        debug!(?path, "FsLoader::read_text: called");
        fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Parses YAML documents
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl DocumentParser for YamlParser {
    fn parse(&self, text: &str, origin: &Path) -> Result<serde_yaml::Value> {
        serde_yaml::from_str(text).map_err(|source| Error::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }
}
