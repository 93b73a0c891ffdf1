//! Search-path based document location

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DocumentKind, Environment, PathResolver};
use crate::error::{Error, Result};

/// Locates documents by trying, in order:
/// 1. The path as given (relative to the working directory)
/// 2. Each directory in the kind's environment search path
/// 3. Each caller-supplied hint directory
#[derive(Debug, Clone)]
pub struct SearchPathResolver<E> {
    env: E,
}

impl<E: Environment> SearchPathResolver<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// All candidate paths for a logical path, in search order
    pub fn candidates(&self, logical: &Path, kind: DocumentKind, hints: &[PathBuf]) -> Vec<PathBuf> {
        let mut candidates = vec![logical.to_path_buf()];

        if logical.is_absolute() {
            return candidates;
        }

        if let Some(search_path) = self.env.var(kind.env_var()) {
            candidates.extend(
                search_path
                    .split(':')
                    .filter(|dir| !dir.is_empty())
                    .map(|dir| Path::new(dir).join(logical)),
            );
        }
        candidates.extend(hints.iter().map(|dir| dir.join(logical)));
        candidates
    }
}

impl<E: Environment> PathResolver for SearchPathResolver<E> {
    fn locate(&self, logical: &Path, kind: DocumentKind, hints: &[PathBuf]) -> Result<PathBuf> {
        debug!(?logical, %kind, hint_count = hints.len(), "SearchPathResolver::locate: called");
        let tried = self.candidates(logical, kind, hints);

        match tried.iter().find(|candidate| candidate.is_file()) {
            Some(found) => {
                debug!(?found, "SearchPathResolver::locate: found");
                Ok(found.clone())
            }
            None => Err(Error::NotFound {
                kind,
                path: logical.to_path_buf(),
                tried,
            }),
        }
    }
}
