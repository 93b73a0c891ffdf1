//! Recursive template resolution
//!
//! Each document is located, read, parameterized, parsed and shape-checked.
//! Its parent templates are then resolved in listed order and folded left
//! to right, each with its own overwrite flag, and finally the document's
//! own fields are merged on top (always in merge mode).

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::source::{
    DocumentKind, DocumentLoader, DocumentParser, Environment, FsLoader, PathResolver, SearchPathResolver, YamlParser,
};
use crate::value::Mapping;

use super::merge::{fold, merge};
use super::placeholder::{Inputs, substitute};
use super::shape::TemplateDocument;

/// Deepest template chain accepted before giving up
pub const MAX_DEPTH: usize = 64;

/// Resolves a template document and all of its parents into one tree
pub struct Resolver {
    locator: Box<dyn PathResolver>,
    loader: Box<dyn DocumentLoader>,
    parser: Box<dyn DocumentParser>,
}

impl Resolver {
    pub fn new(
        locator: impl PathResolver + 'static,
        loader: impl DocumentLoader + 'static,
        parser: impl DocumentParser + 'static,
    ) -> Self {
        Self {
            locator: Box::new(locator),
            loader: Box::new(loader),
            parser: Box::new(parser),
        }
    }

    /// Resolver reading YAML from the filesystem, searching `env`'s search paths
    pub fn filesystem(env: impl Environment + 'static) -> Self {
        Self::new(SearchPathResolver::new(env), FsLoader, YamlParser)
    }

    /// Resolve an entry document; its text is not parameterized
    pub fn resolve(&self, entry: &Path, hints: &[PathBuf]) -> Result<Mapping> {
        self.resolve_with_inputs(entry, None, hints)
    }

    /// Resolve an entry document with optional placeholder inputs
    pub fn resolve_with_inputs(&self, entry: &Path, inputs: Option<&Inputs>, hints: &[PathBuf]) -> Result<Mapping> {
        debug!(?entry, "Resolver::resolve_with_inputs: called");
        let mut chain = Vec::new();
        self.resolve_document(entry, inputs, hints, &mut chain)
    }

    /// Locate, read and parse a document without any template processing
    pub fn load_tree(&self, logical: &Path, kind: DocumentKind, hints: &[PathBuf]) -> Result<(PathBuf, serde_yaml::Value)> {
        let path = self.locator.locate(logical, kind, hints)?;
        let text = self.loader.read_text(&path)?;
        let tree = self.parser.parse(&text, &path)?;
        Ok((path, tree))
    }

    fn resolve_document(
        &self,
        logical: &Path,
        inputs: Option<&Inputs>,
        hints: &[PathBuf],
        chain: &mut Vec<PathBuf>,
    ) -> Result<Mapping> {
        debug!(?logical, depth = chain.len(), "resolve_document: called");
        let path = self.locator.locate(logical, DocumentKind::Template, hints)?;

        if chain.contains(&path) || chain.len() >= MAX_DEPTH {
            let mut links: Vec<String> = chain.iter().map(|p| p.display().to_string()).collect();
            links.push(path.display().to_string());
            return Err(Error::TemplateCycle {
                chain: links.join(" -> "),
            });
        }

        let raw = self.loader.read_text(&path)?;
        let text = substitute(&raw, inputs, &path)?;
        let tree = self.parser.parse(&text, &path)?;
        let document = TemplateDocument::from_yaml(tree, &path)?;

        let mut child_hints = Vec::with_capacity(hints.len() + 1);
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            child_hints.push(dir.to_path_buf());
        }
        child_hints.extend(hints.iter().cloned());

        chain.push(path.clone());
        let mut parents = Vec::with_capacity(document.templates.len());
        for reference in &document.templates {
            debug!(?path, parent = ?reference.path, overwrite = reference.overwrite, "resolve_document: resolving parent");
            let tree = self.resolve_document(&reference.path, Some(&reference.inputs), &child_hints, chain)?;
            parents.push((tree, reference.overwrite));
        }
        chain.pop();

        let folded = fold(parents)?;
        let resolved = merge(&document.body, folded, false)?;
        debug!(?path, section_count = resolved.len(), "resolve_document: complete");
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::Value;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// In-memory documents keyed by path, recording every read
    #[derive(Clone, Default)]
    struct MemoryDocs {
        docs: Rc<HashMap<PathBuf, String>>,
        reads: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl MemoryDocs {
        fn new(docs: &[(&str, &str)]) -> Self {
            Self {
                docs: Rc::new(docs.iter().map(|(p, t)| (PathBuf::from(p), t.to_string())).collect()),
                reads: Rc::default(),
            }
        }
    }

    impl PathResolver for MemoryDocs {
        fn locate(&self, logical: &Path, kind: DocumentKind, _hints: &[PathBuf]) -> Result<PathBuf> {
            if self.docs.contains_key(logical) {
                Ok(logical.to_path_buf())
            } else {
                Err(Error::NotFound {
                    kind,
                    path: logical.to_path_buf(),
                    tried: vec![logical.to_path_buf()],
                })
            }
        }
    }

    impl DocumentLoader for MemoryDocs {
        fn read_text(&self, path: &Path) -> Result<String> {
            self.reads.borrow_mut().push(path.to_path_buf());
            Ok(self.docs[path].clone())
        }
    }

    fn resolver(docs: &MemoryDocs) -> Resolver {
        Resolver::new(docs.clone(), docs.clone(), YamlParser)
    }

    fn tree(yaml: &str) -> Mapping {
        match Value::from_yaml(serde_yaml::from_str(yaml).unwrap(), Path::new("expected.yml")).unwrap() {
            Value::Mapping(m) => m,
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_leaf_template() {
        let docs = MemoryDocs::new(&[("leaf.yml", "key0: value1\nkey1: value2\nkey2: value3\n")]);
        let resolved = resolver(&docs).resolve(Path::new("leaf.yml"), &[]).unwrap();
        assert_eq!(resolved, tree("key0: value1\nkey1: value2\nkey2: value3\n"));
    }

    #[test]
    fn test_parent_template_fields_overridden() {
        let docs = MemoryDocs::new(&[
            ("parent.yml", "key0: value1\nkey1: value2\nkey2: value3\nkey3: value4\nkey4: value5\n"),
            ("child.yml", "templates:\n  - parent.yml\nkey2: value1\nkey3: value2\n"),
        ]);

        let resolved = resolver(&docs).resolve(Path::new("child.yml"), &[]).unwrap();
        assert_eq!(
            resolved,
            tree("key0: value1\nkey1: value2\nkey2: value1\nkey3: value2\nkey4: value5\n")
        );
    }

    #[test]
    fn test_template_inputs() {
        let docs = MemoryDocs::new(&[
            ("args.yml", "key0: value1\nkey1: !key2\n"),
            ("config.yml", "templates:\n  - path: args.yml\n    inputs:\n      key2: value2\n"),
        ]);

        let resolved = resolver(&docs).resolve(Path::new("config.yml"), &[]).unwrap();
        assert_eq!(resolved, tree("key0: value1\nkey1: value2\n"));
    }

    #[test]
    fn test_repeated_template_with_different_inputs() {
        let docs = MemoryDocs::new(&[
            ("entry.yml", "section:\n  - key1: !key2\n"),
            (
                "config.yml",
                "templates:\n  - path: entry.yml\n    inputs:\n      key2: value2\n  - path: entry.yml\n    inputs:\n      key2: value3\n",
            ),
        ]);

        let resolved = resolver(&docs).resolve(Path::new("config.yml"), &[]).unwrap();
        assert_eq!(resolved, tree("section:\n  - key1: value2\n  - key1: value3\n"));
    }

    #[test]
    fn test_overwrite_reference_replaces_lists() {
        let docs = MemoryDocs::new(&[
            ("t0.yml", "key0: value1\nkey1: value2\nkey2:\n  - subkey0: subvalue0\n    subkey1: subvalue1\n"),
            ("t1.yml", "key1: value3\nkey2:\n  - subkey0: subvalue4\n"),
            (
                "config.yml",
                "templates:\n  - t0.yml\n  - path: t1.yml\n    overwrite: true\nkey2:\n  - subkey0: subvalue2\n    subkey1: subvalue3\n",
            ),
        ]);

        let resolved = resolver(&docs).resolve(Path::new("config.yml"), &[]).unwrap();
        assert_eq!(
            resolved,
            tree(
                "key0: value1\nkey1: value3\nkey2:\n  - subkey0: subvalue4\n  - subkey0: subvalue2\n    subkey1: subvalue3\n"
            )
        );
    }

    #[test]
    fn test_merge_reference_concatenates_lists() {
        let docs = MemoryDocs::new(&[
            ("t0.yml", "key1: value2\nkey2:\n  - subkey0: subvalue0\n"),
            ("t1.yml", "key1: value3\nkey2:\n  - subkey0: subvalue4\n"),
            (
                "config.yml",
                "templates:\n  - t0.yml\n  - path: t1.yml\n    overwrite: false\nkey2:\n  - subkey0: subvalue2\n",
            ),
        ]);

        let resolved = resolver(&docs).resolve(Path::new("config.yml"), &[]).unwrap();
        assert_eq!(
            resolved,
            tree("key1: value3\nkey2:\n  - subkey0: subvalue0\n  - subkey0: subvalue4\n  - subkey0: subvalue2\n")
        );
    }

    #[test]
    fn test_missing_path_fails_before_loading_parents() {
        let docs = MemoryDocs::new(&[
            ("base.yml", "key: value\n"),
            ("config.yml", "templates:\n  - base.yml\n  - overwrite: true\n"),
        ]);

        let err = resolver(&docs).resolve(Path::new("config.yml"), &[]).unwrap_err();
        assert!(matches!(err, Error::MissingTemplatePath { index: 1, .. }));
        assert_eq!(*docs.reads.borrow(), vec![PathBuf::from("config.yml")]);
    }

    #[test]
    fn test_empty_inputs_require_every_placeholder() {
        let docs = MemoryDocs::new(&[
            ("versioned.yml", "Setup:\n  appVersion: !version\n"),
            ("config.yml", "templates:\n  - path: versioned.yml\n    inputs: {}\n"),
        ]);

        let err = resolver(&docs).resolve(Path::new("config.yml"), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
    }

    #[test]
    fn test_bare_reference_has_empty_inputs() {
        let docs = MemoryDocs::new(&[
            ("versioned.yml", "Setup:\n  appVersion: !version\n"),
            ("config.yml", "templates:\n  - versioned.yml\n"),
        ]);

        let err = resolver(&docs).resolve(Path::new("config.yml"), &[]).unwrap_err();
        assert!(matches!(err, Error::MissingTemplateArgument { ref name, .. } if name == "version"));
    }

    #[test]
    fn test_entry_inputs() {
        let docs = MemoryDocs::new(&[("app.yml", "Setup:\n  appVersion: !version\n")]);
        let inputs: Inputs = [("version", Value::from("1.4.2"))].into_iter().collect();

        let resolved = resolver(&docs)
            .resolve_with_inputs(Path::new("app.yml"), Some(&inputs), &[])
            .unwrap();
        assert_eq!(resolved, tree("Setup:\n  appVersion: 1.4.2\n"));
    }

    #[test]
    fn test_cycle_detected() {
        let docs = MemoryDocs::new(&[
            ("a.yml", "templates:\n  - b.yml\nkey: a\n"),
            ("b.yml", "templates:\n  - a.yml\nkey: b\n"),
        ]);

        let err = resolver(&docs).resolve(Path::new("a.yml"), &[]).unwrap_err();
        match err {
            Error::TemplateCycle { chain } => assert_eq!(chain, "a.yml -> b.yml -> a.yml"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_collision_between_parents() {
        let docs = MemoryDocs::new(&[
            ("t0.yml", "Setup:\n  compression: [lzma, solid]\n"),
            ("t1.yml", "Setup:\n  compression: lzma\n"),
            ("config.yml", "templates:\n  - t0.yml\n  - t1.yml\n"),
        ]);

        let err = resolver(&docs).resolve(Path::new("config.yml"), &[]).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref path, .. } if path == "Setup.compression"));
    }

    #[test]
    fn test_missing_parent_propagates_not_found() {
        let docs = MemoryDocs::new(&[("config.yml", "templates:\n  - fake_template.yml\nkey0: value1\n")]);
        let err = resolver(&docs).resolve(Path::new("config.yml"), &[]).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
