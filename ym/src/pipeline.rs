//! Resolve, validate and render in one pass

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::render::render;
use crate::schema::Schema;
use crate::source::{DocumentKind, Environment};
use crate::template::Resolver;
use crate::validate::validate;

/// Sequences template resolution, validation and rendering
///
/// Rendering only starts once validation has succeeded, so a failed compile
/// never yields partial output.
pub struct Pipeline {
    resolver: Resolver,
    template_hints: Vec<PathBuf>,
    schema_hints: Vec<PathBuf>,
}

impl Pipeline {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            template_hints: Vec::new(),
            schema_hints: Vec::new(),
        }
    }

    /// Pipeline over the filesystem, searching `env`'s search paths
    pub fn filesystem(env: impl Environment + 'static) -> Self {
        Self::new(Resolver::filesystem(env))
    }

    /// Extra directories searched for templates after the environment's
    pub fn with_template_hints(mut self, hints: Vec<PathBuf>) -> Self {
        self.template_hints = hints;
        self
    }

    /// Extra directories searched for schemas after the environment's
    pub fn with_schema_hints(mut self, hints: Vec<PathBuf>) -> Self {
        self.schema_hints = hints;
        self
    }

    pub fn load_schema(&self, path: &Path) -> Result<Schema> {
        debug!(?path, "Pipeline::load_schema: called");
        let (located, tree) = self.resolver.load_tree(path, DocumentKind::Schema, &self.schema_hints)?;
        Schema::from_yaml(tree, &located)
    }

    /// Compile an entry template against an already loaded schema
    pub fn compile(&self, input: &Path, schema: &Schema) -> Result<String> {
        debug!(?input, "Pipeline::compile: called");
        let config = self.resolver.resolve(input, &self.template_hints)?;
        validate(&config, schema)?;
        let output = render(&config, schema)?;
        debug!(?input, bytes = output.len(), "Pipeline::compile: complete");
        Ok(output)
    }

    /// Load `schema_path` and compile `input` against it
    pub fn run(&self, input: &Path, schema_path: &Path) -> Result<String> {
        let schema = self.load_schema(schema_path)?;
        self.compile(input, &schema)
    }
}

/// Schema file sitting next to the input file
pub fn default_schema_path(input: &Path, file_name: &str) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
