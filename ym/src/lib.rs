//! Yamelinno - layered YAML to installer script compiler
//!
//! Yamelinno compiles a tree of YAML template documents into a flat,
//! sectioned installer script in three stages:
//!
//! 1. **Resolve**: load the entry template and its parents, substitute
//!    `!name` placeholders and deep-merge everything into one tree
//! 2. **Validate**: check the tree against a schema of sections and fields
//! 3. **Render**: emit `[Section]` blocks using the schema's rendered names
//!
//! # Modules
//!
//! - [`template`] - Template resolution, placeholders and merging
//! - [`schema`] - Schema model
//! - [`validate`] - Schema validation
//! - [`render`] - Output rendering
//! - [`pipeline`] - Resolve, validate and render in one pass
//! - [`source`] - Locating, reading and parsing documents
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod source;
pub mod template;
pub mod validate;
pub mod value;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use pipeline::{Pipeline, default_schema_path};
pub use render::{render, render_value};
pub use schema::{Children, FieldDefinition, Schema, SectionDefinition};
pub use source::{DocumentKind, Environment, ProcessEnv, StaticEnv};
pub use template::{Inputs, Resolver, TemplateReference, fold, merge};
pub use validate::validate;
pub use value::{Mapping, Value, ValueKind};
