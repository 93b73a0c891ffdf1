//! Template resolution and merging
//!
//! A template is a YAML document that may declare parent templates:
//!
//! ```yaml
//! templates:
//!   - common/setup.yml
//!   - path: common/files.yml
//!     inputs:
//!       app: Demo
//!   - path: overrides.yml
//!     overwrite: true
//! Setup:
//!   appName: Demo
//! ```
//!
//! Parents are resolved recursively, parameterized by literal `!name`
//! placeholder substitution, and deep-merged into a single configuration
//! tree. See [`merge()`] for the merge semantics.

mod merge;
mod placeholder;
mod reference;
mod resolver;
mod shape;

pub use merge::{fold, merge};
pub use placeholder::{Inputs, substitute};
pub use reference::TemplateReference;
pub use resolver::{MAX_DEPTH, Resolver};
pub use shape::{TEMPLATES_KEY, TemplateDocument};
