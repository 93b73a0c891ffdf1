//! Literal placeholder substitution
//!
//! Runs on raw document text before it is parsed. A placeholder is `!`
//! followed by an identifier; the longest identifier wins, so `!version`
//! never matches inside `!version_major`.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::value::Mapping;

/// Placeholder arguments for a template, name to scalar
pub type Inputs = Mapping;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern is valid"));

/// Replace every placeholder in `text` with its input value
///
/// With `inputs` set to `None` the text is returned untouched. With a
/// mapping (even an empty one) every placeholder must have an input.
pub fn substitute(text: &str, inputs: Option<&Inputs>, origin: &Path) -> Result<String> {
    let Some(inputs) = inputs else {
        debug!(?origin, "substitute: no inputs, leaving text as-is");
        return Ok(text.to_string());
    };
    debug!(?origin, input_count = inputs.len(), "substitute: called");

    let mut rendered = String::with_capacity(text.len());
    let mut last = 0;
    for found in PLACEHOLDER.find_iter(text) {
        let name = &found.as_str()[1..];
        let value = inputs.get(name).ok_or_else(|| Error::MissingTemplateArgument {
            origin: origin.display().to_string(),
            name: name.to_string(),
        })?;
        let replacement = value
            .scalar_text()
            .ok_or_else(|| Error::shape(origin, format!("input '{}' must be a scalar", name)))?;

        rendered.push_str(&text[last..found.start()]);
        rendered.push_str(&replacement);
        last = found.end();
    }
    rendered.push_str(&text[last..]);
    Ok(rendered)
}
