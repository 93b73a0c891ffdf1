//! Deep merge of configuration trees
//!
//! Merge semantics (`overwrite = false`):
//! - Mappings: merged by key, recursively
//! - Sequences: source items appended after destination items
//! - Scalars: source wins, but only over a value of the same kind
//!
//! With `overwrite = true` each top-level key of the source replaces the
//! destination's value wholesale; keys absent from the source are kept.

use crate::error::{Error, Result};
use crate::value::{Mapping, Value};

/// Merge `source` into `destination`
///
/// The source is only read; every value taken from it is cloned, so the
/// result never shares data with a tree that is still in use elsewhere.
pub fn merge(source: &Mapping, destination: Mapping, overwrite: bool) -> Result<Mapping> {
    if overwrite {
        let mut destination = destination;
        for (key, value) in source.iter() {
            destination.insert(key, value.clone());
        }
        return Ok(destination);
    }
    merge_at(source, destination, "")
}

/// Fold trees left to right, each with its own overwrite flag
///
/// `fold([(t1, a), (t2, b)])` equals `merge(t2, merge(t1, {}, a), b)`.
pub fn fold<I>(trees: I) -> Result<Mapping>
where
    I: IntoIterator<Item = (Mapping, bool)>,
{
    trees
        .into_iter()
        .try_fold(Mapping::new(), |acc, (tree, overwrite)| merge(&tree, acc, overwrite))
}

fn merge_at(source: &Mapping, mut destination: Mapping, path: &str) -> Result<Mapping> {
    for (key, value) in source.iter() {
        let key_path = if path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", path, key)
        };

        match value {
            Value::Mapping(child) => {
                let merged = match destination.get_mut(key) {
                    Some(Value::Mapping(existing)) => merge_at(child, std::mem::take(existing), &key_path)?,
                    Some(existing) => return Err(mismatch(key_path, existing, value)),
                    None => merge_at(child, Mapping::new(), &key_path)?,
                };
                destination.insert(key, Value::Mapping(merged));
            }
            Value::Sequence(items) => match destination.get_mut(key) {
                Some(Value::Sequence(existing)) => existing.extend(items.iter().cloned()),
                Some(existing) => return Err(mismatch(key_path, existing, value)),
                None => {
                    destination.insert(key, Value::Sequence(items.clone()));
                }
            },
            scalar => {
                if let Some(existing) = destination.get(key)
                    && existing.kind() != scalar.kind()
                {
                    return Err(mismatch(key_path, existing, scalar));
                }
                destination.insert(key, scalar.clone());
            }
        }
    }
    Ok(destination)
}

fn mismatch(path: String, existing: &Value, incoming: &Value) -> Error {
    Error::TypeMismatch {
        path,
        expected: existing.kind(),
        found: incoming.kind(),
    }
}
