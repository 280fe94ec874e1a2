//! Canonicalization of untrusted project documents.
//!
//! Each output field is resolved from an ordered list of candidate paths.
//! The first candidate whose value passes its check wins; if none does the
//! field falls back to the empty string. `version` and `kind` are always
//! stamped, never read from the input.
//!
//! Accepted shapes:
//!
//! ```text
//! { "html": .., "css": .., "js": .., "assignment": .., "test": .. }   current
//! { "web": { "html": .., "css": .., "js": .. }, "task": .., "tests": .. }  legacy
//! ```

use lab_core::entities::ProjectDocument;
use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Check applied to a candidate value.
#[derive(Debug, Clone, Copy)]
enum Accept {
    /// Any string, including the empty string.
    Text,
    /// A non-empty string. Used for fallback paths, where an empty or
    /// missing value should defer to the default instead.
    NonEmptyText,
}

impl Accept {
    fn check(self, value: &Value) -> Option<&str> {
        let text = value.as_str()?;
        match self {
            Self::Text => Some(text),
            Self::NonEmptyText => (!text.is_empty()).then_some(text),
        }
    }
}

#[derive(Debug)]
struct Candidate {
    path: &'static [&'static str],
    accept: Accept,
}

const fn primary(key: &'static [&'static str]) -> Candidate {
    Candidate {
        path: key,
        accept: Accept::Text,
    }
}

const fn fallback(path: &'static [&'static str]) -> Candidate {
    Candidate {
        path,
        accept: Accept::NonEmptyText,
    }
}

const HTML: &[Candidate] = &[primary(&["html"]), fallback(&["web", "html"])];
const CSS: &[Candidate] = &[primary(&["css"]), fallback(&["web", "css"])];
const JS: &[Candidate] = &[primary(&["js"]), fallback(&["web", "js"])];
const ASSIGNMENT: &[Candidate] = &[primary(&["assignment"]), fallback(&["task"])];
const TEST: &[Candidate] = &[primary(&["test"]), fallback(&["tests"])];

/// Convert an arbitrary JSON value into the canonical project document.
///
/// Any JSON object normalizes successfully: unknown keys are ignored and
/// missing or mistyped fields take their defaults. The operation is
/// idempotent: normalizing the serialized output yields the same document.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidInput`] when `raw` is not a JSON object
/// (`null`, a primitive, or an array).
pub fn normalize(raw: &Value) -> Result<ProjectDocument, SchemaError> {
    let Value::Object(map) = raw else {
        let found = type_name(raw);
        tracing::debug!(found, "rejecting non-object project document");
        return Err(SchemaError::InvalidInput { found });
    };

    Ok(ProjectDocument {
        assignment: resolve(map, ASSIGNMENT),
        test: resolve(map, TEST),
        html: resolve(map, HTML),
        css: resolve(map, CSS),
        js: resolve(map, JS),
        ..ProjectDocument::default()
    })
}

fn resolve(map: &Map<String, Value>, candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .find_map(|candidate| lookup(map, candidate.path).and_then(|v| candidate.accept.check(v)))
        .unwrap_or_default()
        .to_string()
}

fn lookup<'a>(map: &'a Map<String, Value>, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter()
        .try_fold(map.get(*first)?, |value, key| value.as_object()?.get(*key))
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
