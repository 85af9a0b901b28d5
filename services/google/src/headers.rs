//! Canonical header normalization shared by both signing versions.
//!
//! Nested values are flattened into `parent-child` names, names are dasherized
//! and lowercased, values have folding whitespace collapsed, duplicated names
//! are merged into one comma joined value and the result is sorted by name.

use std::collections::BTreeMap;

use crate::resource::Value;

/// Normalize nested key/value pairs into sorted, unique `(name, value)` headers.
///
/// ```
/// use urlsign_google::{normalize_headers, Value};
///
/// let headers = normalize_headers(&[
///     ("x".to_string(), Value::from("a")),
///     ("x".to_string(), Value::from("b")),
/// ]);
/// assert_eq!(headers, vec![("x".to_string(), "a,b".to_string())]);
/// ```
pub fn normalize_headers(pairs: &[(String, Value)]) -> Vec<(String, String)> {
    let mut flat = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        flatten(dasherize(key), value, &mut flat);
    }

    merge(flat)
}

/// Transform a key segment: `_` becomes `-`, surrounding whitespace is trimmed
/// and the result is lowercased.
pub fn dasherize(key: &str) -> String {
    key.replace('_', "-").trim().to_lowercase()
}

/// Collapse every run of ASCII whitespace into a single space and trim both ends.
///
/// Non-ASCII spaces such as U+00A0 are part of the value and kept as is.
pub fn fold_whitespace(value: &str) -> String {
    value
        .split(|c: char| c.is_ascii_whitespace())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn flatten(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Group(pairs) => {
            for (child, v) in pairs {
                flatten(join_key(&key, &dasherize(child)), v, out);
            }
        }
        Value::List(values) => {
            for v in values {
                flatten(key.clone(), v, out);
            }
        }
        scalar => {
            if key.is_empty() {
                return;
            }
            if let Some(v) = render_scalar(scalar) {
                out.push((key, v));
            }
        }
    }
}

fn join_key(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{parent}-{child}"),
    }
}

/// Render a scalar value, `None` means the key must be dropped.
fn render_scalar(value: &Value) -> Option<String> {
    let v = match value {
        Value::String(v) => fold_whitespace(v),
        Value::Symbol(v) => fold_whitespace(&v.replace('_', "-")),
        Value::Bool(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Null | Value::List(_) | Value::Group(_) => return None,
    };

    (!v.is_empty()).then_some(v)
}

/// Merge duplicated names in first seen order and sort by name.
fn merge(headers: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (k, v) in headers {
        merged.entry(k).or_default().push(v);
    }

    merged
        .into_iter()
        .map(|(k, vs)| (k, vs.join(",")))
        .collect()
}
