use log::debug;

use crate::constants::{SECRET_EXTENSION_HEADERS, X_GOOG_PREFIX};
use crate::headers::{dasherize, normalize_headers};
use crate::resource::Value;

/// The default ACL. Sending it is the same as sending nothing.
const DEFAULT_ACL: &str = "private";

/// Normalize extension headers into `(name, value)` pairs without the
/// `x-goog-` prefix.
///
/// The default `acl` and the customer supplied encryption key headers are
/// left out.
pub fn extension_headers(extensions: &[(String, Value)]) -> Vec<(String, String)> {
    let extensions: Vec<(String, Value)> = extensions
        .iter()
        .filter(|(k, v)| !is_default_acl(k, v))
        .cloned()
        .collect();

    normalize_headers(&extensions)
        .into_iter()
        .filter(|(k, _)| {
            let secret = SECRET_EXTENSION_HEADERS.contains(&k.as_str());
            if secret {
                debug!("extension header {k} is left out of the canonical string");
            }
            !secret
        })
        .collect()
}

/// Render extension headers as canonical `x-goog-<name>:<value>\n` lines.
///
/// Returns `None` when no header survives normalization so callers never emit
/// a stray newline.
///
/// ```
/// use urlsign_google::{canonical_extension_headers, Value};
///
/// let lines = canonical_extension_headers(&[
///     ("acl".to_string(), Value::symbol("public_read")),
///     ("meta".to_string(), Value::group([("environment", "test")])),
/// ]);
/// assert_eq!(
///     lines.as_deref(),
///     Some("x-goog-acl:public-read\nx-goog-meta-environment:test\n")
/// );
/// ```
pub fn canonical_extension_headers(extensions: &[(String, Value)]) -> Option<String> {
    let headers = extension_headers(extensions);
    if headers.is_empty() {
        return None;
    }

    let mut s = String::with_capacity(64);
    for (k, v) in headers {
        s.push_str(X_GOOG_PREFIX);
        s.push_str(&k);
        s.push(':');
        s.push_str(&v);
        s.push('\n');
    }
    Some(s)
}

fn is_default_acl(key: &str, value: &Value) -> bool {
    if dasherize(key) != "acl" {
        return false;
    }

    match value {
        Value::Symbol(v) | Value::String(v) => v.trim().eq_ignore_ascii_case(DEFAULT_ACL),
        _ => false,
    }
}
