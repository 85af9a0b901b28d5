//! V4 query string signing.
//!
//! - [V4 signing process](https://cloud.google.com/storage/docs/access-control/signing-urls-manually)
//! - [Canonical requests](https://cloud.google.com/storage/docs/authentication/canonical-requests)

use std::fmt::{self, Display, Formatter};

use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;
use urlsign_core::hash::hex_sha256;
use urlsign_core::time::{format_date, format_iso8601, DateTime};
use urlsign_core::{Error, Result};

use crate::config::Config;
use crate::constants::{
    DEFAULT_EXPIRES_IN_SECS, DEFAULT_LOCATION, GOOG4_RSA_SHA256, GOOG_QUERY_ENCODE_SET, MAX_V4_EXPIRES_IN_SECS,
    STORAGE_SERVICE, UNSIGNED_PAYLOAD, X_GOOG_ALGORITHM, X_GOOG_CREDENTIAL, X_GOOG_DATE,
    X_GOOG_EXPIRES, X_GOOG_PREFIX, X_GOOG_SIGNATURE, X_GOOG_SIGNED_HEADERS,
};
use crate::extension::extension_headers;
use crate::headers::{dasherize, normalize_headers};
use crate::resource::{Resource, Value};
use crate::sign_request::CanonicalSigner;

/// Signer for V4 signed URLs.
///
/// ```
/// use urlsign_google::{CanonicalSigner, Resource, V4Signer};
///
/// let signer = V4Signer::new().with_location("europe-west1");
/// let resource = Resource::builder("downloads", "movie.mp4")
///     .account("signer@example.iam.gserviceaccount.com")
///     .build()
///     .unwrap();
///
/// let canonical = signer.build_canonical(&resource).unwrap();
/// assert!(canonical.scope().ends_with("/europe-west1/storage/goog4_request"));
/// ```
#[derive(Debug, Clone)]
pub struct V4Signer {
    location: String,
    time: Option<DateTime>,
}

impl Default for V4Signer {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            time: None,
        }
    }
}

impl V4Signer {
    /// Create a new V4 signer for location `us`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a V4 signer using the location from config.
    pub fn from_config(config: &Config) -> Self {
        Self::new().with_location(&config.location)
    }

    /// Set the location used in the credential scope.
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The location used in the credential scope.
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Canonical request built for V4 signing.
///
/// Displaying it yields the exact canonical request text:
///
/// ```text
/// HTTP_VERB
/// PATH_TO_RESOURCE
/// CANONICAL_QUERY_STRING
/// CANONICAL_HEADERS
///
/// SIGNED_HEADERS
/// UNSIGNED-PAYLOAD
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: Method,
    path: String,
    query: String,
    headers: Vec<(String, String)>,
    signed_headers: String,
    timestamp: String,
    scope: String,
}

impl CanonicalRequest {
    /// Percent encoded canonical query string, without the signature.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Canonical headers as sorted `(name, value)` pairs.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Signed header names joined by `;`.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// Signing time in `YYYYMMDDTHHMMSSZ` format.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Credential scope: `<date>/<location>/storage/goog4_request`.
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.path)?;
        writeln!(f, "{}", self.query)?;
        for (k, v) in &self.headers {
            writeln!(f, "{k}:{v}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{UNSIGNED_PAYLOAD}")
    }
}

impl CanonicalSigner for V4Signer {
    type Canonical = CanonicalRequest;

    fn build_canonical(&self, resource: &Resource) -> Result<CanonicalRequest> {
        let method = resource.method().clone();
        if ![Method::GET, Method::HEAD, Method::PUT, Method::DELETE].contains(&method) {
            return Err(Error::validation_failure(
                "method",
                format!("{method} can't be signed with V4"),
            ));
        }

        let now = self.signing_time();
        let expires_in = match resource.expires_at() {
            Some(expires_at) => expires_at.checked_sub(now.timestamp()).ok_or_else(|| {
                Error::validation_failure("expires", format!("{expires_at} is out of range"))
            })?,
            None => DEFAULT_EXPIRES_IN_SECS as i64,
        };
        if expires_in <= 0 {
            return Err(Error::validation_failure(
                "expires",
                "expiration must be later than the signing time",
            ));
        }
        if expires_in > MAX_V4_EXPIRES_IN_SECS {
            return Err(Error::validation_failure(
                "expires",
                format!("expiration can't be more than {MAX_V4_EXPIRES_IN_SECS} seconds ahead"),
            ));
        }

        let headers = canonical_headers(resource)?;
        let signed_headers = headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");

        let timestamp = format_iso8601(now);
        let scope = format!(
            "{}/{}/{}/goog4_request",
            format_date(now),
            self.location,
            STORAGE_SERVICE
        );

        let required = [
            (X_GOOG_ALGORITHM, GOOG4_RSA_SHA256.to_string()),
            (
                X_GOOG_CREDENTIAL,
                format!("{}/{}", resource.account(), scope),
            ),
            (X_GOOG_DATE, timestamp.clone()),
            (X_GOOG_EXPIRES, expires_in.to_string()),
            (X_GOOG_SIGNED_HEADERS, signed_headers.clone()),
        ];
        let mut params = resource.query().to_vec();
        for (k, v) in required {
            if params.iter().any(|(pk, _)| pk == k) {
                debug!("query parameter {k} is supplied by caller, keep it");
                continue;
            }
            params.push((k.to_string(), v));
        }
        let query = canonicalize_query(params);

        let req = CanonicalRequest {
            method,
            path: resource.path(),
            query,
            headers,
            signed_headers,
            timestamp,
            scope,
        };
        debug!("calculated v4 canonical request: {req}");

        Ok(req)
    }

    fn string_to_sign(&self, canonical: &CanonicalRequest) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            GOOG4_RSA_SHA256,
            canonical.timestamp,
            canonical.scope,
            hex_sha256(canonical.to_string().as_bytes())
        )
    }

    fn encode_signature(&self, signature: &[u8]) -> String {
        hex::encode(signature)
    }

    fn assemble_url(
        &self,
        resource: &Resource,
        canonical: &CanonicalRequest,
        signature: &str,
    ) -> Result<String> {
        Ok(format!(
            "{}?{}&{}={}",
            resource.url_without_query(),
            canonical.query,
            X_GOOG_SIGNATURE,
            signature
        ))
    }

    fn signing_time(&self) -> DateTime {
        self.time.unwrap_or_else(urlsign_core::time::now)
    }
}

/// Collect every header the request will carry and normalize them.
///
/// The host is derived from the base URL unless the caller supplied one.
fn canonical_headers(resource: &Resource) -> Result<Vec<(String, String)>> {
    let mut pairs: Vec<(String, Value)> = resource
        .headers()
        .iter()
        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
        .collect();

    if let Some(v) = resource.content_type() {
        pairs.push(("content-type".to_string(), v.into()));
    }
    if let Some(v) = resource.content_md5() {
        pairs.push(("content-md5".to_string(), v.into()));
    }
    for (k, v) in extension_headers(resource.extensions()) {
        pairs.push((format!("{X_GOOG_PREFIX}{k}"), v.into()));
    }
    if !pairs.iter().any(|(k, _)| dasherize(k) == "host") {
        pairs.push(("host".to_string(), resource.host()?.into()));
    }

    Ok(normalize_headers(&pairs))
}

/// Sort parameters by raw key then value, and percent encode both.
fn canonicalize_query(mut params: Vec<(String, String)>) -> String {
    params.sort();

    params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &GOOG_QUERY_ENCODE_SET),
                utf8_percent_encode(v, &GOOG_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
