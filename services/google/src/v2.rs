//! Legacy query string signing.
//!
//! - [V2 signing process](https://cloud.google.com/storage/docs/access-control/signed-urls-v2)

use log::debug;
use urlsign_core::hash::base64_encode;
use urlsign_core::time::{expires_in_from, TimeUnit};
use urlsign_core::Result;

use crate::constants::{DEFAULT_EXPIRES_IN_SECS, EXPIRES, GOOGLE_ACCESS_ID, SIGNATURE};
use crate::extension::canonical_extension_headers;
use crate::resource::Resource;
use crate::sign_request::CanonicalSigner;

/// Signer for V2 signed URLs.
///
/// The signature is RSA-SHA256 over a five line canonical string and is
/// base64 encoded into the `Signature` query parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct V2Signer;

impl V2Signer {
    /// Create a new V2 signer.
    pub fn new() -> Self {
        Self
    }
}

/// Canonical form of a V2 request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V2Canonical {
    content: String,
    expires_at: i64,
}

impl V2Canonical {
    /// The canonical string.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Expiration in unix seconds carried by the canonical string.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

/// Build the V2 canonical string:
///
/// ```text
/// VERB
/// Content-MD5
/// Content-Type
/// Expiration
/// [x-goog-<extension>:<value>\n...]/bucket/object
/// ```
pub fn canonical_string(resource: &Resource, expires_at: i64) -> String {
    let mut f = String::with_capacity(128);

    f.push_str(&resource.method().as_str().to_uppercase());
    f.push('\n');
    f.push_str(resource.content_md5().unwrap_or_default());
    f.push('\n');
    f.push_str(resource.content_type().unwrap_or_default());
    f.push('\n');
    f.push_str(&expires_at.to_string());
    f.push('\n');
    if let Some(headers) = canonical_extension_headers(resource.extensions()) {
        f.push_str(&headers);
    }
    f.push_str(&resource.path());

    f
}

impl CanonicalSigner for V2Signer {
    type Canonical = V2Canonical;

    fn build_canonical(&self, resource: &Resource) -> Result<V2Canonical> {
        let expires_at = match resource.expires_at() {
            Some(expires_at) => expires_at,
            None => expires_in_from(
                self.signing_time(),
                DEFAULT_EXPIRES_IN_SECS as i64,
                TimeUnit::Second,
            )?,
        };

        let content = canonical_string(resource, expires_at);
        debug!("calculated v2 canonical string: {content:?}");

        Ok(V2Canonical {
            content,
            expires_at,
        })
    }

    fn string_to_sign(&self, canonical: &V2Canonical) -> String {
        canonical.content.clone()
    }

    fn encode_signature(&self, signature: &[u8]) -> String {
        base64_encode(signature)
    }

    fn assemble_url(
        &self,
        resource: &Resource,
        canonical: &V2Canonical,
        signature: &str,
    ) -> Result<String> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(GOOGLE_ACCESS_ID, resource.account())
            .append_pair(EXPIRES, &canonical.expires_at.to_string())
            .append_pair(SIGNATURE, signature)
            .finish();

        Ok(format!("{}?{}", resource.url_without_query(), query))
    }
}
