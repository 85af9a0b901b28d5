use std::fmt::Debug;

use log::debug;
use urlsign_core::time::{self, DateTime};
use urlsign_core::Result;

use crate::key::sign_rsa_sha256;
use crate::resource::Resource;

/// CanonicalSigner is one signed URL protocol: how a resource becomes a
/// canonical string, how the signature is encoded and how the final URL
/// is put together.
///
/// The resource handed in must be resolved: [`Resource::account`] holds the
/// access id (the service account email) and [`Resource::expires_at`] is set.
pub trait CanonicalSigner: Debug + Send + Sync + 'static {
    /// Everything computed while canonicalizing that assembling the URL needs again.
    type Canonical: Debug;

    /// Build the canonical form of `resource`.
    fn build_canonical(&self, resource: &Resource) -> Result<Self::Canonical>;

    /// The exact bytes that get signed.
    fn string_to_sign(&self, canonical: &Self::Canonical) -> String;

    /// Encode a raw RSA signature for use in the URL.
    fn encode_signature(&self, signature: &[u8]) -> String;

    /// Put the resource, canonical query and signature together into the signed URL.
    fn assemble_url(
        &self,
        resource: &Resource,
        canonical: &Self::Canonical,
        signature: &str,
    ) -> Result<String>;

    /// The time this signer considers "now".
    fn signing_time(&self) -> DateTime {
        time::now()
    }

    /// Sign the canonical form with an RSA private key in PEM format.
    fn sign(&self, canonical: &Self::Canonical, private_key_pem: &str) -> Result<String> {
        let string_to_sign = self.string_to_sign(canonical);
        debug!("calculated string to sign: {string_to_sign:?}");

        let signature = sign_rsa_sha256(private_key_pem, string_to_sign.as_bytes())?;
        Ok(self.encode_signature(&signature))
    }

    /// Canonicalize, sign and assemble in one go.
    fn sign_url(&self, resource: &Resource, private_key_pem: &str) -> Result<String> {
        let canonical = self.build_canonical(resource)?;
        let signature = self.sign(&canonical, private_key_pem)?;
        self.assemble_url(resource, &canonical, &signature)
    }
}
