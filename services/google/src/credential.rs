use std::fmt::{self, Debug};

use serde::Deserialize;
use urlsign_core::utils::Redact;
use urlsign_core::{CredentialKey, Error, Result};

/// ServiceAccount holds the parts of a service account key file used for signing.
///
/// Other fields of the key file are ignored.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    /// Email of the service account, used as the access id.
    pub client_email: String,
    /// RSA private key in PEM format.
    pub private_key: String,
}

impl Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key", &Redact::from(&self.private_key))
            .finish()
    }
}

#[derive(Deserialize)]
struct KeyFile {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(flatten)]
    account: ServiceAccount,
}

impl ServiceAccount {
    /// Create a service account from its email and PEM private key.
    pub fn new(client_email: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            client_email: client_email.into(),
            private_key: private_key.into(),
        }
    }

    /// Parse a service account key file.
    ///
    /// Files declaring a `type` other than `service_account` are rejected.
    pub fn from_slice(v: &[u8]) -> Result<Self> {
        let file: KeyFile = serde_json::from_slice(v)
            .map_err(|e| Error::unexpected("failed to parse service account").with_source(e))?;

        match file.kind.as_deref() {
            None | Some("service_account") => Ok(file.account),
            Some(kind) => Err(Error::unexpected(format!(
                "credential type {kind} can't sign urls, service_account is required"
            ))),
        }
    }

    /// Parse a service account key file from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        Self::from_slice(content.as_bytes())
    }

    /// Return the value stored for `key`.
    pub fn get(&self, key: CredentialKey) -> &str {
        match key {
            CredentialKey::ClientEmail => &self.client_email,
            CredentialKey::PrivateKey => &self.private_key,
        }
    }
}
