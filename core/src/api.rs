use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use crate::Result;

/// Account name used when the caller does not ask for a specific one.
pub const DEFAULT_ACCOUNT: &str = "default";

/// CredentialKey names the values a signer needs from a credential provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    /// The service account email, used as the access id.
    ClientEmail,
    /// The PEM encoded RSA private key.
    PrivateKey,
}

impl CredentialKey {
    /// The key as it appears in service account files: `client_email` or `private_key`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::ClientEmail => "client_email",
            CredentialKey::PrivateKey => "private_key",
        }
    }
}

impl Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ProvideCredential is the trait used by signers to look up credential values.
///
/// Where the values live (key files, environment, a metadata service) is up to
/// the implementation. Signers ask exactly once for [`CredentialKey::ClientEmail`]
/// and once for [`CredentialKey::PrivateKey`] per signing call.
///
/// - Returns `Ok(Some(v))` if the value is found.
/// - Returns `Ok(None)` if this provider knows nothing about the account or key.
/// - Returns `Err` if looking up failed.
pub trait ProvideCredential: Debug + Send + Sync + 'static {
    /// Look up `key` for `account`.
    fn provide_credential(&self, account: &str, key: CredentialKey) -> Result<Option<String>>;
}

impl<T: ProvideCredential + ?Sized> ProvideCredential for Arc<T> {
    fn provide_credential(&self, account: &str, key: CredentialKey) -> Result<Option<String>> {
        self.as_ref().provide_credential(account, key)
    }
}

impl<T: ProvideCredential + ?Sized> ProvideCredential for Box<T> {
    fn provide_credential(&self, account: &str, key: CredentialKey) -> Result<Option<String>> {
        self.as_ref().provide_credential(account, key)
    }
}

/// A chain of credential providers that will be tried in order.
pub struct ProvideCredentialChain {
    providers: Vec<Box<dyn ProvideCredential>>,
}

impl ProvideCredentialChain {
    /// Create a new empty credential provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a credential provider to the chain.
    pub fn push(mut self, provider: impl ProvideCredential) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Create a credential provider chain from a vector of providers.
    pub fn from_vec(providers: Vec<Box<dyn ProvideCredential>>) -> Self {
        Self { providers }
    }

    /// Number of providers in this chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if this chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProvideCredentialChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ProvideCredentialChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers_count", &self.providers.len())
            .finish()
    }
}

impl ProvideCredential for ProvideCredentialChain {
    fn provide_credential(&self, account: &str, key: CredentialKey) -> Result<Option<String>> {
        for provider in &self.providers {
            log::debug!("trying credential provider {provider:?} for {account}/{key}");

            match provider.provide_credential(account, key) {
                Ok(Some(v)) => {
                    log::debug!("loaded {key} for {account} from provider: {provider:?}");
                    return Ok(Some(v));
                }
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("error loading {key} from provider {provider:?}: {e:?}");
                    continue;
                }
            }
        }

        Ok(None)
    }
}
