use urlsign_core::{CredentialKey, Env, ProvideCredential, ProvideCredentialChain, Result};

use super::EnvCredentialProvider;

/// DefaultCredentialProvider tries to load credentials from multiple sources in order.
///
/// The environment comes first, providers added with
/// [`DefaultCredentialProvider::push`] are asked afterwards.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider reading the process environment.
    pub fn new() -> Self {
        Self::with_provider(EnvCredentialProvider::new())
    }

    /// Create a new DefaultCredentialProvider reading variables from `env`.
    pub fn with_env(env: impl Env) -> Self {
        Self::with_provider(EnvCredentialProvider::new().with_env(env))
    }

    fn with_provider(provider: EnvCredentialProvider) -> Self {
        Self {
            chain: ProvideCredentialChain::new().push(provider),
        }
    }

    /// Ask `provider` after every provider already in the chain.
    pub fn push(mut self, provider: impl ProvideCredential) -> Self {
        self.chain = self.chain.push(provider);
        self
    }
}

impl ProvideCredential for DefaultCredentialProvider {
    fn provide_credential(&self, account: &str, key: CredentialKey) -> Result<Option<String>> {
        self.chain.provide_credential(account, key)
    }
}
