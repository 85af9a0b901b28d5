use std::sync::Arc;

use log::debug;
use urlsign_core::time::{expires_in_from, TimeUnit};
use urlsign_core::{CredentialKey, Error, ProvideCredential, Result, DEFAULT_ACCOUNT};

use crate::config::Config;
use crate::resource::Resource;
use crate::sign_request::CanonicalSigner;

/// UrlSigner is the main struct used to sign URLs.
///
/// It fills in the defaults from [`Config`], asks the credential provider for
/// the account's email and private key, then hands over to the signing scheme.
///
/// ```no_run
/// use urlsign_google::{Resource, StaticCredentialProvider, UrlSigner, V4Signer};
///
/// # fn main() -> urlsign_core::Result<()> {
/// let provider = StaticCredentialProvider::from_json(&std::fs::read_to_string("sa.json")?)?;
/// let signer = UrlSigner::new(provider, V4Signer::new());
///
/// let resource = Resource::builder("downloads", "movie.mp4").build()?;
/// let url = signer.sign(&resource)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct UrlSigner<S: CanonicalSigner> {
    config: Config,
    provider: Arc<dyn ProvideCredential>,
    scheme: S,
}

impl<S: CanonicalSigner> UrlSigner<S> {
    /// Create a new signer with the default config.
    pub fn new(provider: impl ProvideCredential, scheme: S) -> Self {
        Self {
            config: Config::default(),
            provider: Arc::new(provider),
            scheme,
        }
    }

    /// Use `config` for defaults.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The signing scheme in use.
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Sign `resource` and return the signed URL.
    ///
    /// The private key is only held for the duration of this call.
    pub fn sign(&self, resource: &Resource) -> Result<String> {
        let resource = self.resolve(resource)?;
        let account = resource.account();

        let client_email = self.credential(account, CredentialKey::ClientEmail)?;
        let private_key = self.credential(account, CredentialKey::PrivateKey)?;

        let resource = resource.with_account(client_email);
        self.scheme.sign_url(&resource, &private_key)
    }

    /// Apply config defaults to fields the resource left unset.
    fn resolve(&self, resource: &Resource) -> Result<Resource> {
        let mut resource = resource.clone();

        if !resource.has_base_url() && self.config.base_url != resource.base_url() {
            resource = resource.with_base_url(&self.config.base_url)?;
        }

        if resource.expires_at().is_none() {
            let expires_in = i64::try_from(self.config.expires_in.as_secs()).map_err(|e| {
                Error::validation_failure("expires", "expires_in is out of range").with_source(e)
            })?;
            let expires_at =
                expires_in_from(self.scheme.signing_time(), expires_in, TimeUnit::Second)?;
            resource = resource.with_expires_at(expires_at);
        }

        if resource.account() == DEFAULT_ACCOUNT && self.config.account != DEFAULT_ACCOUNT {
            resource = resource.with_account(&self.config.account);
        }

        Ok(resource)
    }

    fn credential(&self, account: &str, key: CredentialKey) -> Result<String> {
        debug!("looking up {key} of account {account}");
        self.provider
            .provide_credential(account, key)?
            .ok_or_else(|| Error::config_not_found(key.as_str()))
    }
}
