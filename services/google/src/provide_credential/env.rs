use std::sync::Arc;

use log::debug;
use urlsign_core::{
    CredentialKey, Env, Error, OsEnv, ProvideCredential, Result, DEFAULT_ACCOUNT,
};

use crate::constants::{GOOGLE_APPLICATION_CREDENTIALS, GOOGLE_APPLICATION_CREDENTIALS_JSON};
use crate::credential::ServiceAccount;

/// EnvCredentialProvider serves the `default` account from environment variables.
///
/// - `GOOGLE_APPLICATION_CREDENTIALS`: path to a service account key file
/// - `GOOGLE_APPLICATION_CREDENTIALS_JSON`: the key file content itself
///
/// The key file is read again on every call, nothing is cached.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    env: Arc<dyn Env>,
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider reading the process environment.
    pub fn new() -> Self {
        Self {
            env: Arc::new(OsEnv),
        }
    }

    /// Read variables from `env` instead of the process environment.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    fn load(&self) -> Result<Option<ServiceAccount>> {
        if let Some(path) = self.env.var(GOOGLE_APPLICATION_CREDENTIALS) {
            let path = self.env.expand_home_dir(&path).ok_or_else(|| {
                Error::unexpected(format!("can't expand home dir in {path}"))
            })?;
            debug!("loading service account from {path}");

            let content = std::fs::read(&path).map_err(|e| {
                Error::unexpected(format!("failed to read credential file {path}")).with_source(e)
            })?;
            return ServiceAccount::from_slice(&content).map(Some);
        }

        if let Some(content) = self.env.var(GOOGLE_APPLICATION_CREDENTIALS_JSON) {
            debug!("loading service account from {GOOGLE_APPLICATION_CREDENTIALS_JSON}");
            return ServiceAccount::from_json(&content).map(Some);
        }

        Ok(None)
    }
}

impl ProvideCredential for EnvCredentialProvider {
    fn provide_credential(&self, account: &str, key: CredentialKey) -> Result<Option<String>> {
        if account != DEFAULT_ACCOUNT {
            return Ok(None);
        }

        Ok(self.load()?.map(|sa| sa.get(key).to_string()))
    }
}
