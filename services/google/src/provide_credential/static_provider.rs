use std::collections::HashMap;

use log::debug;
use urlsign_core::{CredentialKey, ProvideCredential, Result, DEFAULT_ACCOUNT};

use crate::credential::ServiceAccount;

/// StaticCredentialProvider serves service accounts given at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialProvider {
    accounts: HashMap<String, ServiceAccount>,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider serving `sa` as the `default` account.
    pub fn new(sa: ServiceAccount) -> Self {
        Self::default().with_account(DEFAULT_ACCOUNT, sa)
    }

    /// Create a new StaticCredentialProvider from service account JSON content.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(Self::new(ServiceAccount::from_json(content)?))
    }

    /// Serve `sa` under account `name`, replacing any previous one.
    pub fn with_account(mut self, name: impl Into<String>, sa: ServiceAccount) -> Self {
        self.accounts.insert(name.into(), sa);
        self
    }
}

impl ProvideCredential for StaticCredentialProvider {
    fn provide_credential(&self, account: &str, key: CredentialKey) -> Result<Option<String>> {
        let Some(sa) = self.accounts.get(account) else {
            debug!("account {account} is not configured in static provider");
            return Ok(None);
        };

        debug!("loaded {key} of account {account} from static provider");
        Ok(Some(sa.get(key).to_string()))
    }
}
