use std::time::Duration;

use log::warn;
use urlsign_core::Env;

use crate::constants::*;

/// Config carries the defaults applied while signing Google Cloud Storage URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Endpoint used when a resource carries no base URL.
    pub base_url: String,
    /// Location used in the V4 credential scope.
    pub location: String,
    /// Account looked up when a resource doesn't name one.
    pub account: String,
    /// Lifetime of a signed URL when a resource carries no expiration.
    pub expires_in: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            account: urlsign_core::DEFAULT_ACCOUNT.to_string(),
            expires_in: Duration::from_secs(DEFAULT_EXPIRES_IN_SECS),
        }
    }
}

impl Config {
    /// Create a new config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the account.
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    /// Set the default lifetime.
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// Load config from environment variables.
    pub fn from_env(env: &impl Env) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = env.var(GOOGLE_STORAGE_ENDPOINT) {
            cfg.base_url = v;
        }

        if let Some(v) = env.var(GOOGLE_REGION) {
            cfg.location = v;
        }

        if let Some(v) = env.var(GOOGLE_ACCOUNT) {
            cfg.account = v;
        }

        if let Some(v) = env.var(GOOGLE_SIGNED_URL_EXPIRES_IN) {
            match v.trim().parse::<u64>() {
                Ok(secs) => cfg.expires_in = Duration::from_secs(secs),
                Err(e) => warn!("{GOOGLE_SIGNED_URL_EXPIRES_IN} is not a number of seconds, ignored: {e}"),
            }
        }

        cfg
    }
}
