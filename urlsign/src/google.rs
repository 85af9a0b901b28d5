//! Google Cloud Storage signed URLs.

pub use urlsign_google::*;

use urlsign_core::OsEnv;

/// Default signer type: V4 signing with credentials from the environment.
pub type DefaultSigner = UrlSigner<V4Signer>;

/// Create a V4 signer configured from the process environment.
///
/// Credentials come from [`DefaultCredentialProvider`], defaults from
/// [`Config::from_env`].
pub fn default_signer() -> DefaultSigner {
    let config = Config::from_env(&OsEnv);
    let signer = V4Signer::from_config(&config);
    UrlSigner::new(DefaultCredentialProvider::new(), signer).with_config(config)
}

/// Create a V2 signer configured from the process environment.
pub fn default_v2_signer() -> UrlSigner<V2Signer> {
    let config = Config::from_env(&OsEnv);
    UrlSigner::new(DefaultCredentialProvider::new(), V2Signer::new()).with_config(config)
}
