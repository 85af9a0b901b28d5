//! Google Cloud Storage signed URLs.
//!
//! Two signing schemes are provided, both RSA-SHA256 with a service account key:
//!
//! - [`V2Signer`]: the legacy scheme, a five line canonical string and a base64 signature.
//! - [`V4Signer`]: the current scheme, a canonical request bound to a credential scope
//!   and a hex signature.
//!
//! [`UrlSigner`] ties a scheme to a credential provider:
//!
//! ```no_run
//! use urlsign_google::{Config, DefaultCredentialProvider, Resource, UrlSigner, V4Signer};
//! use urlsign_core::OsEnv;
//!
//! # fn main() -> urlsign_core::Result<()> {
//! let config = Config::from_env(&OsEnv);
//! let signer = UrlSigner::new(DefaultCredentialProvider::new(), V4Signer::from_config(&config))
//!     .with_config(config);
//!
//! let resource = Resource::builder("downloads", "movie.mp4")
//!     .expires_at(urlsign_core::time::expires_in(10, "minutes".parse()?)?)
//!     .build()?;
//! println!("{}", signer.sign(&resource)?);
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::ServiceAccount;

mod resource;
pub use resource::{Resource, ResourceBuilder, Value};

mod headers;
pub use headers::normalize_headers;

mod extension;
pub use extension::canonical_extension_headers;

mod key;
pub use key::{decode_private_key, sign_rsa_sha256};

mod sign_request;
pub use sign_request::CanonicalSigner;

mod v2;
pub use v2::{V2Canonical, V2Signer};

mod v4;
pub use v4::{CanonicalRequest, V4Signer};

mod signer;
pub use signer::UrlSigner;

mod provide_credential;
pub use provide_credential::{
    DefaultCredentialProvider, EnvCredentialProvider, StaticCredentialProvider,
};
