//! Core components for signing object storage URLs.
//!
//! This crate provides the foundational types and traits shared by the urlsign
//! service crates. It holds no service specific logic and performs no network I/O.
//!
//! ## Overview
//!
//! - **Errors**: [`Error`] and [`ErrorKind`] describe every failure a signer may report.
//! - **Credentials**: [`ProvideCredential`] is the collaborator that hands out the
//!   `client_email` and `private_key` of an account.
//! - **Env**: [`Env`] abstracts environment lookups so config and credential loading
//!   can be tested without touching the process environment.
//!
//! ## Example
//!
//! ```
//! use urlsign_core::{CredentialKey, ProvideCredential, Result};
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! impl ProvideCredential for MyProvider {
//!     fn provide_credential(&self, account: &str, key: CredentialKey) -> Result<Option<String>> {
//!         if account != "default" {
//!             return Ok(None);
//!         }
//!         Ok(match key {
//!             CredentialKey::ClientEmail => Some("signer@example.iam.gserviceaccount.com".into()),
//!             CredentialKey::PrivateKey => None,
//!         })
//!     }
//! }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Hashing and encoding helpers
//! - [`time`]: Time formatting and expiration arithmetic
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod env;
pub use env::{Env, OsEnv, StaticEnv};
mod api;
pub use api::{CredentialKey, ProvideCredential, ProvideCredentialChain, DEFAULT_ACCOUNT};
