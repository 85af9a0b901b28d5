#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use urlsign_core::*;

#[cfg(feature = "google")]
pub mod google;
