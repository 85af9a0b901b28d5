// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use anyhow::Result;
use http::Method;
use log::debug;
use pretty_assertions::assert_eq;
use urlsign_google::{
    sign_rsa_sha256, CanonicalSigner, Resource, ServiceAccount, StaticCredentialProvider,
    UrlSigner, V2Signer, Value,
};

use crate::{test_provider, CLIENT_EMAIL, PRIVATE_KEY_PKCS1};

/// Computed with `openssl dgst -sha256 -sign test_key.pem | base64` over
/// `GET\n\n\n1700000000\n/downloads/movie.mp4`.
const GET_MOVIE_SIGNATURE: &str = "I0ICXkP2hcnv0v/dHPCKw4HHjN0LaRrsaQAj6s481y7DOFjlb9DoUdIXIcfsBDnSArpcPSH80jjy59EsgdQgAp5Pnik1SOl8hkzaco6Wt/FSAfOQUpzRfp9UIBFDUIxb4G5E++52IkjMT7/ddTX682nvO8vPPiMGj65cQC2YCWe3NL3eVRCS8mHT5LJdb9lSagMtl8FHSOMTnuY3Yfu/BmPSb7v95AXj8Mhm5M1ppWaKaS6St3g8PDUM/5OFCiNiap2lomIUnoyeTGKoCDNJON2PaEk0mgzbO6voO3TDKlmnqjGG997wn2n0ZjWG6Wdl3V1gT6rDmB09BnoB0sISAg==";

/// Same as above, form encoded.
const GET_MOVIE_SIGNATURE_ENCODED: &str = "I0ICXkP2hcnv0v%2FdHPCKw4HHjN0LaRrsaQAj6s481y7DOFjlb9DoUdIXIcfsBDnSArpcPSH80jjy59EsgdQgAp5Pnik1SOl8hkzaco6Wt%2FFSAfOQUpzRfp9UIBFDUIxb4G5E%2B%2B52IkjMT7%2FddTX682nvO8vPPiMGj65cQC2YCWe3NL3eVRCS8mHT5LJdb9lSagMtl8FHSOMTnuY3Yfu%2FBmPSb7v95AXj8Mhm5M1ppWaKaS6St3g8PDUM%2F5OFCiNiap2lomIUnoyeTGKoCDNJON2PaEk0mgzbO6voO3TDKlmnqjGG997wn2n0ZjWG6Wdl3V1gT6rDmB09BnoB0sISAg%3D%3D";

/// Computed with openssl over the PUT canonical string carrying MD5,
/// content type, acl and metadata.
const PUT_WITH_EXTENSIONS_SIGNATURE: &str = "P75XBAN7V9jWLPsvzNP+98johiXPU6okBKovHO2h3GQhSCch5I5+APipFbI1MLcZFM0CMw8L4xZNMxgThNs4BVrhtyeE/LVVuV0LJMs1l7LXSv8zxFbwjoWOvAhAsmFfOrCI0xRDmhJ+Z77QBM+0bYQ7mzYviecLseOiFP8Fku+Oo5e0XXJaLs7nxx+XgjUkS9GQgNRU3+GM0evT0TPjv0MJDF2xZ4uoFDDdansEeL3Zjo1wj35doj4VfXoQanqlSRfmB6QBux25YPihgcsHfxriJv5J5kACPJDpiWa5tLN15vOpqcfaHQt0gmGlirH/Yz4/WSBBjdyQ8OTpl3CsFQ==";

#[test]
fn test_get_object_end_to_end() -> Result<()> {
    let signer = UrlSigner::new(test_provider(), V2Signer::new());
    let resource = Resource::builder("downloads", "movie.mp4")
        .method(Method::GET)
        .expires_at(1_700_000_000)
        .build()?;

    let url = signer.sign(&resource)?;
    debug!("signed url: {url}");

    assert_eq!(
        url,
        format!(
            "https://storage.googleapis.com/downloads/movie.mp4\
             ?GoogleAccessId=test-signer%40urlsign-test.iam.gserviceaccount.com\
             &Expires=1700000000&Signature={GET_MOVIE_SIGNATURE_ENCODED}"
        )
    );
    Ok(())
}

#[test]
fn test_signature_matches_openssl() -> Result<()> {
    let resource = Resource::builder("downloads", "movie.mp4")
        .expires_at(1_700_000_000)
        .account(CLIENT_EMAIL)
        .build()?;

    let canonical = V2Signer.build_canonical(&resource)?;
    assert_eq!(canonical.as_str(), "GET\n\n\n1700000000\n/downloads/movie.mp4");
    assert_eq!(
        V2Signer.sign(&canonical, crate::PRIVATE_KEY)?,
        GET_MOVIE_SIGNATURE
    );
    Ok(())
}

#[test]
fn test_put_with_extensions() -> Result<()> {
    let signer = UrlSigner::new(test_provider(), V2Signer::new());
    let resource = Resource::builder("foo", "bar.txt")
        .method(Method::PUT)
        .content_md5("rL0Y20zC+Fzt72VPzMSk2A==")
        .content_type("text/plain")
        .expires_at(1_700_000_000)
        .extension("acl", Value::symbol("public_read"))
        .extension("meta", Value::group([("environment", "test")]))
        .extension("encryption_key", "c2VjcmV0")
        .build()?;

    let canonical = V2Signer.build_canonical(&resource)?;
    assert_eq!(
        canonical.as_str(),
        "PUT\nrL0Y20zC+Fzt72VPzMSk2A==\ntext/plain\n1700000000\n\
         x-goog-acl:public-read\nx-goog-meta-environment:test\n/foo/bar.txt"
    );

    let url = signer.sign(&resource)?;
    let (_, query) = url.split_once('?').unwrap_or_default();
    let signature = form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "Signature")
        .map(|(_, v)| v.into_owned());
    assert_eq!(signature.as_deref(), Some(PUT_WITH_EXTENSIONS_SIGNATURE));
    Ok(())
}

#[test]
fn test_pkcs1_key_signs_the_same() -> Result<()> {
    let provider = StaticCredentialProvider::new(ServiceAccount::new(CLIENT_EMAIL, PRIVATE_KEY_PKCS1));
    let signer = UrlSigner::new(provider, V2Signer::new());
    let resource = Resource::builder("downloads", "movie.mp4")
        .expires_at(1_700_000_000)
        .build()?;

    assert!(signer
        .sign(&resource)?
        .ends_with(&format!("&Signature={GET_MOVIE_SIGNATURE_ENCODED}")));
    Ok(())
}

#[test]
fn test_signing_is_deterministic() -> Result<()> {
    let signer = UrlSigner::new(test_provider(), V2Signer::new());
    let resource = Resource::builder("downloads", "a dir/movie (1).mp4")
        .expires_at(1_700_000_000)
        .build()?;

    let first = signer.sign(&resource)?;
    assert_eq!(first, signer.sign(&resource)?);
    assert!(first.starts_with(
        "https://storage.googleapis.com/downloads/a%20dir/movie%20%281%29.mp4?GoogleAccessId="
    ));
    Ok(())
}

#[test]
fn test_raw_signature_is_pkcs1v15() -> Result<()> {
    let raw = sign_rsa_sha256(crate::PRIVATE_KEY, b"GET\n\n\n1700000000\n/downloads/movie.mp4")?;
    assert_eq!(
        urlsign_core::hash::base64_encode(&raw),
        GET_MOVIE_SIGNATURE
    );
    Ok(())
}
