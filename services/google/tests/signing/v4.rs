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
use pretty_assertions::assert_eq;
use urlsign_core::time::from_timestamp;
use urlsign_core::ErrorKind;
use urlsign_google::{CanonicalSigner, Config, Resource, UrlSigner, V4Signer};

use crate::{test_provider, CLIENT_EMAIL, PRIVATE_KEY, SIGNING_TIME};

const CANONICAL_QUERY: &str = "X-Goog-Algorithm=GOOG4-RSA-SHA256\
    &X-Goog-Credential=test-signer%40urlsign-test.iam.gserviceaccount.com%2F20231114%2Fus%2Fstorage%2Fgoog4_request\
    &X-Goog-Date=20231114T221320Z\
    &X-Goog-Expires=3600\
    &X-Goog-SignedHeaders=host";

/// sha256 of the canonical request, computed with `sha256sum`.
const CANONICAL_REQUEST_HASH: &str =
    "2e0196c2c81934ccdf9ffaf8799451173d18c10af92f7e126b212a105c560260";

/// Computed with `openssl dgst -sha256 -sign test_key.pem | xxd -p` over the string to sign.
const GET_MOVIE_SIGNATURE: &str = "1844b1143e9359c3731ecb17b54edfd9a9514fda2bbabdb8f9dbe82f130f1ad36eee6ac4548e8584fd4916adb2713ac0de4109f61772e0afc730bdf765899f1d9a9018b7f314ab0a8cc4b11d3b577a8ac213df2bd4dc7b3ecd39a6bd47439b687d0f8e117f5e8aa4be39ce958683e0739cb1b83e7c6c30908c76351d3c3ed67c3348bb8aa3e091752268367e0324a8b9f994c6cdd9cb47e13529e503d872df3a451d0743adb177778548e1ff4bf904720aa6ce00a504d66c82d73a8615a567e36c7f982544f2cd3b634c0da5d8248e22331aeade702bbf3010ee4ddc975be31c73583b35ef5e6676120e470f21fb2ad97d41b4b43d51bb7ea2b2162d2762cf1e";

fn signer() -> Result<V4Signer> {
    Ok(V4Signer::new().with_time(from_timestamp(SIGNING_TIME)?))
}

#[test]
fn test_get_object_end_to_end() -> Result<()> {
    let signer = UrlSigner::new(test_provider(), signer()?);
    let resource = Resource::builder("downloads", "movie.mp4")
        .expires_at(SIGNING_TIME + 3600)
        .build()?;

    assert_eq!(
        signer.sign(&resource)?,
        format!(
            "https://storage.googleapis.com/downloads/movie.mp4?{CANONICAL_QUERY}\
             &X-Goog-Signature={GET_MOVIE_SIGNATURE}"
        )
    );
    Ok(())
}

#[test]
fn test_canonical_request_and_string_to_sign() -> Result<()> {
    let s = signer()?;
    let resource = Resource::builder("downloads", "movie.mp4")
        .account(CLIENT_EMAIL)
        .expires_at(SIGNING_TIME + 3600)
        .build()?;

    let req = s.build_canonical(&resource)?;
    assert_eq!(req.query(), CANONICAL_QUERY);
    assert_eq!(
        req.to_string(),
        format!(
            "GET\n/downloads/movie.mp4\n{CANONICAL_QUERY}\nhost:storage.googleapis.com\n\nhost\nUNSIGNED-PAYLOAD"
        )
    );
    assert_eq!(
        s.string_to_sign(&req),
        format!(
            "GOOG4-RSA-SHA256\n20231114T221320Z\n20231114/us/storage/goog4_request\n{CANONICAL_REQUEST_HASH}"
        )
    );
    assert_eq!(s.sign(&req, PRIVATE_KEY)?, GET_MOVIE_SIGNATURE);
    Ok(())
}

#[test]
fn test_expiration_bound() -> Result<()> {
    let signer = UrlSigner::new(test_provider(), signer()?);
    let resource = Resource::builder("downloads", "movie.mp4").build()?;

    let url = signer.sign(&resource.with_expires_at(SIGNING_TIME + 604_800))?;
    assert!(url.contains("&X-Goog-Expires=604800&"));

    let err = signer
        .sign(&resource.with_expires_at(SIGNING_TIME + 604_801))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert_eq!(err.field(), Some("expires"));
    Ok(())
}

#[test]
fn test_location_from_config() -> Result<()> {
    let config = Config::new().with_location("europe-west1");
    let signer = UrlSigner::new(test_provider(), signer()?.with_location(&config.location))
        .with_config(config);
    let resource = Resource::builder("downloads", "movie.mp4")
        .expires_at(SIGNING_TIME + 60)
        .build()?;

    let url = signer.sign(&resource)?;
    assert!(url.contains("%2F20231114%2Feurope-west1%2Fstorage%2Fgoog4_request&"));
    Ok(())
}

#[test]
fn test_signature_is_lowercase_hex() -> Result<()> {
    let signer = UrlSigner::new(test_provider(), signer()?);
    let resource = Resource::builder("uploads", "report.csv")
        .method(Method::PUT)
        .content_type("text/csv")
        .expires_at(SIGNING_TIME + 600)
        .build()?;

    let url = signer.sign(&resource)?;
    let (_, signature) = url.rsplit_once("&X-Goog-Signature=").unwrap_or_default();
    assert_eq!(signature.len(), 512);
    assert!(signature
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert!(url.contains("X-Goog-SignedHeaders=content-type%3Bhost&"));
    Ok(())
}

#[test]
fn test_post_is_rejected() -> Result<()> {
    let signer = UrlSigner::new(test_provider(), signer()?);
    let resource = Resource::builder("uploads", "report.csv")
        .method(Method::POST)
        .expires_at(SIGNING_TIME + 600)
        .build()?;

    let err = signer.sign(&resource).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert_eq!(err.field(), Some("method"));
    Ok(())
}
