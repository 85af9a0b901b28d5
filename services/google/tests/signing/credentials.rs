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

use std::collections::HashMap;

use anyhow::Result;
use urlsign_core::{ErrorKind, StaticEnv};
use urlsign_google::{
    DefaultCredentialProvider, Resource, ServiceAccount, StaticCredentialProvider, UrlSigner,
    V2Signer,
};

use crate::{init_logger, CLIENT_EMAIL, PRIVATE_KEY};

fn static_env(vars: &[(&str, &str)]) -> StaticEnv {
    StaticEnv {
        home_dir: None,
        envs: vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    }
}

#[test]
fn test_sign_with_key_file_from_env() -> Result<()> {
    init_logger();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("service_account.json");
    std::fs::write(&path, include_str!("../../testdata/service_account.json"))?;
    let path = path.to_string_lossy().to_string();

    let provider = DefaultCredentialProvider::with_env(static_env(&[(
        "GOOGLE_APPLICATION_CREDENTIALS",
        path.as_str(),
    )]));
    let signer = UrlSigner::new(provider, V2Signer::new());
    let resource = Resource::builder("downloads", "movie.mp4")
        .expires_at(1_700_000_000)
        .build()?;

    let url = signer.sign(&resource)?;
    assert!(url.contains("GoogleAccessId=test-signer%40urlsign-test.iam.gserviceaccount.com&"));
    Ok(())
}

#[test]
fn test_named_account_falls_through_to_static() -> Result<()> {
    init_logger();

    let provider = DefaultCredentialProvider::with_env(static_env(&[])).push(
        StaticCredentialProvider::default()
            .with_account("uploader", ServiceAccount::new(CLIENT_EMAIL, PRIVATE_KEY)),
    );
    let signer = UrlSigner::new(provider, V2Signer::new());
    let resource = Resource::builder("downloads", "movie.mp4")
        .account("uploader")
        .expires_at(1_700_000_000)
        .build()?;

    assert!(signer.sign(&resource).is_ok());

    let err = signer
        .sign(&resource.with_account("nobody"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
    assert_eq!(err.field(), Some("client_email"));
    Ok(())
}
