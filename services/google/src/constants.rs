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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used in google services.
pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const GOOGLE_APPLICATION_CREDENTIALS_JSON: &str = "GOOGLE_APPLICATION_CREDENTIALS_JSON";
pub const GOOGLE_STORAGE_ENDPOINT: &str = "GOOGLE_STORAGE_ENDPOINT";
pub const GOOGLE_REGION: &str = "GOOGLE_REGION";
pub const GOOGLE_ACCOUNT: &str = "GOOGLE_ACCOUNT";
pub const GOOGLE_SIGNED_URL_EXPIRES_IN: &str = "GOOGLE_SIGNED_URL_EXPIRES_IN";

pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";
pub const DEFAULT_LOCATION: &str = "us";
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Longest lifetime a V4 signed URL may have: seven days.
pub const MAX_V4_EXPIRES_IN_SECS: i64 = 7 * 24 * 60 * 60;

pub const GOOG4_RSA_SHA256: &str = "GOOG4-RSA-SHA256";
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";
pub const STORAGE_SERVICE: &str = "storage";

pub const X_GOOG_PREFIX: &str = "x-goog-";
pub const X_GOOG_ALGORITHM: &str = "X-Goog-Algorithm";
pub const X_GOOG_CREDENTIAL: &str = "X-Goog-Credential";
pub const X_GOOG_DATE: &str = "X-Goog-Date";
pub const X_GOOG_EXPIRES: &str = "X-Goog-Expires";
pub const X_GOOG_SIGNED_HEADERS: &str = "X-Goog-SignedHeaders";
pub const X_GOOG_SIGNATURE: &str = "X-Goog-Signature";

pub const GOOGLE_ACCESS_ID: &str = "GoogleAccessId";
pub const EXPIRES: &str = "Expires";
pub const SIGNATURE: &str = "Signature";

/// Extension headers whose values are secrets: they are sent with the request
/// but never written into a canonical string.
pub const SECRET_EXTENSION_HEADERS: [&str; 2] = ["encryption-key", "encryption-key-sha256"];

/// AsciiSet for [Google UriEncode](https://cloud.google.com/storage/docs/authentication/canonical-requests)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static GOOG_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for [Google UriEncode](https://cloud.google.com/storage/docs/authentication/canonical-requests)
///
/// But used in query.
pub static GOOG_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
