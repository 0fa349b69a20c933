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

use crate::constants::*;
use crate::credential::AppCredential;
use chrono::FixedOffset;
use linkrelay_core::hash::hex_md5_upper;
use linkrelay_core::time::{format_datetime_at, format_local_datetime, now, DateTime};
use std::collections::BTreeMap;

/// SignedRequest is the full parameter set of one router call, `sign`
/// included.
///
/// Parameters are kept in byte-wise key order, the same order used to
/// compute the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: BTreeMap<String, String>,
    signature: String,
}

impl SignedRequest {
    /// All parameters, `sign` included.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Get a single parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The upper-case hex md5 signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Render the parameters as an `application/x-www-form-urlencoded` body.
    pub fn form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }
}

/// RequestSigner builds md5 signed parameter sets for the jd union router.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    method: String,
    time: Option<DateTime>,
    utc_offset: Option<FixedOffset>,
}

impl RequestSigner {
    /// Create a new signer for the given router method.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            time: None,
            utc_offset: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// Requests should be signed with the current time; pin it only to
    /// reproduce a signature or to honour an injected clock.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Render `timestamp` at a fixed offset instead of the host's zone.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = Some(offset);
        self
    }

    fn timestamp(&self) -> String {
        let time = self.time.unwrap_or_else(now);
        match self.utc_offset {
            Some(offset) => format_datetime_at(time, offset),
            None => format_local_datetime(time),
        }
    }

    /// Build the signed parameter set for `param_json`.
    ///
    /// `param_json` is signed verbatim, so it must be exactly the string
    /// that will be transmitted.
    pub fn sign(&self, cred: &AppCredential, param_json: &str) -> SignedRequest {
        let mut params = BTreeMap::new();
        params.insert("app_key".to_string(), cred.app_key.clone());
        params.insert("method".to_string(), self.method.clone());
        params.insert("v".to_string(), API_VERSION.to_string());
        params.insert("timestamp".to_string(), self.timestamp());
        params.insert("sign_method".to_string(), SIGN_METHOD.to_string());
        params.insert(PARAM_JSON.to_string(), param_json.to_string());
        if let Some(token) = &cred.access_token {
            params.insert("access_token".to_string(), token.clone());
        }

        let signature = hex_md5_upper(string_to_sign(&cred.app_secret, &params).as_bytes());
        params.insert("sign".to_string(), signature.clone());

        SignedRequest { params, signature }
    }
}

/// Build the string to sign: the secret, then every key immediately
/// followed by its value in key order, then the secret again.
pub fn string_to_sign(secret: &str, params: &BTreeMap<String, String>) -> String {
    let size = params.iter().map(|(k, v)| k.len() + v.len()).sum::<usize>();
    let mut s = String::with_capacity(secret.len() * 2 + size);
    s.push_str(secret);
    for (k, v) in params {
        s.push_str(k);
        s.push_str(v);
    }
    s.push_str(secret);
    s
}
