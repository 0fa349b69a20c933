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

use linkrelay_core::time::DateTime;
use linkrelay_core::utils::Redact;
use linkrelay_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// TenantAccessToken is the bearer credential used for server to server
/// open api calls.
#[derive(Clone)]
pub struct TenantAccessToken {
    /// The bearer token.
    pub token: String,
    /// The token must not be used at or after this instant.
    ///
    /// Already shortened by a safety margin against the provider's lifetime.
    pub expires_at: DateTime,
}

impl Debug for TenantAccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantAccessToken")
            .field("token", &Redact::from(&self.token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl SigningCredential for TenantAccessToken {
    fn is_valid(&self, now: DateTime) -> bool {
        !self.token.is_empty() && now < self.expires_at
    }
}
