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

use linkrelay_core::utils::Redact;
use std::fmt::{Debug, Formatter};

/// AppCredential holds the shared secret pair issued to a jd union app.
#[derive(Default, Clone)]
pub struct AppCredential {
    /// App key of the union app.
    pub app_key: String,
    /// App secret of the union app, used as the signing key.
    pub app_secret: String,
    /// Access token for methods that act on behalf of a user.
    pub access_token: Option<String>,
}

impl AppCredential {
    /// Create a credential without access token.
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            access_token: None,
        }
    }

    /// Attach an access token.
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }
}

impl Debug for AppCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredential")
            .field("app_key", &self.app_key)
            .field("app_secret", &Redact::from(&self.app_secret))
            .field("access_token", &Redact::from(&self.access_token))
            .finish()
    }
}
