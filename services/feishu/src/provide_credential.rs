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
use crate::{Config, TenantAccessToken};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use linkrelay_core::time::add_seconds;
use linkrelay_core::utils::Redact;
use linkrelay_core::{Context, Error, ProvideCredential, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// TenantAccessTokenProvider fetches a tenant access token for an
/// internal app.
///
/// Every failure, including transport errors, is reported as
/// [`linkrelay_core::ErrorKind::CredentialDenied`] carrying the provider's
/// response.
#[derive(Clone)]
pub struct TenantAccessTokenProvider {
    app_id: String,
    app_secret: String,
    endpoint: String,
}

impl Debug for TenantAccessTokenProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantAccessTokenProvider")
            .field("app_id", &self.app_id)
            .field("app_secret", &Redact::from(&self.app_secret))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl TenantAccessTokenProvider {
    /// Create a new provider, failing if the app id or secret is missing.
    pub fn new(config: &Config) -> Result<Self> {
        let app_id = config
            .app_id
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid(format!("{FEISHU_APP_ID} is required")))?;
        let app_secret = config
            .app_secret
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid(format!("{FEISHU_APP_SECRET} is required")))?;

        Ok(Self {
            app_id,
            app_secret,
            endpoint: config.endpoint(),
        })
    }
}

#[async_trait]
impl ProvideCredential for TenantAccessTokenProvider {
    type Credential = TenantAccessToken;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let body = serde_json::to_vec(&TenantAccessTokenRequest {
            app_id: &self.app_id,
            app_secret: &self.app_secret,
        })
        .map_err(|e| Error::request_invalid("failed to serialize token request").with_source(e))?;

        let req = http::Request::post(format!("{}{TENANT_ACCESS_TOKEN_PATH}", self.endpoint))
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(Bytes::from(body))?;

        debug!("requesting tenant access token for app {}", self.app_id);
        let resp = ctx.http_send_as_string(req).await.map_err(|e| {
            Error::credential_denied("failed to request tenant access token").with_source(e)
        })?;

        if !resp.status().is_success() {
            return Err(Error::credential_denied(format!(
                "request to tenant access token endpoint failed with {}: {}",
                resp.status(),
                resp.body()
            )));
        }

        let content = resp.into_body();
        let token_resp: TenantAccessTokenResponse =
            serde_json::from_str(&content).map_err(|e| {
                Error::credential_denied(format!("failed to parse token response: {content}"))
                    .with_source(e)
            })?;

        let token = match token_resp {
            TenantAccessTokenResponse {
                code: Some(0),
                tenant_access_token: Some(token),
                ..
            } if !token.is_empty() => token,
            _ => {
                return Err(Error::credential_denied(format!(
                    "tenant access token rejected: {content}"
                )))
            }
        };

        let lifetime = token_resp.expire.unwrap_or(DEFAULT_EXPIRE_SECS);
        // A token that would not outlive the margin is useless to callers.
        if lifetime <= EXPIRY_MARGIN_SECS {
            return Err(Error::credential_denied(format!(
                "tenant access token expires too soon: {content}"
            )));
        }
        let expires_at = add_seconds(ctx.now(), lifetime - EXPIRY_MARGIN_SECS);
        debug!("got tenant access token, expires at {expires_at}");

        Ok(Some(TenantAccessToken { token, expires_at }))
    }
}

#[derive(Serialize)]
struct TenantAccessTokenRequest<'a> {
    app_id: &'a str,
    app_secret: &'a str,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct TenantAccessTokenResponse {
    code: Option<i64>,
    tenant_access_token: Option<String>,
    expire: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let content = r#"{
    "code": 0,
    "msg": "ok",
    "tenant_access_token": "t-caecc734c2e3328a62489fe0648c4b98779515d3",
    "expire": 7200
}"#;

        let resp: TenantAccessTokenResponse =
            serde_json::from_str(content).expect("json deserialize must success");

        assert_eq!(resp.code, Some(0));
        assert_eq!(
            resp.tenant_access_token.as_deref(),
            Some("t-caecc734c2e3328a62489fe0648c4b98779515d3")
        );
        assert_eq!(resp.expire, Some(7200));
    }

    #[test]
    fn test_new_requires_app_secret() {
        let config = Config {
            app_id: Some("cli_a1b2".to_string()),
            ..Default::default()
        };

        let err = TenantAccessTokenProvider::new(&config).unwrap_err();
        assert!(err.to_string().contains(FEISHU_APP_SECRET));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let provider = TenantAccessTokenProvider::new(&Config {
            app_id: Some("cli_a1b2".to_string()),
            app_secret: Some("aBcDeFgHiJkLmNoPqRsT".to_string()),
            endpoint: None,
        })
        .unwrap();

        let s = format!("{provider:?}");
        assert!(s.contains("aBc***RsT"));
        assert!(!s.contains("aBcDeFgHiJkLmNoPqRsT"));
    }
}
