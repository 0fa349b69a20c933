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
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, StatusCode};
use linkrelay_core::{Context, Error, Result, TokenCache};
use log::{debug, warn};
use serde::Serialize;

/// MessageReplier sends text replies to received messages.
#[derive(Debug, Clone)]
pub struct MessageReplier {
    ctx: Context,
    tokens: TokenCache<TenantAccessToken>,
    endpoint: String,
}

#[derive(Serialize)]
struct ReplyRequest<'a> {
    msg_type: &'a str,
    content: String,
}

#[derive(Serialize)]
struct TextContent<'a> {
    text: &'a str,
}

impl MessageReplier {
    /// Create a new replier sharing `tokens` with other callers.
    pub fn new(ctx: Context, tokens: TokenCache<TenantAccessToken>, config: &Config) -> Self {
        Self {
            ctx,
            tokens,
            endpoint: config.endpoint(),
        }
    }

    /// Reply to `message_id` with plain `text`.
    ///
    /// A 401 drops the cached token so the next call fetches a new one.
    pub async fn reply_text(&self, message_id: &str, text: &str) -> Result<StatusCode> {
        let token = self.tokens.get().await?;

        // `content` is itself a JSON document carried as a string.
        let content = serde_json::to_string(&TextContent { text }).map_err(|e| {
            Error::request_invalid("failed to serialize reply content").with_source(e)
        })?;
        let body = serde_json::to_vec(&ReplyRequest {
            msg_type: "text",
            content,
        })
        .map_err(|e| Error::request_invalid("failed to serialize reply").with_source(e))?;

        let mut auth: HeaderValue = format!("Bearer {}", token.token).parse()?;
        auth.set_sensitive(true);

        let req = http::Request::post(format!(
            "{}{MESSAGES_PATH}/{message_id}/reply",
            self.endpoint
        ))
        .header(CONTENT_TYPE, "application/json; charset=utf-8")
        .header(AUTHORIZATION, auth)
        .body(Bytes::from(body))?;

        debug!("replying to message {message_id}");
        let resp = self.ctx.http_send_as_string(req).await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("reply to {message_id} was unauthorized, dropping cached token");
            self.tokens.invalidate().await;
        }
        if !status.is_success() {
            return Err(Error::network_failed(format!(
                "reply to message {message_id} failed with {status}: {}",
                resp.body()
            )));
        }

        Ok(status)
    }
}
