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

use crate::extract::find_product_url;
use crate::Config;
use linkrelay_core::{Context, Result, TokenCache};
use linkrelay_feishu::{Event, MessageReplier, TenantAccessTokenProvider};
use linkrelay_jd_union::LinkConverter;
use log::{debug, info, warn};
use serde_json::{json, Value};

/// Reply sent when the partner answered without a short url.
pub const NO_RESULT_REPLY: &str = "❌ 转链失败，请换个商品链接再试。";

/// Ack is the body returned to the event callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    /// Echo of the subscription handshake challenge.
    Challenge(String),
    /// The event was accepted, whether or not it led to a reply.
    Accepted,
}

impl Ack {
    /// Render the callback response body.
    pub fn to_json(&self) -> Value {
        match self {
            Ack::Challenge(challenge) => json!({ "challenge": challenge }),
            Ack::Accepted => json!({ "code": 0 }),
        }
    }
}

/// Relay answers message events that carry a jd product link with a
/// tracked short link.
#[derive(Debug, Clone)]
pub struct Relay {
    converter: LinkConverter,
    replier: MessageReplier,
}

impl Relay {
    /// Assemble a relay from its parts.
    pub fn new(converter: LinkConverter, replier: MessageReplier) -> Self {
        Self {
            converter,
            replier,
        }
    }

    /// Build a relay, its token cache included, from `config`.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let provider = TenantAccessTokenProvider::new(&config.feishu)?;
        let tokens = TokenCache::new(ctx.clone(), provider);
        let replier = MessageReplier::new(ctx.clone(), tokens, &config.feishu);
        let converter = LinkConverter::new(ctx, config.jd.clone())?;

        Ok(Self::new(converter, replier))
    }

    /// Handle one callback.
    ///
    /// Conversion and reply failures are logged and never surface to the
    /// caller; the callback is always acknowledged.
    pub async fn handle(&self, event: &Event) -> Ack {
        if event.is_url_verification() {
            return Ack::Challenge(event.challenge.clone().unwrap_or_default());
        }
        if !event.is_message_receive() {
            debug!("ignoring event {:?}", event.header.event_type);
            return Ack::Accepted;
        }
        if event.is_from_bot() {
            debug!("ignoring message sent by a bot");
            return Ack::Accepted;
        }

        let message = &event.event.message;
        let Some(message_id) = message.message_id.as_deref() else {
            warn!("ignoring message event without message_id");
            return Ack::Accepted;
        };
        let text = message.text().unwrap_or_default();
        let Some(url) = find_product_url(&text) else {
            debug!("no product link in message {message_id}");
            return Ack::Accepted;
        };

        let result = self.converter.convert(url, event.sender_open_id()).await;
        if let Err(err) = &result {
            warn!("failed to convert {url} for message {message_id}: {}", err.detail());
        }

        let reply = reply_text(&result);
        match self.replier.reply_text(message_id, &reply).await {
            Ok(status) => info!("replied to message {message_id} with {status}"),
            Err(err) => warn!("failed to reply to message {message_id}: {}", err.detail()),
        }

        Ack::Accepted
    }
}

/// Render the chat reply for a conversion result.
pub fn reply_text(result: &Result<String>) -> String {
    match result {
        Ok(short_url) => format!("✅ 返现链接：{short_url}"),
        Err(err) if err.is_no_result() => NO_RESULT_REPLY.to_string(),
        Err(err) => format!("❌ 转链异常：{}", err.detail()),
    }
}
