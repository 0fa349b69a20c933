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
use log::warn;
use serde::Deserialize;

/// Event is the envelope of an event subscription callback.
///
/// Every field is optional on the wire; absent objects deserialize to
/// their defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Set to `url_verification` for the subscription handshake.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Challenge to echo during the handshake.
    pub challenge: Option<String>,
    /// Envelope header (schema 2.0).
    pub header: EventHeader,
    /// Event body.
    pub event: MessageEvent,
}

/// EventHeader carries the event type.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EventHeader {
    /// Unique id of this delivery.
    pub event_id: Option<String>,
    /// Event type such as `im.message.receive_v1`.
    pub event_type: Option<String>,
}

/// MessageEvent is the body of `im.message.receive_v1`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct MessageEvent {
    /// Who sent the message.
    pub sender: Sender,
    /// The message itself.
    pub message: Message,
}

/// Sender of a message.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Sender {
    /// `user` or `bot`.
    pub sender_type: Option<String>,
    /// Identifiers of the sender.
    pub sender_id: SenderId,
}

/// Identifiers of a sender.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SenderId {
    /// App scoped user id.
    pub open_id: Option<String>,
    /// Developer scoped user id.
    pub union_id: Option<String>,
    /// Tenant scoped user id.
    pub user_id: Option<String>,
}

/// A received message.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Id used to address replies.
    pub message_id: Option<String>,
    /// Chat the message was posted in.
    pub chat_id: Option<String>,
    /// `text`, `post`, `image`, ...
    pub message_type: Option<String>,
    /// Message content as a JSON document in a string.
    pub content: Option<String>,
}

#[derive(Deserialize)]
struct TextContent {
    #[serde(default)]
    text: String,
}

impl Event {
    /// Parse a callback body.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Whether this is the subscription handshake.
    pub fn is_url_verification(&self) -> bool {
        self.kind.as_deref() == Some(URL_VERIFICATION)
    }

    /// Whether this is a message receive event.
    pub fn is_message_receive(&self) -> bool {
        self.header.event_type.as_deref() == Some(MESSAGE_RECEIVE_V1)
    }

    /// Whether the message was sent by a bot, ours included.
    pub fn is_from_bot(&self) -> bool {
        self.event.sender.sender_type.as_deref() == Some(SENDER_TYPE_BOT)
    }

    /// Open id of the sender, if any.
    pub fn sender_open_id(&self) -> Option<&str> {
        self.event
            .sender
            .sender_id
            .open_id
            .as_deref()
            .filter(|v| !v.is_empty())
    }
}

impl Message {
    /// Extract the plain text of a text message.
    ///
    /// Returns `None` if there is no content or it is not a text document;
    /// the parse failure is logged and otherwise ignored.
    pub fn text(&self) -> Option<String> {
        let content = self.content.as_deref()?;
        match serde_json::from_str::<TextContent>(content) {
            Ok(v) => Some(v.text),
            Err(e) => {
                warn!(
                    "ignoring unparsable content of message {:?}: {e}",
                    self.message_id
                );
                None
            }
        }
    }
}
