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

use crate::Relay;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use linkrelay_feishu::Event;
use log::warn;
use serde_json::Value;

/// Build the webhook router.
///
/// - `POST /event`: event subscription callback
/// - `GET /healthz`: liveness probe
pub fn router(relay: Relay) -> Router {
    Router::new()
        .route("/event", post(event))
        .route("/healthz", get(healthz))
        .with_state(relay)
}

async fn event(State(relay): State<Relay>, body: Bytes) -> Json<Value> {
    // Unparsable bodies are treated like an empty event and acknowledged.
    let event = Event::from_slice(&body).unwrap_or_else(|e| {
        warn!("ignoring unparsable event body: {e}");
        Event::default()
    });

    Json(relay.handle(&event).await.to_json())
}

async fn healthz() -> &'static str {
    "ok"
}
