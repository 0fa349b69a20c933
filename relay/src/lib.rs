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

//! Relay chat messages carrying jd product links into tracked short links.
//!
//! The service receives Feishu event callbacks, picks the first jd product
//! link out of a text message, converts it through the JD Union router and
//! replies in the originating chat.
//!
//! ```no_run
//! use linkrelay::{router, Config, Relay};
//! use linkrelay_core::{Context, OsEnv};
//! use linkrelay_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//! let relay = Relay::from_config(ctx, &config)?;
//!
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port())).await?;
//! axum::serve(listener, router(relay)).await?;
//! # Ok(())
//! # }
//! ```

mod config;
pub use config::{Config, DEFAULT_PORT, PORT};

mod extract;
pub use extract::find_product_url;

mod handler;
pub use handler::{reply_text, Ack, Relay, NO_RESULT_REPLY};

mod server;
pub use server::router;
