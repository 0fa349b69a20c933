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

//! Core components for relaying chat messages into signed partner calls.
//!
//! This crate provides the foundational types and traits shared by the
//! linkrelay services.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending,
//!   environment access and the clock
//! - **Traits**: Abstract interfaces for credential loading
//!   (`ProvideCredential`) and expiry checks (`SigningCredential`)
//! - **TokenCache**: Serves a cached credential and refreshes it lazily,
//!   at most one refresh at a time
//!
//! ## Example
//!
//! ```no_run
//! use linkrelay_core::time::DateTime;
//! use linkrelay_core::{Context, ProvideCredential, Result, SigningCredential, TokenCache};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct MyToken {
//!     token: String,
//!     expires_at: DateTime,
//! }
//!
//! impl SigningCredential for MyToken {
//!     fn is_valid(&self, now: DateTime) -> bool {
//!         now < self.expires_at
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyToken;
//!
//!     async fn provide_credential(&self, ctx: &Context) -> Result<Option<MyToken>> {
//!         Ok(Some(MyToken {
//!             token: "my-token".to_string(),
//!             expires_at: linkrelay_core::time::add_seconds(ctx.now(), 3600),
//!         }))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let cache = TokenCache::new(Context::new(), MyProvider);
//! let token = cache.get().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: MD5 digests used by md5 signed APIs
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::{
    Clock, Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv, SystemClock,
};

mod api;
pub use api::{ProvideCredential, SigningCredential};

mod cache;
pub use cache::TokenCache;
