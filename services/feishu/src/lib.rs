//! Feishu (Lark) open platform support for linkrelay.
//!
//! This crate covers the three pieces of the open platform the relay
//! talks to:
//!
//! - [`TenantAccessTokenProvider`]: fetches tenant access tokens for an
//!   internal app, meant to sit behind a [`linkrelay_core::TokenCache`]
//! - [`MessageReplier`]: replies to received messages with plain text
//! - [`Event`]: the event subscription callback envelope
//!
//! ## Quick Start
//!
//! ```no_run
//! use linkrelay_core::{Context, OsEnv, TokenCache};
//! use linkrelay_feishu::{Config, MessageReplier, TenantAccessTokenProvider};
//! use linkrelay_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> linkrelay_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//!
//! let tokens = TokenCache::new(ctx.clone(), TenantAccessTokenProvider::new(&config)?);
//! let replier = MessageReplier::new(ctx, tokens, &config);
//!
//! replier.reply_text("om_xxx", "hello").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! export FEISHU_APP_ID=cli_xxx
//! export FEISHU_APP_SECRET=your-app-secret
//! export FEISHU_ENDPOINT=https://open.larksuite.com  # Optional
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::TenantAccessToken;

mod provide_credential;
pub use provide_credential::TenantAccessTokenProvider;

mod reply;
pub use reply::MessageReplier;

mod event;
pub use event::{Event, EventHeader, Message, MessageEvent, Sender, SenderId};
