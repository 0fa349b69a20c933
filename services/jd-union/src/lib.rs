//! JD Union signing and link conversion for linkrelay.
//!
//! This crate builds md5 signed calls against the JD Union router and uses
//! them to turn product links into tracked short links.
//!
//! ## Signing
//!
//! Every router call carries `app_key`, `method`, `v`, `timestamp`,
//! `sign_method` and `360buy_param_json`. Keys are sorted byte-wise and the
//! string `secret + k1 + v1 + k2 + v2 + ... + secret` is hashed with md5;
//! the upper-case hex digest is sent as `sign`.
//!
//! ```
//! use linkrelay_jd_union::{AppCredential, RequestSigner};
//!
//! let cred = AppCredential::new("app_key", "app_secret");
//! let signed = RequestSigner::new("jd.union.open.promotion.common.get")
//!     .sign(&cred, r#"{"promotionCodeReq":{}}"#);
//! assert_eq!(signed.signature().len(), 32);
//! ```
//!
//! ## Conversion
//!
//! ```no_run
//! use linkrelay_core::{Context, OsEnv};
//! use linkrelay_http_send_reqwest::ReqwestHttpSend;
//! use linkrelay_jd_union::{Config, LinkConverter};
//!
//! # async fn example() -> linkrelay_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let converter = LinkConverter::new(ctx.clone(), Config::default().from_env(&ctx))?;
//!
//! let short_url = converter
//!     .convert("https://item.jd.com/100012043978.html", Some("ou_xxx"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{MAX_SUB_UNION_ID_CHARS, PROMOTION_COMMON_GET, UNKNOWN_SUB_UNION_ID};

mod config;
pub use config::Config;

mod credential;
pub use credential::AppCredential;

mod sign_request;
pub use sign_request::{string_to_sign, RequestSigner, SignedRequest};

mod convert;
pub use convert::{normalize_sub_union_id, parse_promotion_response, LinkConverter};
