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

use std::fmt;
use thiserror::Error;

/// Error returned by every fallible linkrelay operation.
///
/// `Display` prints only the message. Use [`Error::detail`] to include the
/// underlying cause, which is what ends up in logs and chat replies.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// What went wrong, coarse enough for callers to pick a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable token could be obtained from the identity provider.
    CredentialDenied,
    /// A partner api was unreachable, timed out, or answered non-2xx.
    NetworkFailed,
    /// The partner answered, but without a short url.
    NoResult,
    /// The partner answer could not be understood.
    ConversionFailed,
    /// An outbound request could not be assembled.
    RequestInvalid,
    /// A required setting is missing or malformed.
    ConfigInvalid,
    /// Anything else.
    Unexpected,
}

impl Error {
    /// Error of `kind` described by `message`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether the identity provider refused to hand out a token.
    pub fn is_credential_error(&self) -> bool {
        self.kind == ErrorKind::CredentialDenied
    }

    /// Whether the conversion reached the partner but produced nothing.
    pub fn is_no_result(&self) -> bool {
        self.kind == ErrorKind::NoResult
    }

    /// Message followed by the whole cause chain.
    pub fn detail(&self) -> String {
        match &self.source {
            None => self.message.clone(),
            Some(source) => format!("{}: {:#}", self.message, source),
        }
    }

    /// Shorthand for [`ErrorKind::CredentialDenied`].
    pub fn credential_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialDenied, message)
    }

    /// Shorthand for [`ErrorKind::NetworkFailed`].
    pub fn network_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkFailed, message)
    }

    /// Shorthand for [`ErrorKind::NoResult`].
    pub fn no_result(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoResult, message)
    }

    /// Shorthand for [`ErrorKind::ConversionFailed`].
    pub fn conversion_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConversionFailed, message)
    }

    /// Shorthand for [`ErrorKind::RequestInvalid`].
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Shorthand for [`ErrorKind::ConfigInvalid`].
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Shorthand for [`ErrorKind::Unexpected`].
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::CredentialDenied => "credential denied",
            ErrorKind::NetworkFailed => "network failed",
            ErrorKind::NoResult => "no result",
            ErrorKind::ConversionFailed => "conversion failed",
            ErrorKind::RequestInvalid => "invalid request",
            ErrorKind::ConfigInvalid => "invalid configuration",
            ErrorKind::Unexpected => "unexpected error",
        };
        f.write_str(s)
    }
}

/// Result carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid("failed to build http request").with_source(err)
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid("invalid header value").with_source(err)
    }
}
