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

use crate::{Context, Error, ProvideCredential, Result, SigningCredential};
use log::{debug, warn};
use std::fmt::{self, Debug};
use std::sync::Arc;
use tokio::sync::Mutex;

/// TokenCache holds a single credential and refreshes it lazily.
///
/// The cache lock covers the whole check-then-refresh sequence: callers
/// that arrive while a refresh is in flight wait for it and then observe
/// the fresh credential instead of issuing a second provider call.
///
/// Credentials are handed out as clones; the cached value is only ever
/// replaced as a whole.
pub struct TokenCache<K: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Clone for TokenCache<K> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            provider: self.provider.clone(),
            credential: self.credential.clone(),
        }
    }
}

impl<K: SigningCredential> Debug for TokenCache<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCache")
            .field("ctx", &self.ctx)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

impl<K: SigningCredential> TokenCache<K> {
    /// Create a new, empty token cache.
    pub fn new(ctx: Context, provider: impl ProvideCredential<Credential = K>) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Get a currently valid credential, refreshing it if the cache is
    /// empty or expired.
    pub async fn get(&self) -> Result<K> {
        let mut cached = self.credential.lock().await;

        // Re-checked under the lock: a concurrent caller may have refreshed already.
        if let Some(cred) = cached.as_ref() {
            if cred.is_valid(self.ctx.now()) {
                debug!("serving cached credential");
                return Ok(cred.clone());
            }
            debug!("cached credential expired, refreshing");
        } else {
            debug!("credential cache is empty, refreshing");
        }

        let cred = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| Error::credential_denied("no credential returned by provider"))?;

        if !cred.is_valid(self.ctx.now()) {
            warn!("provider returned a credential that is already expired: {cred:?}");
            return Err(Error::credential_denied(
                "provider returned an already expired credential",
            ));
        }

        *cached = Some(cred.clone());
        Ok(cred)
    }

    /// Drop the cached credential so that the next [`TokenCache::get`]
    /// refreshes it.
    pub async fn invalidate(&self) {
        self.credential.lock().await.take();
    }
}
