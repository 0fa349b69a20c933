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

use crate::time::DateTime;
use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait used by [`crate::TokenCache`] to decide
/// whether a cached credential can still be handed out.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is usable at `now`.
    fn is_valid(&self, now: DateTime) -> bool;
}

/// ProvideCredential is the trait used to fetch a fresh credential from an
/// identity provider.
///
/// Returning `Ok(None)` means the provider has nothing to offer in the
/// current environment; errors mean the provider was asked and refused or
/// could not be reached.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Fetch a credential using the seams carried by `ctx`.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}
