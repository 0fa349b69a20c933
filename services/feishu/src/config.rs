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
use linkrelay_core::Context;

/// Config carries all the configuration for feishu services.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `app_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`FEISHU_APP_ID`]
    pub app_id: Option<String>,
    /// `app_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`FEISHU_APP_SECRET`]
    pub app_secret: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`FEISHU_ENDPOINT`]
    /// - default to `https://open.feishu.cn`
    pub endpoint: Option<String>,
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(FEISHU_APP_ID) {
            self.app_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(FEISHU_APP_SECRET) {
            self.app_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(FEISHU_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }

        self
    }

    /// The open api base url without trailing slash.
    pub fn endpoint(&self) -> String {
        self.endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkrelay_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_config_from_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (FEISHU_APP_ID.to_string(), "cli_a1b2".to_string()),
                (FEISHU_APP_SECRET.to_string(), "secret".to_string()),
            ]),
        });

        let config = Config::default().from_env(&ctx);
        assert_eq!(config.app_id.as_deref(), Some("cli_a1b2"));
        assert_eq!(config.app_secret.as_deref(), Some("secret"));
        assert_eq!(config.endpoint(), "https://open.feishu.cn");
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let config = Config {
            endpoint: Some("https://open.larksuite.com/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint(), "https://open.larksuite.com");
    }
}
