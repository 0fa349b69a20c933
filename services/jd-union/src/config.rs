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
use log::warn;

/// Config carries all the configuration for jd union services.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `app_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`JD_APP_KEY`]
    pub app_key: Option<String>,
    /// `app_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`JD_APP_SECRET`]
    pub app_secret: Option<String>,
    /// `site_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`JD_SITE_ID`]
    pub site_id: Option<String>,
    /// `position_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`JD_POSITION_ID`]
    /// - default to `0`
    pub position_id: Option<i64>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`JD_ENDPOINT`]
    /// - default to `https://api.jd.com/routerjson`
    pub endpoint: Option<String>,
    /// `utc_offset_hours` pins the zone of the signed `timestamp`, loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`JD_UTC_OFFSET_HOURS`]
    /// - default to the host's local time zone
    pub utc_offset_hours: Option<i32>,
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(JD_APP_KEY) {
            self.app_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(JD_APP_SECRET) {
            self.app_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(JD_SITE_ID) {
            self.site_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(JD_POSITION_ID) {
            match v.trim().parse() {
                Ok(v) => {
                    self.position_id.get_or_insert(v);
                }
                Err(e) => warn!("ignoring {JD_POSITION_ID}={v:?}: {e}"),
            }
        }
        if let Some(v) = ctx.env_var(JD_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(JD_UTC_OFFSET_HOURS) {
            match v.trim().parse() {
                Ok(v) => {
                    self.utc_offset_hours.get_or_insert(v);
                }
                Err(e) => warn!("ignoring {JD_UTC_OFFSET_HOURS}={v:?}: {e}"),
            }
        }

        self
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
                (JD_APP_KEY.to_string(), "env_key".to_string()),
                (JD_APP_SECRET.to_string(), "env_secret".to_string()),
                (JD_SITE_ID.to_string(), "4000123".to_string()),
                (JD_POSITION_ID.to_string(), "42".to_string()),
                (JD_UTC_OFFSET_HOURS.to_string(), "8".to_string()),
            ]),
        });

        let config = Config {
            app_key: Some("explicit_key".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(config.app_key.as_deref(), Some("explicit_key"));
        assert_eq!(config.app_secret.as_deref(), Some("env_secret"));
        assert_eq!(config.site_id.as_deref(), Some("4000123"));
        assert_eq!(config.position_id, Some(42));
        assert_eq!(config.endpoint, None);
        assert_eq!(config.utc_offset_hours, Some(8));
    }

    #[test]
    fn test_config_ignores_invalid_position_id() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([(JD_POSITION_ID.to_string(), "abc".to_string())]),
        });

        let config = Config::default().from_env(&ctx);
        assert_eq!(config.position_id, None);
    }
}
