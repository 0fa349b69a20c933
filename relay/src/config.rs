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

use linkrelay_core::Context;
use log::warn;

/// Env value of the listening port.
pub const PORT: &str = "PORT";

/// Port used when [`PORT`] is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Config carries the configuration of the relay service.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Feishu app used to receive and answer messages.
    pub feishu: linkrelay_feishu::Config,
    /// JD union app used to convert links.
    pub jd: linkrelay_jd_union::Config,
    /// `port` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PORT`]
    /// - default to `8080`
    pub port: Option<u16>,
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        self.feishu = self.feishu.from_env(ctx);
        self.jd = self.jd.from_env(ctx);
        if let Some(v) = ctx.env_var(PORT) {
            match v.trim().parse() {
                Ok(v) => {
                    self.port.get_or_insert(v);
                }
                Err(e) => warn!("ignoring {PORT}={v:?}: {e}"),
            }
        }

        self
    }

    /// The port to listen on.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
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
                ("PORT".to_string(), "9000".to_string()),
                ("FEISHU_APP_ID".to_string(), "cli_a1b2".to_string()),
                ("JD_SITE_ID".to_string(), "4000123".to_string()),
            ]),
        });

        let config = Config::default().from_env(&ctx);
        assert_eq!(config.port(), 9000);
        assert_eq!(config.feishu.app_id.as_deref(), Some("cli_a1b2"));
        assert_eq!(config.jd.site_id.as_deref(), Some("4000123"));
    }

    #[test]
    fn test_default_port() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([("PORT".to_string(), "http".to_string())]),
        });

        assert_eq!(Config::default().from_env(&ctx).port(), 8080);
    }
}
