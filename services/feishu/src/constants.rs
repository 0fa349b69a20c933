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

// Env values used in feishu services.
pub const FEISHU_APP_ID: &str = "FEISHU_APP_ID";
pub const FEISHU_APP_SECRET: &str = "FEISHU_APP_SECRET";
pub const FEISHU_ENDPOINT: &str = "FEISHU_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "https://open.feishu.cn";

// Open api paths.
pub const TENANT_ACCESS_TOKEN_PATH: &str = "/open-apis/auth/v3/tenant_access_token/internal";
pub const MESSAGES_PATH: &str = "/open-apis/im/v1/messages";

// Token lifetime in seconds used when the provider omits `expire`.
pub const DEFAULT_EXPIRE_SECS: i64 = 7000;
// Seconds shaved off every token lifetime.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

// Event envelope values.
pub const URL_VERIFICATION: &str = "url_verification";
pub const MESSAGE_RECEIVE_V1: &str = "im.message.receive_v1";
pub const SENDER_TYPE_BOT: &str = "bot";
