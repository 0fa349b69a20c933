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

// Env values used in jd union services.
pub const JD_APP_KEY: &str = "JD_APP_KEY";
pub const JD_APP_SECRET: &str = "JD_APP_SECRET";
pub const JD_SITE_ID: &str = "JD_SITE_ID";
pub const JD_POSITION_ID: &str = "JD_POSITION_ID";
pub const JD_ENDPOINT: &str = "JD_ENDPOINT";
pub const JD_UTC_OFFSET_HOURS: &str = "JD_UTC_OFFSET_HOURS";

pub const DEFAULT_ENDPOINT: &str = "https://api.jd.com/routerjson";

// Router protocol.
pub const PROMOTION_COMMON_GET: &str = "jd.union.open.promotion.common.get";
pub const API_VERSION: &str = "1.0";
pub const SIGN_METHOD: &str = "md5";
pub const PARAM_JSON: &str = "360buy_param_json";

pub const MAX_SUB_UNION_ID_CHARS: usize = 80;
pub const UNKNOWN_SUB_UNION_ID: &str = "unknown";
