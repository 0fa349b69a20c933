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

use anyhow::Result;
use bytes::Bytes;
use linkrelay_core::Context;
use linkrelay_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Create a custom reqwest client with specific configuration
    let client = Client::builder()
        .pool_max_idle_per_host(10)
        .user_agent("linkrelay-example/1.0")
        .build()?;

    // Partner APIs are slow at times; allow a little more than the default.
    let sender = ReqwestHttpSend::new(client).with_timeout(Duration::from_secs(15));
    let ctx = Context::new().with_http_send(sender);

    let test_url = "https://open.feishu.cn/open-apis/auth/v3/tenant_access_token/internal";
    println!("Testing HTTP client with POST {test_url}");

    let req = http::Request::builder()
        .method("POST")
        .uri(test_url)
        .header("Content-Type", "application/json; charset=utf-8")
        .body(Bytes::from_static(b"{\"app_id\":\"\",\"app_secret\":\"\"}"))?;

    match ctx.http_send_as_string(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            println!("Response body: {}", resp.body());
        }
        Err(e) => {
            eprintln!("Request failed: {} ({})", e, e.kind());
        }
    }

    Ok(())
}
