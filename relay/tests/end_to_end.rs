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

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use linkrelay::{router, Ack, Config, Relay, NO_RESULT_REPLY};
use linkrelay_core::{Context, HttpSend, Result};
use linkrelay_feishu::Event;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::IntoFuture;
use std::sync::{Arc, Mutex};
use test_case::test_case;

const FEISHU: &str = "http://feishu.test";
const JD: &str = "http://jd.test/routerjson";

/// HttpSend standing in for both the Feishu open api and the JD router.
#[derive(Debug, Clone)]
struct MockHttpSend {
    jd_status: StatusCode,
    jd_result: String,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    fn new(jd_status: StatusCode, jd_result: Value) -> Self {
        Self {
            jd_status,
            jd_result: jd_result.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Path and body of every request sent to `host`.
    fn requests_to(&self, host: &str) -> Vec<(String, Bytes)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|req| req.uri().host() == Some(host))
            .map(|req| (req.uri().path().to_string(), req.body().clone()))
            .collect()
    }

    fn total(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn material_request(&self) -> Value {
        let requests = self.requests_to("jd.test");
        let (_, body) = requests.last().expect("jd router must be called");
        let form: HashMap<String, String> = form_urlencoded::parse(body).into_owned().collect();
        serde_json::from_str(&form["360buy_param_json"]).unwrap()
    }

    fn reply(&self) -> (String, String) {
        let requests = self.requests_to("feishu.test");
        let (path, body) = requests
            .iter()
            .find(|(path, _)| path.ends_with("/reply"))
            .expect("a reply must be sent");
        let body: Value = serde_json::from_slice(body).unwrap();
        let content: Value = serde_json::from_str(body["content"].as_str().unwrap()).unwrap();
        (path.clone(), content["text"].as_str().unwrap().to_string())
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (status, body) = match (req.uri().host(), req.uri().path()) {
            (Some("jd.test"), _) => (
                self.jd_status,
                json!({
                    "jd_union_open_promotion_common_get_response": {
                        "code": "0",
                        "result": self.jd_result,
                    }
                })
                .to_string(),
            ),
            (Some("feishu.test"), path) if path.ends_with("tenant_access_token/internal") => (
                StatusCode::OK,
                json!({"code": 0, "msg": "ok", "tenant_access_token": "t-abc", "expire": 7200})
                    .to_string(),
            ),
            (Some("feishu.test"), _) => (StatusCode::OK, json!({"code": 0}).to_string()),
            _ => (StatusCode::NOT_FOUND, String::new()),
        };
        self.requests.lock().unwrap().push(req);

        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))?)
    }
}

fn config() -> Config {
    Config {
        feishu: linkrelay_feishu::Config {
            app_id: Some("cli_test".to_string()),
            app_secret: Some("feishu_secret".to_string()),
            endpoint: Some(FEISHU.to_string()),
        },
        jd: linkrelay_jd_union::Config {
            app_key: Some("test_app_key".to_string()),
            app_secret: Some("test_app_secret".to_string()),
            site_id: Some("4000123".to_string()),
            position_id: Some(3001),
            endpoint: Some(JD.to_string()),
            utc_offset_hours: Some(8),
        },
        port: None,
    }
}

fn relay(mock: &MockHttpSend) -> Relay {
    let ctx = Context::new().with_http_send(mock.clone());
    Relay::from_config(ctx, &config()).expect("relay must build")
}

fn message_event(event_type: &str, sender_type: &str, content: &str) -> Event {
    let body = json!({
        "schema": "2.0",
        "header": {"event_id": "ev_1", "event_type": event_type},
        "event": {
            "sender": {
                "sender_type": sender_type,
                "sender_id": {"open_id": "ou_requester"},
            },
            "message": {
                "message_id": "om_1",
                "chat_id": "oc_1",
                "message_type": "text",
                "content": content,
            },
        },
    });
    Event::from_slice(body.to_string().as_bytes()).unwrap()
}

fn text_content(text: &str) -> String {
    json!({ "text": text }).to_string()
}

fn short_url_result() -> Value {
    json!({"code": 200, "message": "success", "data": {"shortURL": "http://u.jd.com/abc"}})
}

#[tokio::test]
async fn test_url_verification() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mock = MockHttpSend::new(StatusCode::OK, short_url_result());
    let event = Event::from_slice(
        br#"{"type":"url_verification","challenge":"ajls384kdjx98XX","token":"xxx"}"#,
    )
    .unwrap();

    let ack = relay(&mock).handle(&event).await;
    assert_eq!(ack, Ack::Challenge("ajls384kdjx98XX".to_string()));
    assert_eq!(mock.total(), 0);
}

#[tokio::test]
async fn test_message_with_product_link() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mock = MockHttpSend::new(StatusCode::OK, short_url_result());
    let event = message_event(
        "im.message.receive_v1",
        "user",
        &text_content("check this http://item.jd.com/123.html out"),
    );

    let ack = relay(&mock).handle(&event).await;
    assert_eq!(ack, Ack::Accepted);

    assert_eq!(
        mock.material_request(),
        json!({
            "promotionCodeReq": {
                "materialId": "http://item.jd.com/123.html",
                "siteId": "4000123",
                "positionId": 3001,
                "subUnionId": "ou_requester",
            }
        })
    );

    let (path, text) = mock.reply();
    assert_eq!(path, "/open-apis/im/v1/messages/om_1/reply");
    assert_eq!(text, "✅ 返现链接：http://u.jd.com/abc");
}

#[tokio::test]
async fn test_token_fetched_once_across_messages() {
    let mock = MockHttpSend::new(StatusCode::OK, short_url_result());
    let relay = relay(&mock);
    let event = message_event(
        "im.message.receive_v1",
        "user",
        &text_content("https://u.jd.com/xyz"),
    );

    relay.handle(&event).await;
    relay.handle(&event).await;

    let token_calls = mock
        .requests_to("feishu.test")
        .iter()
        .filter(|(path, _)| path.ends_with("tenant_access_token/internal"))
        .count();
    assert_eq!(token_calls, 1);
    assert_eq!(mock.requests_to("jd.test").len(), 2);
}

#[tokio::test]
async fn test_no_result_reply() {
    let mock = MockHttpSend::new(
        StatusCode::OK,
        json!({"code": 2001, "message": "invalid material"}),
    );
    let event = message_event(
        "im.message.receive_v1",
        "user",
        &text_content("http://item.jd.com/1.html"),
    );

    relay(&mock).handle(&event).await;

    let (_, text) = mock.reply();
    assert_eq!(text, NO_RESULT_REPLY);
}

#[tokio::test]
async fn test_network_failure_reply() {
    let mock = MockHttpSend::new(StatusCode::INTERNAL_SERVER_ERROR, short_url_result());
    let event = message_event(
        "im.message.receive_v1",
        "user",
        &text_content("http://item.jd.com/1.html"),
    );

    let ack = relay(&mock).handle(&event).await;
    assert_eq!(ack, Ack::Accepted);

    let (_, text) = mock.reply();
    assert!(text.starts_with("❌ 转链异常："), "unexpected reply: {text}");
}

#[test_case("im.message.receive_v1", "bot", r#"{"text":"http://item.jd.com/1.html"}"#; "sent by bot")]
#[test_case("im.message.receive_v1", "user", r#"{"text":"no links here"}"#; "no product link")]
#[test_case("im.message.receive_v1", "user", r#"{"text":"https://example.com/item"}"#; "foreign link")]
#[test_case("im.message.receive_v1", "user", "not json"; "unparsable content")]
#[test_case("im.chat.member.user.added_v1", "user", r#"{"text":"http://item.jd.com/1.html"}"#; "other event")]
#[tokio::test]
async fn test_ignored_events(event_type: &str, sender_type: &str, content: &str) {
    let mock = MockHttpSend::new(StatusCode::OK, short_url_result());
    let event = message_event(event_type, sender_type, content);

    let ack = relay(&mock).handle(&event).await;
    assert_eq!(ack, Ack::Accepted);
    assert_eq!(mock.total(), 0);
}

#[tokio::test]
async fn test_router() {
    let mock = MockHttpSend::new(StatusCode::OK, short_url_result());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(axum::serve(listener, router(relay(&mock))).into_future());

    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let health = client
        .get(format!("{base}/healthz"))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    assert_eq!(health.text().await.unwrap(), "ok");

    let challenge: Value = client
        .post(format!("{base}/event"))
        .json(&json!({"type": "url_verification", "challenge": "c-1"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(challenge, json!({"challenge": "c-1"}));

    let garbage: Value = client
        .post(format!("{base}/event"))
        .body("not json at all")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(garbage, json!({"code": 0}));
    assert_eq!(mock.total(), 0);
}
