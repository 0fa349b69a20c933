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
use crate::credential::AppCredential;
use crate::sign_request::RequestSigner;
use crate::Config;
use bytes::Bytes;
use chrono::FixedOffset;
use http::header::CONTENT_TYPE;
use linkrelay_core::utils::truncate_chars;
use linkrelay_core::{Context, Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result fields that may carry the short url, in lookup order.
const SHORT_URL_FIELDS: [&str; 3] = ["shortURL", "shortUrl", "clickURL"];

/// LinkConverter turns product urls into tracked short urls through the
/// `jd.union.open.promotion.common.get` router method.
///
/// Failures are returned with one of these kinds:
///
/// - [`linkrelay_core::ErrorKind::NetworkFailed`]: transport failure or non-2xx status
/// - [`linkrelay_core::ErrorKind::NoResult`]: the partner answered without a short url
/// - [`linkrelay_core::ErrorKind::ConversionFailed`]: the response could not be parsed
#[derive(Debug, Clone)]
pub struct LinkConverter {
    ctx: Context,
    credential: AppCredential,
    site_id: String,
    position_id: i64,
    endpoint: String,
    utc_offset: Option<FixedOffset>,
}

impl LinkConverter {
    /// Create a new converter, failing if required config is missing.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let app_key = required(config.app_key, JD_APP_KEY)?;
        let app_secret = required(config.app_secret, JD_APP_SECRET)?;
        let site_id = required(config.site_id, JD_SITE_ID)?;
        let utc_offset = match config.utc_offset_hours {
            None => None,
            Some(hours) => Some(FixedOffset::east_opt(hours * 3600).ok_or_else(|| {
                Error::config_invalid(format!("{JD_UTC_OFFSET_HOURS} out of range: {hours}"))
            })?),
        };

        Ok(Self {
            ctx,
            credential: AppCredential::new(app_key, app_secret),
            site_id,
            position_id: config.position_id.unwrap_or_default(),
            endpoint: config
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            utc_offset,
        })
    }

    /// Convert `material_url` into a short url attributed to `sub_union_id`.
    pub async fn convert(&self, material_url: &str, sub_union_id: Option<&str>) -> Result<String> {
        let param_json = self.param_json(material_url, sub_union_id)?;

        let mut signer = RequestSigner::new(PROMOTION_COMMON_GET).with_time(self.ctx.now());
        if let Some(offset) = self.utc_offset {
            signer = signer.with_utc_offset(offset);
        }
        let signed = signer.sign(&self.credential, &param_json);

        let req = http::Request::post(self.endpoint.as_str())
            .header(
                CONTENT_TYPE,
                "application/x-www-form-urlencoded;charset=utf-8",
            )
            .body(Bytes::from(signed.form_body()))?;

        debug!("converting {material_url} via {}", self.endpoint);
        let resp = self.ctx.http_send(req).await?;

        if !resp.status().is_success() {
            let content = String::from_utf8_lossy(resp.body());
            return Err(Error::network_failed(format!(
                "request to jd union router failed with {}: {content}",
                resp.status()
            )));
        }

        let short_url = parse_promotion_response(PROMOTION_COMMON_GET, resp.body())?;
        info!("converted {material_url} into {short_url}");
        Ok(short_url)
    }

    fn param_json(&self, material_url: &str, sub_union_id: Option<&str>) -> Result<String> {
        let param = PromotionCodeParam {
            promotion_code_req: PromotionCodeReq {
                material_id: material_url,
                site_id: &self.site_id,
                position_id: self.position_id,
                sub_union_id: normalize_sub_union_id(sub_union_id),
            },
        };

        serde_json::to_string(&param).map_err(|e| {
            Error::request_invalid("failed to serialize promotion request").with_source(e)
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::config_invalid(format!("{name} is required")))
}

/// Normalize the attribution tag: absent or empty becomes `unknown`,
/// anything longer than 80 characters is cut to 80.
pub fn normalize_sub_union_id(sub_union_id: Option<&str>) -> &str {
    match sub_union_id {
        None | Some("") => UNKNOWN_SUB_UNION_ID,
        Some(v) => truncate_chars(v, MAX_SUB_UNION_ID_CHARS),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromotionCodeParam<'a> {
    promotion_code_req: PromotionCodeReq<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromotionCodeReq<'a> {
    material_id: &'a str,
    site_id: &'a str,
    position_id: i64,
    sub_union_id: &'a str,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct PromotionResult {
    code: Option<Value>,
    message: Option<String>,
    data: Option<Value>,
}

/// Envelope key of a router method's response, e.g.
/// `jd_union_open_promotion_common_get_response`.
fn response_key(method: &str) -> String {
    format!("{}_response", method.replace('.', "_"))
}

/// Extract the short url from a router response body.
///
/// The envelope wraps the method's result as a JSON string, which is
/// parsed again to reach `data`.
pub fn parse_promotion_response(method: &str, body: &[u8]) -> Result<String> {
    let envelope: Value = serde_json::from_slice(body).map_err(|e| {
        Error::conversion_failed("failed to parse router response").with_source(e)
    })?;

    if let Some(err) = envelope.get("error_response") {
        return Err(Error::conversion_failed(format!(
            "router rejected request: {err}"
        )));
    }

    let key = response_key(method);
    let result = envelope
        .get(&key)
        .and_then(|v| v.get("result"))
        .ok_or_else(|| Error::conversion_failed(format!("missing {key}.result in router response")))?;

    let result: PromotionResult = match result {
        Value::String(s) => serde_json::from_str(s),
        v => serde_json::from_value(v.clone()),
    }
    .map_err(|e| {
        Error::conversion_failed("failed to parse promotion result").with_source(e)
    })?;

    let data = result.data.unwrap_or(Value::Null);
    SHORT_URL_FIELDS
        .iter()
        .find_map(|field| data.get(*field).and_then(Value::as_str).filter(|v| !v.is_empty()))
        .map(str::to_string)
        .ok_or_else(|| {
            Error::no_result(format!(
                "no short url in promotion result (code: {}, message: {})",
                result.code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
                result.message.as_deref().unwrap_or("-"),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkrelay_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn test_converter() -> LinkConverter {
        LinkConverter::new(
            Context::new(),
            Config {
                app_key: Some("test_app_key".to_string()),
                app_secret: Some("test_app_secret".to_string()),
                site_id: Some("4000123".to_string()),
                position_id: Some(42),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn wrap(result: &str) -> Vec<u8> {
        serde_json::json!({
            "jd_union_open_promotion_common_get_response": {
                "code": "0",
                "result": result,
            }
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_param_json() {
        let json = test_converter()
            .param_json("http://item.jd.com/123.html", Some("ou_abc"))
            .unwrap();

        assert_eq!(
            json,
            r#"{"promotionCodeReq":{"materialId":"http://item.jd.com/123.html","siteId":"4000123","positionId":42,"subUnionId":"ou_abc"}}"#
        );
    }

    #[test]
    fn test_param_json_keeps_non_ascii() {
        let json = test_converter()
            .param_json("https://item.jd.com/1.html?n=京东", None)
            .unwrap();

        assert!(json.contains("n=京东"));
        assert!(json.contains(r#""subUnionId":"unknown""#));
    }

    #[test_case(None, "unknown"; "absent")]
    #[test_case(Some(""), "unknown"; "empty")]
    #[test_case(Some("ou_abc"), "ou_abc"; "short")]
    fn test_normalize_sub_union_id(input: Option<&str>, expected: &str) {
        assert_eq!(normalize_sub_union_id(input), expected);
    }

    #[test]
    fn test_normalize_sub_union_id_truncates() {
        let long = "x".repeat(81);
        assert_eq!(normalize_sub_union_id(Some(&long)).len(), 80);

        let exact = "y".repeat(80);
        assert_eq!(normalize_sub_union_id(Some(&exact)), exact);

        let wide = "京".repeat(100);
        assert_eq!(normalize_sub_union_id(Some(&wide)).chars().count(), 80);
    }

    #[test]
    fn test_new_requires_app_key() {
        let err = LinkConverter::new(Context::new(), Config::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.to_string().contains("JD_APP_KEY"));
    }

    #[test_case(r#"{"code":200,"data":{"shortURL":"http://u.jd.com/a","shortUrl":"http://u.jd.com/b"}}"#, "http://u.jd.com/a"; "short url upper")]
    #[test_case(r#"{"code":200,"data":{"shortUrl":"http://u.jd.com/b","clickURL":"http://union-click.jd.com/c"}}"#, "http://u.jd.com/b"; "short url camel")]
    #[test_case(r#"{"code":200,"data":{"clickURL":"http://union-click.jd.com/c"}}"#, "http://union-click.jd.com/c"; "click url")]
    #[test_case(r#"{"code":200,"data":{"shortURL":"","clickURL":"http://union-click.jd.com/c"}}"#, "http://union-click.jd.com/c"; "empty short url skipped")]
    fn test_parse_promotion_response(result: &str, expected: &str) {
        let url = parse_promotion_response(PROMOTION_COMMON_GET, &wrap(result)).unwrap();
        assert_eq!(url, expected);
    }

    #[test_case(r#"{"code":200}"#; "data absent")]
    #[test_case(r#"{"code":200,"data":null}"#; "data null")]
    #[test_case(r#"{"code":200,"data":{}}"#; "data empty")]
    fn test_parse_promotion_response_no_result(result: &str) {
        let err = parse_promotion_response(PROMOTION_COMMON_GET, &wrap(result)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoResult);
    }

    #[test]
    fn test_parse_promotion_response_carries_partner_message() {
        let err = parse_promotion_response(
            PROMOTION_COMMON_GET,
            &wrap(r#"{"code":2001703,"message":"推广物料不支持转链"}"#),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NoResult);
        assert!(err.to_string().contains("2001703"));
        assert!(err.to_string().contains("推广物料不支持转链"));
    }

    #[test]
    fn test_parse_promotion_response_object_result() {
        let body = serde_json::json!({
            "jd_union_open_promotion_common_get_response": {
                "result": {"data": {"shortURL": "http://u.jd.com/obj"}}
            }
        })
        .to_string();

        let url = parse_promotion_response(PROMOTION_COMMON_GET, body.as_bytes()).unwrap();
        assert_eq!(url, "http://u.jd.com/obj");
    }

    #[test_case("<html>bad gateway</html>"; "not json")]
    #[test_case(r#"{"unexpected":{}}"#; "missing envelope")]
    #[test_case(r#"{"error_response":{"code":"19","zh_desc":"app_key无效"}}"#; "error response")]
    fn test_parse_promotion_response_malformed(body: &str) {
        let err = parse_promotion_response(PROMOTION_COMMON_GET, body.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailed);
    }

    #[test]
    fn test_parse_promotion_response_malformed_inner() {
        let err = parse_promotion_response(PROMOTION_COMMON_GET, &wrap("{not json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailed);
        assert!(err.detail().contains("failed to parse promotion result"));
    }

    #[test]
    fn test_response_key() {
        assert_eq!(
            response_key(PROMOTION_COMMON_GET),
            "jd_union_open_promotion_common_get_response"
        );
    }
}
