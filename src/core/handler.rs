use crate::core::envelope::{ApiError, ApiResponse};
use crate::core::projection::ResponsePhoneNumber;
use crate::domain::model::{NumberFormat, RequestParams};
use crate::domain::ports::PhoneNumberUtil;
use crate::utils::error::{AppError, Result};
use axum::http::Method;
use serde::Serialize;
use std::sync::Arc;
use url::form_urlencoded;

pub const HELLO_NAME: &str = "John Doe";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelloData {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseData {
    pub phone_number: ResponsePhoneNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatData {
    pub format: NumberFormat,
    pub formatted: String,
}

/// 取得查詢字串中某個 key 的第一個值，重複的 key 只取第一個
pub fn first_query_value(raw_query: Option<&str>, key: &str) -> Option<String> {
    let query = raw_query?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// Query parameters are honoured for GET only; other methods read nothing.
pub fn extract_params(method: &Method, raw_query: Option<&str>) -> RequestParams {
    if *method != Method::GET {
        return RequestParams::default();
    }

    RequestParams {
        number: first_query_value(raw_query, "number"),
        region: first_query_value(raw_query, "region"),
    }
}

fn extract_format(method: &Method, raw_query: Option<&str>) -> Option<String> {
    if *method != Method::GET {
        return None;
    }
    first_query_value(raw_query, "format")
}

/// 執行函式庫呼叫，將 panic 轉為內部錯誤
fn guarded<T>(operation: &str, call: impl FnOnce() -> Result<T>) -> Result<T> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic payload".to_string()
            };
            tracing::error!("💥 {} panicked: {}", operation, message);
            Err(AppError::InternalError {
                message: format!("{} panicked", operation),
            })
        }
    }
}

/// Maps HTTP input onto the phone utility and wraps every outcome in an
/// [`ApiResponse`]. Never returns an error.
#[derive(Clone)]
pub struct ApiHandler {
    util: Arc<dyn PhoneNumberUtil>,
    expose_error_messages: bool,
}

impl ApiHandler {
    pub fn new(util: Arc<dyn PhoneNumberUtil>, expose_error_messages: bool) -> Self {
        Self {
            util,
            expose_error_messages,
        }
    }

    pub fn hello(&self) -> ApiResponse<HelloData> {
        ApiResponse::pending().succeed(HelloData {
            name: HELLO_NAME.to_string(),
        })
    }

    pub fn parse(&self, method: &Method, raw_query: Option<&str>) -> ApiResponse<ParseData> {
        let params = extract_params(method, raw_query);
        tracing::debug!(?params, %method, "parse request");

        let result = guarded("parse", || {
            self.util
                .parse(params.number.as_deref(), params.region.as_deref())
        });
        self.finish("parse", result.map(into_parse_data))
    }

    pub fn parse_and_keep_raw_input(
        &self,
        method: &Method,
        raw_query: Option<&str>,
    ) -> ApiResponse<ParseData> {
        let params = extract_params(method, raw_query);
        tracing::debug!(?params, %method, "parse-and-keep-raw-input request");

        let result = guarded("parse_and_keep_raw_input", || {
            self.util
                .parse_and_keep_raw_input(params.number.as_deref(), params.region.as_deref())
        });
        self.finish("parse-and-keep-raw-input", result.map(into_parse_data))
    }

    pub fn format(&self, method: &Method, raw_query: Option<&str>) -> ApiResponse<FormatData> {
        let params = extract_params(method, raw_query);
        let requested = extract_format(method, raw_query);
        tracing::debug!(?params, ?requested, %method, "format request");

        let result = requested
            .as_deref()
            .map(str::parse::<NumberFormat>)
            .transpose()
            .and_then(|style| {
                let style = style.unwrap_or_default();
                let record = guarded("parse", || {
                    self.util
                        .parse(params.number.as_deref(), params.region.as_deref())
                })?;
                let formatted = guarded("format", || self.util.format(&record, style))?;
                Ok(FormatData {
                    format: style,
                    formatted,
                })
            });
        self.finish("format", result)
    }

    fn finish<T>(&self, endpoint: &str, result: Result<T>) -> ApiResponse<T> {
        let result = result.map_err(|e| {
            tracing::warn!(
                "⚠️ {} failed: {} (Category: {:?})",
                endpoint,
                e,
                e.category()
            );
            ApiError::from_app_error(&e, self.expose_error_messages)
        });
        ApiResponse::pending().resolve(result)
    }
}

fn into_parse_data(record: crate::domain::model::PhoneNumberRecord) -> ParseData {
    ParseData {
        phone_number: ResponsePhoneNumber::from(record),
    }
}
