//! HTTP client for the statement parser API.
//!
//! # Endpoints
//!
//! | Method | Path                 | Used by                          |
//! |--------|----------------------|----------------------------------|
//! | POST   | `/parse`             | [`ApiClient::submit`]            |
//! | POST   | `/debug`             | [`ApiClient::debug`]             |
//! | GET    | `/health`            | [`ApiClient::health`]            |
//! | GET    | `/supported-issuers` | [`ApiClient::supported_issuers`] |
//!
//! Every request races a timer; when the timer wins the fetch is aborted
//! and the call fails with [`ApiError::Timeout`].

use futures::future::{select, Either};
use futures::pin_mut;
use std::future::Future;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use web_sys::{AbortController, File, FormData};

use crate::config::ApiConfig;
use crate::types::{ApiError, ApiResult, ParseResult, UNEXPECTED_FORMAT_MESSAGE};

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Response of `GET /supported-issuers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportedIssuers {
    pub issuers: Vec<String>,
    #[serde(default)]
    pub count: usize,
}

/// Client for the parser API. Holds no state beyond its configuration.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Upload a statement PDF and return the parsed statement.
    pub async fn submit(&self, file: &File) -> ApiResult<ParseResult> {
        let (status, body) = self.post_file("/parse", file).await?;
        classify_parse_response(status, &body)
    }

    /// Upload a PDF to the diagnostics endpoint and return its raw reply.
    pub async fn debug(&self, file: &File) -> ApiResult<String> {
        let (status, body) = self.post_file("/debug", file).await?;
        classify_text_response(status, body)
    }

    /// Liveness check.
    pub async fn health(&self) -> ApiResult<HealthStatus> {
        let (status, body) = self.get("/health").await?;
        classify_json_response(status, &body)
    }

    /// Issuers the parser knows how to read.
    pub async fn supported_issuers(&self) -> ApiResult<Vec<String>> {
        let (status, body) = self.get("/supported-issuers").await?;
        classify_json_response::<SupportedIssuers>(status, &body).map(|s| s.issuers)
    }

    async fn post_file(&self, path: &str, file: &File) -> ApiResult<(u16, String)> {
        let form_data =
            FormData::new().map_err(|e| ApiError::ClientError(format!("Failed to create FormData: {:?}", e)))?;
        form_data
            .append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| ApiError::ClientError(format!("Failed to append file: {:?}", e)))?;

        let abort = new_abort_controller()?;
        let url = self.config.endpoint(path);
        log::debug!("POST {}", url);

        let request = Request::post(&url)
            .abort_signal(Some(&abort.signal()))
            .body(form_data)
            .map_err(|e| ApiError::ClientError(format!("Failed to build request: {}", e)))?;

        self.send_with_timeout(request, abort).await
    }

    async fn get(&self, path: &str) -> ApiResult<(u16, String)> {
        let abort = new_abort_controller()?;
        let url = self.config.endpoint(path);
        log::debug!("GET {}", url);

        let request = Request::get(&url)
            .abort_signal(Some(&abort.signal()))
            .build()
            .map_err(|e| ApiError::ClientError(format!("Failed to build request: {}", e)))?;

        self.send_with_timeout(request, abort).await
    }

    async fn send_with_timeout(&self, request: Request, abort: AbortController) -> ApiResult<(u16, String)> {
        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::NoResponse(format!("HTTP request failed: {}", e)))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::NoResponse(format!("Failed to read response: {}", e)))?;
            Ok::<_, ApiError>((status, body))
        };
        let timer = TimeoutFuture::new(timeout_millis(&self.config));
        let timeout = self.config.timeout;

        race_timeout(exchange, timer, || {
            abort.abort();
            log::warn!("⏱️ Request aborted after {:?}", timeout);
        })
        .await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

/// Resolve `exchange` unless `timer` finishes first, in which case
/// `on_timeout` runs and the call fails with [`ApiError::Timeout`].
async fn race_timeout<T, E, R>(exchange: E, timer: R, on_timeout: impl FnOnce()) -> ApiResult<T>
where
    E: Future<Output = ApiResult<T>>,
    R: Future<Output = ()>,
{
    pin_mut!(exchange);
    pin_mut!(timer);

    match select(exchange, timer).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => {
            on_timeout();
            Err(ApiError::Timeout)
        }
    }
}

fn new_abort_controller() -> ApiResult<AbortController> {
    AbortController::new().map_err(|e| ApiError::ClientError(format!("Failed to create AbortController: {:?}", e)))
}

fn timeout_millis(config: &ApiConfig) -> u32 {
    u32::try_from(config.timeout.as_millis()).unwrap_or(u32::MAX)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

// =============================================================================
// Response classification
// =============================================================================

/// Turn a `/parse` response into a statement or a classified error.
///
/// Non-2xx statuses are rejections carrying the body's `error` field.
/// A 2xx body that is not a statement is also a rejection.
pub fn classify_parse_response(status: u16, body: &str) -> ApiResult<ParseResult> {
    if !is_success(status) {
        return Err(rejection(status, body));
    }

    let raw: Value = serde_json::from_str(body).map_err(|e| unexpected_format(status, e))?;
    ParseResult::from_value(raw).map_err(|e| unexpected_format(status, e))
}

fn classify_json_response<T: serde::de::DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if !is_success(status) {
        return Err(rejection(status, body));
    }
    serde_json::from_str(body).map_err(|e| unexpected_format(status, e))
}

fn classify_text_response(status: u16, body: String) -> ApiResult<String> {
    if is_success(status) {
        Ok(body)
    } else {
        Err(rejection(status, &body))
    }
}

/// Build a rejection from an error body such as
/// `{"error": "Only PDF files are supported", "timestamp": "..."}`.
pub fn rejection(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(|s| s.to_string()));

    ApiError::ServerRejected { status, message }
}

fn unexpected_format(status: u16, detail: impl std::fmt::Display) -> ApiError {
    log::error!("Unexpected parser response ({}): {}", status, detail);
    ApiError::ServerRejected {
        status,
        message: Some(UNEXPECTED_FORMAT_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future;

    #[test]
    fn test_success_body_is_parsed() {
        let body = r#"{
            "issuerName": "ICICI Bank",
            "cardLastFourDigits": "4321",
            "cardVariant": "Coral",
            "statementDate": "2025-10-05",
            "paymentDueDate": "2025-10-25",
            "totalAmountDue": 12500.75,
            "transactions": []
        }"#;

        let result = classify_parse_response(200, body).unwrap();
        assert_eq!(result.statement.card_last_four_digits.as_deref(), Some("4321"));
        assert_eq!(result.raw["issuerName"], "ICICI Bank");
    }

    #[test]
    fn test_error_body_message_is_verbatim() {
        let err = classify_parse_response(400, r#"{"error":"bad format","timestamp":"2025-10-19T10:00:00Z"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::ServerRejected { status: 400, message: Some("bad format".to_string()) }
        );
        assert_eq!(err.user_message(), "bad format");
    }

    #[test]
    fn test_error_without_structured_body() {
        let err = classify_parse_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, ApiError::ServerRejected { status: 502, message: None });
        assert_eq!(err.user_message(), crate::types::PARSE_FAILED_MESSAGE);
    }

    #[test]
    fn test_non_success_status_fails_even_with_statement_body() {
        let err = classify_parse_response(422, r#"{"issuerName":"HDFC Bank"}"#).unwrap_err();
        assert_eq!(err, ApiError::ServerRejected { status: 422, message: None });
    }

    #[test]
    fn test_schema_mismatch_is_rejection() {
        let err = classify_parse_response(200, r#"{"transactions": 42}"#).unwrap_err();
        assert_eq!(err.user_message(), UNEXPECTED_FORMAT_MESSAGE);

        let err = classify_parse_response(200, "not json").unwrap_err();
        assert_eq!(err.kind(), crate::types::FailureKind::ServerRejected);
    }

    #[test]
    fn test_json_endpoints() {
        let health: HealthStatus =
            classify_json_response(200, r#"{"status":"UP","service":"Credit Card Statement Parser","version":"1.0"}"#)
                .unwrap();
        assert_eq!(health.status, "UP");

        let issuers: SupportedIssuers =
            classify_json_response(200, r#"{"issuers":["HDFC Bank","ICICI Bank"],"count":2}"#).unwrap();
        assert_eq!(issuers.issuers.len(), 2);

        assert!(classify_json_response::<HealthStatus>(503, r#"{"error":"down"}"#).is_err());
    }

    #[test]
    fn test_debug_text_passthrough() {
        assert_eq!(classify_text_response(200, "raw text".to_string()).unwrap(), "raw text");
        let err = classify_text_response(500, r#"{"error":"Error: broken"}"#.to_string()).unwrap_err();
        assert_eq!(err.user_message(), "Error: broken");
    }

    #[test]
    fn test_timeout_millis() {
        assert_eq!(timeout_millis(&ApiConfig::new("http://x")), 30_000);
    }

    #[test]
    fn test_stalled_exchange_times_out() {
        let mut aborted = false;
        let outcome = block_on(race_timeout(
            future::pending::<ApiResult<u16>>(),
            future::ready(()),
            || aborted = true,
        ));
        assert_eq!(outcome, Err(ApiError::Timeout));
        assert_eq!(outcome.unwrap_err().kind(), crate::types::FailureKind::Timeout);
        assert!(aborted);
    }

    #[test]
    fn test_finished_exchange_beats_timer() {
        let mut aborted = false;
        let outcome = block_on(race_timeout(
            future::ready(Ok((200u16, "{}".to_string()))),
            future::pending::<()>(),
            || aborted = true,
        ));
        assert_eq!(outcome, Ok((200, "{}".to_string())));
        assert!(!aborted);

        let outcome = block_on(race_timeout(
            future::ready(Err::<u16, _>(ApiError::NoResponse("connection refused".into()))),
            future::pending::<()>(),
            || aborted = true,
        ));
        assert_eq!(outcome, Err(ApiError::NoResponse("connection refused".into())));
        assert!(!aborted);
    }
}
