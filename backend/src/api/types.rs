//! REST API types for the statement client.
//!
//! Field names are camelCase to match what the frontend deserializes.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::Issuer;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "Credit Card Statement Parser";

/// Bytes of the upload echoed back by `/debug`.
pub const HEADER_PREVIEW_BYTES: usize = 64;

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn up() -> Self {
        Self {
            status: "UP".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// `GET /supported-issuers` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportedIssuersResponse {
    pub issuers: Vec<String>,
    pub count: usize,
}

impl SupportedIssuersResponse {
    pub fn all() -> Self {
        let issuers: Vec<String> = Issuer::ALL.iter().map(|i| i.display_name().to_string()).collect();
        Self {
            count: issuers.len(),
            issuers,
        }
    }
}

/// `POST /debug` response describing an upload without parsing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    pub file_name: Option<String>,
    pub size_bytes: usize,
    /// Leading bytes, lossily decoded, control characters replaced by `.`.
    pub header_preview: String,
    pub looks_like_pdf: bool,
    /// Display name of the detected issuer, or `"Unknown"`.
    pub issuer_detected: String,
}

impl DebugReport {
    pub fn inspect(file_name: Option<&str>, bytes: &[u8]) -> Self {
        let head = &bytes[..bytes.len().min(HEADER_PREVIEW_BYTES)];
        let header_preview = String::from_utf8_lossy(head)
            .chars()
            .map(|c| if c.is_control() { '.' } else { c })
            .collect();

        Self {
            file_name: file_name.map(str::to_string),
            size_bytes: bytes.len(),
            header_preview,
            looks_like_pdf: is_pdf(bytes),
            issuer_detected: file_name
                .and_then(Issuer::detect)
                .map(|i| i.display_name().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// PDF files start with the `%PDF` magic bytes.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

/// Create an error response body: `{ "error": ..., "timestamp": ... }`.
pub fn error_response(error: &str) -> Value {
    json!({
        "error": error,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let body = error_response("No file uploaded");
        assert_eq!(body["error"], "No file uploaded");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_supported_issuers() {
        let response = SupportedIssuersResponse::all();
        assert_eq!(response.count, 5);
        assert_eq!(response.issuers[0], "HDFC Bank");
        assert!(response.issuers.contains(&"American Express".to_string()));
    }

    #[test]
    fn test_debug_report() {
        let report = DebugReport::inspect(Some("icici-oct.pdf"), b"%PDF-1.7\n%\xe2\xe3\n1 0 obj");
        assert_eq!(report.size_bytes, 20);
        assert!(report.looks_like_pdf);
        assert!(report.header_preview.starts_with("%PDF-1.7."));
        assert_eq!(report.issuer_detected, "ICICI Bank");

        let report = DebugReport::inspect(None, b"hello");
        assert!(!report.looks_like_pdf);
        assert_eq!(report.issuer_detected, "Unknown");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sizeBytes"], 5);
        assert_eq!(json["issuerDetected"], "Unknown");
    }
}
