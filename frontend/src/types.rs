//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Upload Types** - Candidate files and validation outcomes
//! - **Statement Types** - Parser response schema
//! - **Workflow Types** - Status and failure classification
//! - **Notification Types** - Toast messages
//! - **Error Types** - API and browser errors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Upload Types
// =============================================================================

/// A file selected by the user, not yet submitted.
///
/// `B` is the underlying blob handle (`web_sys::File` in the browser).
#[derive(Clone, Debug, PartialEq)]
pub struct UploadCandidate<B> {
    /// File name as reported by the browser
    pub name: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// MIME type (empty when the browser could not tell)
    pub media_type: String,
    /// Blob handle sent to the parser
    pub blob: B,
}

impl<B> UploadCandidate<B> {
    pub fn new(name: impl Into<String>, size_bytes: u64, media_type: impl Into<String>, blob: B) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            media_type: media_type.into(),
            blob,
        }
    }
}

impl UploadCandidate<web_sys::File> {
    /// Wrap a browser `File`, reading its metadata.
    pub fn from_file(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            size_bytes: file.size().max(0.0) as u64,
            media_type: file.type_(),
            blob: file,
        }
    }
}

/// Outcome of checking a candidate against the file constraints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_admissible: bool,
    /// Every violated constraint, in check order
    pub violations: Vec<String>,
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<String>) -> Self {
        Self {
            is_admissible: violations.is_empty(),
            violations,
        }
    }
}

// =============================================================================
// Statement Types
// =============================================================================

/// A monetary amount as sent by the parser.
///
/// The backend serializes decimals as JSON numbers, but some issuers
/// come back as strings (`"1,250.00"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Numeric value, if the amount can be read as one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Amount::Number(n) if n.is_finite() => Some(*n),
            Amount::Number(_) => None,
            Amount::Text(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

/// A single statement line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub transaction_date: Option<String>,
    /// Older parser builds send `date` instead of `transactionDate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub posting_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub amount: Option<Amount>,
    /// DEBIT, CREDIT, FEE...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Transaction {
    /// `transactionDate` when present, else the legacy `date` key.
    pub fn effective_date(&self) -> Option<&str> {
        self.transaction_date.as_deref().or(self.date.as_deref())
    }
}

/// Parsed credit card statement, as returned by `POST /parse`.
///
/// Every field is optional: issuers differ in what they print, and the
/// display layer renders placeholders for anything missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementData {
    #[serde(default)]
    pub issuer_name: Option<String>,
    #[serde(default)]
    pub card_holder_name: Option<String>,
    #[serde(default)]
    pub card_last_four_digits: Option<String>,
    #[serde(default)]
    pub card_variant: Option<String>,
    #[serde(default)]
    pub statement_date: Option<String>,
    #[serde(default)]
    pub payment_due_date: Option<String>,
    #[serde(default)]
    pub total_amount_due: Option<Amount>,
    #[serde(default)]
    pub credit_limit: Option<Amount>,
    #[serde(default)]
    pub available_credit: Option<Amount>,
    #[serde(default)]
    pub minimum_amount_due: Option<Amount>,
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
}

impl StatementData {
    /// Transactions in the order the parser returned them.
    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.as_deref().unwrap_or_default()
    }
}

/// A successful parse: the typed statement plus the document exactly as
/// received, which is what exports serialize.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    pub statement: StatementData,
    pub raw: Value,
}

impl ParseResult {
    /// Validate a JSON document against the statement schema.
    pub fn from_value(raw: Value) -> Result<Self, SchemaError> {
        if !raw.is_object() {
            return Err(SchemaError("expected a JSON object".to_string()));
        }
        let statement = serde_json::from_value::<StatementData>(raw.clone())
            .map_err(|e| SchemaError(e.to_string()))?;
        Ok(Self { statement, raw })
    }
}

/// The response body did not match [`StatementData`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaError(pub String);

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unexpected statement format: {}", self.0)
    }
}

impl std::error::Error for SchemaError {}

// =============================================================================
// Workflow Types
// =============================================================================

/// Coarse workflow status driving which panel is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkflowStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Idle => "idle",
            WorkflowStatus::Submitting => "submitting",
            WorkflowStatus::Succeeded => "succeeded",
            WorkflowStatus::Failed => "failed",
        }
    }
}

/// Network-stage failure classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    NoResponse,
    ServerRejected,
    ClientError,
}

/// Why the last submission failed, as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureReason {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&ApiError> for FailureReason {
    fn from(error: &ApiError) -> Self {
        Self {
            kind: error.kind(),
            message: error.user_message(),
        }
    }
}

// =============================================================================
// Notification Types
// =============================================================================

/// Notification severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

impl NotificationLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "toast-success",
            NotificationLevel::Error => "toast-error",
            NotificationLevel::Info => "toast-info",
        }
    }

    /// Get emoji prefix for display.
    pub fn emoji(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "✅",
            NotificationLevel::Error => "❌",
            NotificationLevel::Info => "ℹ️",
        }
    }
}

/// A message for the toast sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Info, message: message.into() }
    }
}

/// A notification on screen, keyed for removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

// =============================================================================
// Error Types
// =============================================================================

/// Fallback shown when the parser rejects a file without explaining why.
pub const PARSE_FAILED_MESSAGE: &str = "Failed to parse statement. The format may not be supported.";
/// Fallback for network failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
/// Fallback for timeouts.
pub const TIMEOUT_MESSAGE: &str = "The parser took too long to respond. Please try again.";
/// Fallback for requests that could not be sent.
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload file. Please try again.";
/// Message for 2xx bodies that do not look like a statement.
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "The parser returned an unexpected response.";

/// Parser API errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// No response within the configured timeout.
    Timeout,
    /// Request sent, no usable response (network-level).
    NoResponse(String),
    /// The parser answered with an error. `message` is its `error` field.
    ServerRejected { status: u16, message: Option<String> },
    /// The request could not be constructed.
    ClientError(String),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Timeout => FailureKind::Timeout,
            ApiError::NoResponse(_) => FailureKind::NoResponse,
            ApiError::ServerRejected { .. } => FailureKind::ServerRejected,
            ApiError::ClientError(_) => FailureKind::ClientError,
        }
    }

    /// Single user-facing message: the backend's own words when it sent
    /// any, a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::ServerRejected { message: Some(msg), .. } if !msg.trim().is_empty() => msg.clone(),
            ApiError::ServerRejected { .. } => PARSE_FAILED_MESSAGE.to_string(),
            ApiError::Timeout => TIMEOUT_MESSAGE.to_string(),
            ApiError::NoResponse(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::ClientError(_) => UPLOAD_FAILED_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::NoResponse(msg) => write!(f, "No response: {}", msg),
            ApiError::ServerRejected { status, message } => write!(
                f,
                "Server rejected request ({}): {}",
                status,
                message.as_deref().unwrap_or("no details")
            ),
            ApiError::ClientError(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result type alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Browser-side errors (clipboard, downloads).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    /// Clipboard write failed or is unavailable.
    Clipboard(String),
    /// File download could not be started.
    Download(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),
            AppError::Download(msg) => write!(f, "Download error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
