//! Application configuration.
//!
//! Centralized configuration for the Statement Lens frontend.
//! The API base URL is read from the build environment
//! (`STATEMENT_API_BASE_URL`) so the same bundle can target a local
//! development server or a deployed parser.

use std::time::Duration;

/// Default parser API base URL when none is supplied at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/statements";

/// Parser API base URL.
///
/// Overridden by the `STATEMENT_API_BASE_URL` variable at build time.
pub const API_BASE_URL: &str = match option_env!("STATEMENT_API_BASE_URL") {
    Some(url) => url,
    None => DEFAULT_API_BASE_URL,
};

/// Upper bound on a single parser request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum file size for upload (in bytes).
///
/// 10 MB limit.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Media types accepted by the parser.
pub const ACCEPTED_MEDIA_TYPES: &[&str] = &["application/pdf"];

/// Value of the file input `accept` attribute.
pub const ACCEPT_ATTRIBUTE: &str = ".pdf,application/pdf";

/// Issuers advertised until the parser reports its own list.
pub const DEFAULT_SUPPORTED_ISSUERS: &[&str] = &["HDFC Bank", "ICICI Bank", "SBI Card", "Axis Bank"];

/// Number of transactions rendered in the results table.
pub const MAX_DISPLAYED_TRANSACTIONS: usize = 10;

/// Maximum toasts kept on screen.
pub const MAX_TOASTS: usize = 4;

/// How long a toast stays visible (milliseconds).
pub const TOAST_DURATION_MS: u32 = 4_000;

/// Connection settings for the parser API client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, without a trailing slash (e.g. `http://host/api/statements`).
    pub base_url: String,
    /// Upper bound on each request.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Absolute URL for an endpoint path such as `/parse`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

/// Pre-submission constraints applied to a candidate file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileConstraints {
    pub max_size_bytes: u64,
    pub accepted_media_types: Vec<String>,
}

impl FileConstraints {
    /// Size limit expressed in megabytes, as shown to users.
    pub fn max_size_mb(&self) -> f64 {
        self.max_size_bytes as f64 / 1024.0 / 1024.0
    }

    pub fn accepts(&self, media_type: &str) -> bool {
        self.accepted_media_types.iter().any(|t| t == media_type)
    }
}

impl Default for FileConstraints {
    fn default() -> Self {
        Self {
            max_size_bytes: MAX_FILE_SIZE,
            accepted_media_types: ACCEPTED_MEDIA_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}
