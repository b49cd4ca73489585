//! Error types for the Statement Lens development server.
//!
//! - [`FixtureError`] - fixture generation and export errors
//! - [`ConfigError`] - environment configuration errors
//! - [`ServerError`] - HTTP handler and startup errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::api::types::error_response;

// =============================================================================
// Fixture Errors
// =============================================================================

/// Errors while building or writing a fixture statement.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// No issuer matches the requested name.
    #[error("Unknown issuer: {0}")]
    UnknownIssuer(String),

    /// Failed to write the fixture.
    #[error("Failed to write fixture: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Fixture JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading server configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
///
/// Handler variants map onto the status codes the statement client
/// classifies (400 and 422 are rejections carrying a message).
#[derive(Debug, Error)]
pub enum ServerError {
    /// Malformed request or missing upload.
    #[error("{0}")]
    BadRequest(String),

    /// The upload was read but cannot be turned into a statement.
    #[error("{0}")]
    Unprocessable(String),

    /// Fixture error.
    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unprocessable(_) | ServerError::Fixture(FixtureError::UnknownIssuer(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_keep_their_message() {
        let err = ServerError::BadRequest("No file uploaded".into());
        assert_eq!(err.to_string(), "No file uploaded");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ServerError::Unprocessable("Failed to parse statement. Unsupported format.".into());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_fixture_error_conversion() {
        let err: ServerError = FixtureError::UnknownIssuer("Foo Bank".into()).into();
        assert!(err.to_string().contains("Foo Bank"));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ServerError = std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_error_surfaces_as_server_error() {
        fn load(port: &str) -> ServerResult<crate::config::ServerConfig> {
            let config = crate::config::ServerConfig::from_lookup(|name| {
                (name == crate::config::PORT_VAR).then(|| port.to_string())
            })?;
            Ok(config)
        }

        let err = load("eighty").unwrap_err();
        assert!(matches!(err, ServerError::Config(ConfigError::InvalidValue { .. })));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Configuration error: Invalid value for STATEMENT_LENS_PORT"));

        assert_eq!(load("9090").unwrap().port, 9090);
    }
}
