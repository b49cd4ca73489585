//! # Statement Lens - development parser service
//!
//! A stand-in for the credit card statement parser so the web client can be
//! exercised locally. Uploads are validated like real statements (PDF name,
//! `%PDF` header, recognised issuer) and answered with fixture data; no PDF
//! text is extracted.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  PDF upload │────▶│   Checks    │────▶│   Issuer    │────▶│  Fixture    │
//! │ (multipart) │     │ (name, %PDF)│     │ (file name) │     │StatementData│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use statement_lens::{start_server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     start_server(ServerConfig::default()).await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Environment configuration
//! - [`models`] - Domain models (StatementData, Transaction, Issuer)
//! - [`fixtures`] - Fixture statements
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod config;
pub mod models;

// Fixture data
pub mod fixtures;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, FixtureError, FixtureResult, ServerError, ServerResult};

pub use config::{ServerConfig, API_PREFIX, DEFAULT_PORT};

pub use models::{Issuer, StatementData, Transaction, TransactionType};

pub use fixtures::{fixture_statement, fixture_statement_on, issuer_from_name, save_fixture};

pub use api::{router, serve, start_server};
