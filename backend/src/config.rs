//! Server configuration.
//!
//! Values come from the environment (a `.env` file is loaded by the CLI
//! through `dotenvy`) and can be overridden by command-line flags.
//!
//! | Variable                              | Default |
//! |---------------------------------------|---------|
//! | `STATEMENT_LENS_PORT`                 | `8080`  |
//! | `STATEMENT_LENS_FIXTURE_TRANSACTIONS` | `5`     |

use std::str::FromStr;

use crate::error::ConfigError;

/// Port the parser service listens on by default.
pub const DEFAULT_PORT: u16 = 8080;

/// Transactions in a default fixture statement.
pub const DEFAULT_FIXTURE_TRANSACTIONS: usize = 5;

/// Largest statement accepted by `/parse` and `/debug` (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Route prefix shared by every statement endpoint.
pub const API_PREFIX: &str = "/api/statements";

pub const PORT_VAR: &str = "STATEMENT_LENS_PORT";
pub const FIXTURE_TRANSACTIONS_VAR: &str = "STATEMENT_LENS_FIXTURE_TRANSACTIONS";

/// Runtime settings for the development server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Number of transactions attached to each fixture response.
    pub fixture_transactions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fixture_transactions: DEFAULT_FIXTURE_TRANSACTIONS,
        }
    }
}

impl ServerConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary lookup, falling back to defaults
    /// for unset or blank variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            port: parse_var(&lookup, PORT_VAR)?.unwrap_or(defaults.port),
            fixture_transactions: parse_var(&lookup, FIXTURE_TRANSACTIONS_VAR)?
                .unwrap_or(defaults.fixture_transactions),
        })
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, port: Option<u16>, fixture_transactions: Option<usize>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(count) = fixture_transactions {
            self.fixture_transactions = count;
        }
        self
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        _ => Ok(None),
    }
}
