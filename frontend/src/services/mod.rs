//! Backend and browser services.
//!
//! # Services
//!
//! - [`api`] - Statement parser HTTP client
//! - [`browser`] - Downloads and clipboard access

pub mod api;
pub mod browser;

pub use api::*;
pub use browser::*;
