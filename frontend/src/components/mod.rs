//! UI Components for the Statement Lens application.
//!
//! # Feature Components
//! - [`UploadSection`] - PDF selection with drag & drop and validation
//! - [`LoadingPanel`] / [`ErrorPanel`] - Submission progress and failure
//! - [`StatementResults`] - Parsed statement, transactions and exports
//! - [`ToastTray`] - Transient notifications

mod upload;
mod status;
mod results;
pub mod toasts;

pub use upload::*;
pub use status::*;
pub use results::*;
pub use toasts::*;
