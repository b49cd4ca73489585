//! Pre-submission file checks.
//!
//! Every violated constraint is reported, so a file that is both the
//! wrong type and too large shows both problems at once.

use crate::config::FileConstraints;
use crate::types::{UploadCandidate, ValidationResult};

pub const MISSING_FILE_MESSAGE: &str = "Please select a file";
pub const INVALID_TYPE_MESSAGE: &str = "Only PDF files are supported";

/// Check a candidate against the constraints.
pub fn validate<B>(candidate: Option<&UploadCandidate<B>>, constraints: &FileConstraints) -> ValidationResult {
    let Some(candidate) = candidate else {
        return ValidationResult::from_violations(vec![MISSING_FILE_MESSAGE.to_string()]);
    };

    let mut violations = Vec::new();

    if !constraints.accepts(&candidate.media_type) {
        violations.push(INVALID_TYPE_MESSAGE.to_string());
    }

    if candidate.size_bytes > constraints.max_size_bytes {
        violations.push(size_violation(constraints));
    }

    ValidationResult::from_violations(violations)
}

/// "File size must be less than N MB", N taken from the configured limit.
pub fn size_violation(constraints: &FileConstraints) -> String {
    // f64 Display drops a zero fraction: 10.0 prints as "10"
    format!("File size must be less than {} MB", constraints.max_size_mb())
}
