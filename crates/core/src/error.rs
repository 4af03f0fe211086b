//! Report error types.

use c4reports_shared::AppError;
use thiserror::Error;

/// Errors that can occur during report generation.
///
/// Only filter validation can fail. Empty employee sets, empty ledgers and
/// missing holiday lists are valid empty results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A required filter is missing or has an unusable value.
    #[error("{0}")]
    InvalidFilter(String),
}

impl ReportError {
    /// Company filter missing or empty.
    #[must_use]
    pub fn company_required() -> Self {
        Self::InvalidFilter("Company is required".to_string())
    }

    /// Month filter missing or not a calendar month name.
    #[must_use]
    pub fn invalid_month() -> Self {
        Self::InvalidFilter("Please select a valid month".to_string())
    }

    /// Year filter missing or not positive.
    #[must_use]
    pub fn invalid_year() -> Self {
        Self::InvalidFilter("Please enter a valid year".to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidFilter(msg) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(ReportError::company_required().to_string(), "Company is required");
        assert_eq!(
            ReportError::invalid_month().to_string(),
            "Please select a valid month"
        );
        assert_eq!(
            ReportError::invalid_year().to_string(),
            "Please enter a valid year"
        );
    }

    #[test]
    fn test_maps_to_validation() {
        let app: AppError = ReportError::invalid_year().into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
        assert_eq!(app.to_string(), "Validation error: Please enter a valid year");
    }
}
