//! Academic-year specific error types.

use crate::domain::foundation::{AcademicYearId, DomainError, ErrorCode, SchoolId};

/// Errors raised by academic year operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcademicYearError {
    /// The school has no default academic year configured.
    ///
    /// Fatal for the calling request: every year-scoped operation
    /// downstream depends on a resolved year. Requires administrative
    /// setup, not a retry.
    NotConfigured(SchoolId),
    /// The year does not exist in the school's set.
    NotFound {
        school_id: SchoolId,
        year_id: AcademicYearId,
    },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl AcademicYearError {
    pub fn not_configured(school_id: SchoolId) -> Self {
        AcademicYearError::NotConfigured(school_id)
    }

    pub fn not_found(school_id: SchoolId, year_id: AcademicYearId) -> Self {
        AcademicYearError::NotFound { school_id, year_id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AcademicYearError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AcademicYearError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AcademicYearError::NotConfigured(_) => ErrorCode::AcademicYearNotFound,
            AcademicYearError::NotFound { .. } => ErrorCode::AcademicYearNotFound,
            AcademicYearError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AcademicYearError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AcademicYearError::NotConfigured(school_id) => format!(
                "School {} has no academic year configured",
                school_id
            ),
            AcademicYearError::NotFound { school_id, year_id } => format!(
                "Academic year {} not found for school {}",
                year_id, school_id
            ),
            AcademicYearError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AcademicYearError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AcademicYearError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AcademicYearError {}

impl From<DomainError> for AcademicYearError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                AcademicYearError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            _ => AcademicYearError::Infrastructure(err.to_string()),
        }
    }
}
