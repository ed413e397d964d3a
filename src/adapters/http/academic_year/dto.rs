//! HTTP DTOs for academic year endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::academic_year::{ResolvedYear, SwitchYearResult, YearSource};
use crate::domain::academic_year::AcademicYear;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to switch the active academic year.
///
/// `year_id` arrives as a string: the admin panel submits the raw form
/// value and validation happens server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchYearRequest {
    pub year_id: Option<String>,
    #[serde(default)]
    pub set_as_default: bool,
}

/// Request to create a new academic year.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateYearRequest {
    pub name: String,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
    #[serde(default)]
    pub make_default: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// The resolved active year for the calling session.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveYearResponse {
    pub year_id: i64,
    pub source: String,
}

impl From<ResolvedYear> for ActiveYearResponse {
    fn from(resolved: ResolvedYear) -> Self {
        let source = match resolved.source {
            YearSource::SessionSelection => "session",
            YearSource::TenantDefault => "default",
        };
        Self {
            year_id: resolved.year_id.as_i64(),
            source: source.to_string(),
        }
    }
}

/// Response for a successful year switch.
#[derive(Debug, Clone, Serialize)]
pub struct SwitchYearResponse {
    pub year_id: i64,
    pub default_updated: bool,
    pub message: String,
}

impl From<SwitchYearResult> for SwitchYearResponse {
    fn from(result: SwitchYearResult) -> Self {
        Self {
            year_id: result.year_id.as_i64(),
            default_updated: result.default_updated,
            message: "Academic year switched successfully".to_string(),
        }
    }
}

/// Academic year view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct YearResponse {
    pub id: i64,
    pub name: String,
    pub is_current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AcademicYear> for YearResponse {
    fn from(year: AcademicYear) -> Self {
        Self {
            id: year.id().as_i64(),
            name: year.name().to_string(),
            is_current: year.is_current(),
            starts_on: year.starts_on(),
            ends_on: year.ends_on(),
            created_at: year.created_at().as_datetime().to_rfc3339(),
            updated_at: year.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// List of a school's academic years.
#[derive(Debug, Clone, Serialize)]
pub struct YearListResponse {
    pub items: Vec<YearResponse>,
    pub total: usize,
}

impl From<Vec<AcademicYear>> for YearListResponse {
    fn from(years: Vec<AcademicYear>) -> Self {
        let items: Vec<YearResponse> = years.into_iter().map(Into::into).collect();
        let total = items.len();
        Self { items, total }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn year_not_found(message: impl Into<String>) -> Self {
        Self {
            code: "ACADEMIC_YEAR_NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
