//! ResolveActiveYearHandler - resolves the effective academic year for a request.
//!
//! Every year-scoped data access in the platform must resolve a year
//! before touching year-partitioned data, and must treat a resolution
//! failure as blocking for the request.

use std::sync::Arc;

use crate::domain::academic_year::{AcademicYearError, SessionYearSelection};
use crate::domain::foundation::{AcademicYearId, SchoolId};
use crate::ports::AcademicYearRepository;

/// Query to resolve the effective academic year.
///
/// `session_selection` is the value the request boundary parsed out of
/// the session cookie, if any. Threading it through explicitly keeps
/// resolution free of cookie I/O.
#[derive(Debug, Clone)]
pub struct ResolveActiveYearQuery {
    pub school_id: SchoolId,
    pub session_selection: Option<SessionYearSelection>,
}

/// Where the resolved year came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearSource {
    /// The session cookie held a valid selection.
    SessionSelection,
    /// Fell back to the school's `is_current` year.
    TenantDefault,
}

/// Result of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedYear {
    pub year_id: AcademicYearId,
    pub source: YearSource,
}

/// Handler for resolving the active academic year.
pub struct ResolveActiveYearHandler {
    repository: Arc<dyn AcademicYearRepository>,
}

impl ResolveActiveYearHandler {
    pub fn new(repository: Arc<dyn AcademicYearRepository>) -> Self {
        Self { repository }
    }

    /// Resolve the effective year for `query.school_id`.
    ///
    /// A present session selection wins immediately and is NOT checked
    /// against the school's year set (the cookie is trusted). Otherwise
    /// the school's default year is looked up.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` if no selection is present and the school has
    ///   no default year
    pub async fn handle(
        &self,
        query: ResolveActiveYearQuery,
    ) -> Result<ResolvedYear, AcademicYearError> {
        if let Some(selection) = query.session_selection {
            return Ok(ResolvedYear {
                year_id: selection.year_id(),
                source: YearSource::SessionSelection,
            });
        }

        match self.repository.find_current(query.school_id).await? {
            Some(year) => Ok(ResolvedYear {
                year_id: year.id(),
                source: YearSource::TenantDefault,
            }),
            None => {
                tracing::warn!(school_id = %query.school_id, "no academic year configured");
                Err(AcademicYearError::not_configured(query.school_id))
            }
        }
    }
}
