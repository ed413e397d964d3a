//! SwitchYearHandler - persists a year-switch intent.
//!
//! A switch always retargets the calling session (the HTTP adapter sets
//! the cookie from the result) and optionally retargets the tenant-wide
//! default for every session that falls back to it.

use std::sync::Arc;

use crate::domain::academic_year::{AcademicYearError, SessionYearSelection};
use crate::domain::foundation::{AcademicYearId, ErrorCode, SchoolId};
use crate::ports::AcademicYearRepository;

/// Command to switch the active academic year.
///
/// `raw_year_id` is the untrusted client-supplied value; it is not
/// parsed until the command is handled.
#[derive(Debug, Clone)]
pub struct SwitchYearCommand {
    pub school_id: SchoolId,
    pub raw_year_id: Option<String>,
    pub set_as_default: bool,
}

/// Result of a successful switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchYearResult {
    /// The year the session should now be scoped to.
    pub year_id: AcademicYearId,
    /// Whether the tenant-wide default was changed.
    pub default_updated: bool,
}

/// Handler for switching the active academic year.
pub struct SwitchYearHandler {
    repository: Arc<dyn AcademicYearRepository>,
}

impl SwitchYearHandler {
    pub fn new(repository: Arc<dyn AcademicYearRepository>) -> Self {
        Self { repository }
    }

    /// Handle a switch command.
    ///
    /// With `set_as_default`, the repository's atomic set-current runs
    /// and a target outside the school's set fails with `NotFound` — an
    /// unconditional toggle would leave the school without any default.
    /// Without it, no store state changes and the target id is not
    /// checked for existence, matching the trust applied to the session
    /// cookie on resolution.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `raw_year_id` is missing or does not
    ///   parse to a positive integer; no state change
    /// - `NotFound` if `set_as_default` targets a year outside the
    ///   school's set
    pub async fn handle(&self, cmd: SwitchYearCommand) -> Result<SwitchYearResult, AcademicYearError> {
        let raw = cmd
            .raw_year_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AcademicYearError::validation("year_id", "A year id must be provided")
            })?;

        let selection: SessionYearSelection = raw.parse().map_err(|_| {
            AcademicYearError::validation("year_id", "Year id must be a positive integer")
        })?;
        let year_id = selection.year_id();

        if cmd.set_as_default {
            match self.repository.set_current(cmd.school_id, year_id).await {
                Ok(()) => {
                    tracing::info!(
                        school_id = %cmd.school_id,
                        year_id = %year_id,
                        "tenant default year changed"
                    );
                }
                Err(e) if e.code == ErrorCode::AcademicYearNotFound => {
                    return Err(AcademicYearError::not_found(cmd.school_id, year_id));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(SwitchYearResult {
            year_id,
            default_updated: cmd.set_as_default,
        })
    }
}
