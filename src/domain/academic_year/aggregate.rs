//! Academic year aggregate entity.
//!
//! An academic year is a school's yearly operating period. Every
//! year-partitioned record in the platform (fees, attendance, grades)
//! is scoped by one of these.
//!
//! # Ownership
//!
//! A year belongs to exactly one school. The `is_current` flag marks the
//! school's tenant-wide default; at most one year per school carries it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AcademicYearId, DomainError, SchoolId, Timestamp};

/// Maximum length for an academic year display name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Academic year aggregate.
///
/// # Invariants
///
/// - `name` is 1-100 characters, non-empty
/// - `ends_on` does not precede `starts_on` when both are set
/// - at most one year per school has `is_current = true`; the toggle is
///   owned by the repository's atomic set-current operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    /// Store-assigned identifier, unique across schools.
    id: AcademicYearId,

    /// School this year belongs to.
    school_id: SchoolId,

    /// Display name, e.g. "2024-25".
    name: String,

    /// Whether this is the school's tenant-wide default year.
    is_current: bool,

    /// First day of the operating period, if configured.
    starts_on: Option<NaiveDate>,

    /// Last day of the operating period, if configured.
    ends_on: Option<NaiveDate>,

    /// When the year was created.
    created_at: Timestamp,

    /// When the year was last updated.
    updated_at: Timestamp,
}

impl AcademicYear {
    /// Reconstitute a year from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AcademicYearId,
        school_id: SchoolId,
        name: String,
        is_current: bool,
        starts_on: Option<NaiveDate>,
        ends_on: Option<NaiveDate>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            school_id,
            name,
            is_current,
            starts_on,
            ends_on,
            created_at,
            updated_at,
        }
    }

    /// Returns the year ID.
    pub fn id(&self) -> AcademicYearId {
        self.id
    }

    /// Returns the owning school's ID.
    pub fn school_id(&self) -> SchoolId {
        self.school_id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this year is the school's default.
    pub fn is_current(&self) -> bool {
        self.is_current
    }

    /// Returns the first day of the operating period.
    pub fn starts_on(&self) -> Option<NaiveDate> {
        self.starts_on
    }

    /// Returns the last day of the operating period.
    pub fn ends_on(&self) -> Option<NaiveDate> {
        self.ends_on
    }

    /// Returns when the year was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the year was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Whether the given calendar date falls inside this year's bounds.
    ///
    /// An unset bound matches everything on its side.
    pub fn covers(&self, date: NaiveDate) -> bool {
        let after_start = self.starts_on.map_or(true, |s| date >= s);
        let before_end = self.ends_on.map_or(true, |e| date <= e);
        after_start && before_end
    }
}

/// Validated draft for a year that has not been persisted yet.
///
/// The store assigns the identifier and timestamps on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAcademicYear {
    school_id: SchoolId,
    name: String,
    is_current: bool,
    starts_on: Option<NaiveDate>,
    ends_on: Option<NaiveDate>,
}

impl NewAcademicYear {
    /// Creates a draft for a new academic year.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is empty or too long, or the
    ///   bounds are reversed
    pub fn new(
        school_id: SchoolId,
        name: String,
        starts_on: Option<NaiveDate>,
        ends_on: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        Self::validate_bounds(starts_on, ends_on)?;

        Ok(Self {
            school_id,
            name,
            is_current: false,
            starts_on,
            ends_on,
        })
    }

    /// Marks the draft as the school's default year on insert.
    pub fn as_current(mut self) -> Self {
        self.is_current = true;
        self
    }

    /// Returns the owning school's ID.
    pub fn school_id(&self) -> SchoolId {
        self.school_id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the draft will be inserted as the school's default.
    pub fn is_current(&self) -> bool {
        self.is_current
    }

    /// Returns the first day of the operating period.
    pub fn starts_on(&self) -> Option<NaiveDate> {
        self.starts_on
    }

    /// Returns the last day of the operating period.
    pub fn ends_on(&self) -> Option<NaiveDate> {
        self.ends_on
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name", "Name cannot be empty"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Name must be {} characters or less", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }

    fn validate_bounds(
        starts_on: Option<NaiveDate>,
        ends_on: Option<NaiveDate>,
    ) -> Result<(), DomainError> {
        if let (Some(start), Some(end)) = (starts_on, ends_on) {
            if end < start {
                return Err(DomainError::validation(
                    "ends_on",
                    "End date cannot precede start date",
                ));
            }
        }
        Ok(())
    }
}
