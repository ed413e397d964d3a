//! Session-scoped academic year selection.
//!
//! A browser session can view a different academic year than the
//! school's configured default. The selection travels as the decimal
//! year id in an http-only cookie; this value object owns the parsing
//! rules so the HTTP adapter stays a thin codec.

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{AcademicYearId, ValidationError};

/// A client session's academic year selection.
///
/// Holds a syntactically valid year id taken from the session cookie.
/// Whether that id actually exists in the tenant's year set is NOT
/// checked here; the selection is trusted by resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionYearSelection(AcademicYearId);

impl SessionYearSelection {
    /// Creates a selection for the given year.
    pub fn new(year_id: AcademicYearId) -> Self {
        Self(year_id)
    }

    /// Returns the selected year id.
    pub fn year_id(&self) -> AcademicYearId {
        self.0
    }
}

impl fmt::Display for SessionYearSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionYearSelection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<AcademicYearId>().map(Self)
    }
}
