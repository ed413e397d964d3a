//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Unique identifier for a school (tenant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(i64);

impl SchoolId {
    /// Creates a SchoolId from a raw integer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SchoolId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: i64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid_format("school id", "not a decimal integer"))?;
        if id <= 0 {
            return Err(ValidationError::invalid_format(
                "school id",
                "must be positive",
            ));
        }
        Ok(Self(id))
    }
}

/// Unique identifier for an academic year.
///
/// Year ids are positive integers assigned by the data store. The
/// decimal rendering of this id is what travels in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcademicYearId(i64);

impl AcademicYearId {
    /// Creates an AcademicYearId from a raw integer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AcademicYearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AcademicYearId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("academic year id"));
        }
        let id: i64 = trimmed.parse().map_err(|_| {
            ValidationError::invalid_format("academic year id", "not a decimal integer")
        })?;
        if id <= 0 {
            return Err(ValidationError::invalid_format(
                "academic year id",
                "must be positive",
            ));
        }
        Ok(Self(id))
    }
}
