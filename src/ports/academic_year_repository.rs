//! Academic year repository port.
//!
//! Defines the storage contract for academic years, including the
//! atomic set-current operation the resolution invariant depends on.
//!
//! # Design
//!
//! - **School-scoped**: every query is keyed by school id; a year is
//!   never visible outside its tenant
//! - **Atomic default toggle**: `set_current` must flip `is_current` on
//!   the target and off on all siblings as one consistent update, never
//!   a read-then-write

use async_trait::async_trait;

use crate::domain::academic_year::{AcademicYear, NewAcademicYear};
use crate::domain::foundation::{AcademicYearId, DomainError, SchoolId};

/// Repository port for academic year persistence.
///
/// Implementations must ensure at most one year per school has
/// `is_current = true` at any observable point, including while a
/// `set_current` call is in flight.
#[async_trait]
pub trait AcademicYearRepository: Send + Sync {
    /// Insert a new year and return it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, draft: &NewAcademicYear) -> Result<AcademicYear, DomainError>;

    /// Find a year by id within a school's set.
    ///
    /// Returns `None` if the year does not exist or belongs to another
    /// school.
    async fn find_by_id(
        &self,
        school_id: SchoolId,
        year_id: AcademicYearId,
    ) -> Result<Option<AcademicYear>, DomainError>;

    /// Find the school's default year (`is_current = true`).
    ///
    /// Returns `None` when the school has no default configured.
    async fn find_current(&self, school_id: SchoolId) -> Result<Option<AcademicYear>, DomainError>;

    /// List all years of a school, newest first.
    async fn list_by_school(&self, school_id: SchoolId) -> Result<Vec<AcademicYear>, DomainError>;

    /// Count the years configured for a school.
    async fn count_by_school(&self, school_id: SchoolId) -> Result<u32, DomainError>;

    /// Make `year_id` the school's default: `is_current` becomes true on
    /// it and false on every sibling, as a single consistent update.
    ///
    /// # Errors
    ///
    /// - `AcademicYearNotFound` if the year is not in the school's set
    /// - `DatabaseError` on persistence failure
    async fn set_current(
        &self,
        school_id: SchoolId,
        year_id: AcademicYearId,
    ) -> Result<(), DomainError>;

    /// Delete a year (primarily for testing).
    ///
    /// # Errors
    ///
    /// - `AcademicYearNotFound` if the year is not in the school's set
    /// - `DatabaseError` on persistence failure
    async fn delete(
        &self,
        school_id: SchoolId,
        year_id: AcademicYearId,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn academic_year_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AcademicYearRepository) {}
    }
}
