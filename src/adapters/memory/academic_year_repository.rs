//! In-memory academic year repository for testing.
//!
//! Provides synchronous, deterministic storage for unit and integration
//! tests and for local development without a database.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned. Production code uses the PostgreSQL adapter.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use crate::domain::academic_year::{AcademicYear, NewAcademicYear};
use crate::domain::foundation::{AcademicYearId, DomainError, ErrorCode, SchoolId, Timestamp};
use crate::ports::AcademicYearRepository;

/// In-memory academic year repository.
///
/// Features:
/// - Sequential id assignment, mirroring the database's bigserial
/// - The set-current toggle is applied under one write lock, so the
///   one-default-per-school invariant is never observably broken
/// - State helpers for assertions
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
pub struct InMemoryAcademicYearRepository {
    years: RwLock<Vec<AcademicYear>>,
    next_id: AtomicI64,
}

impl InMemoryAcademicYearRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            years: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    // === Test Helpers ===

    /// Returns how many years a school has (for test assertions).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn year_count(&self, school_id: SchoolId) -> usize {
        self.years
            .read()
            .expect("InMemoryAcademicYearRepository: lock poisoned")
            .iter()
            .filter(|y| y.school_id() == school_id)
            .count()
    }

    /// Returns the id of the school's default year, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn current_of(&self, school_id: SchoolId) -> Option<AcademicYearId> {
        self.years
            .read()
            .expect("InMemoryAcademicYearRepository: lock poisoned")
            .iter()
            .find(|y| y.school_id() == school_id && y.is_current())
            .map(|y| y.id())
    }

    /// Clears all stored years (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.years
            .write()
            .expect("InMemoryAcademicYearRepository: lock poisoned")
            .clear();
    }

    fn with_current_flag(year: &AcademicYear, is_current: bool) -> AcademicYear {
        AcademicYear::reconstitute(
            year.id(),
            year.school_id(),
            year.name().to_string(),
            is_current,
            year.starts_on(),
            year.ends_on(),
            *year.created_at(),
            Timestamp::now(),
        )
    }
}

impl Default for InMemoryAcademicYearRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AcademicYearRepository for InMemoryAcademicYearRepository {
    async fn create(&self, draft: &NewAcademicYear) -> Result<AcademicYear, DomainError> {
        let mut years = self
            .years
            .write()
            .expect("InMemoryAcademicYearRepository: lock poisoned");

        let id = AcademicYearId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = Timestamp::now();

        if draft.is_current() {
            for year in years
                .iter_mut()
                .filter(|y| y.school_id() == draft.school_id() && y.is_current())
            {
                *year = Self::with_current_flag(year, false);
            }
        }

        let year = AcademicYear::reconstitute(
            id,
            draft.school_id(),
            draft.name().to_string(),
            draft.is_current(),
            draft.starts_on(),
            draft.ends_on(),
            now,
            now,
        );
        years.push(year.clone());
        Ok(year)
    }

    async fn find_by_id(
        &self,
        school_id: SchoolId,
        year_id: AcademicYearId,
    ) -> Result<Option<AcademicYear>, DomainError> {
        Ok(self
            .years
            .read()
            .expect("InMemoryAcademicYearRepository: lock poisoned")
            .iter()
            .find(|y| y.school_id() == school_id && y.id() == year_id)
            .cloned())
    }

    async fn find_current(&self, school_id: SchoolId) -> Result<Option<AcademicYear>, DomainError> {
        Ok(self
            .years
            .read()
            .expect("InMemoryAcademicYearRepository: lock poisoned")
            .iter()
            .find(|y| y.school_id() == school_id && y.is_current())
            .cloned())
    }

    async fn list_by_school(&self, school_id: SchoolId) -> Result<Vec<AcademicYear>, DomainError> {
        let mut years: Vec<AcademicYear> = self
            .years
            .read()
            .expect("InMemoryAcademicYearRepository: lock poisoned")
            .iter()
            .filter(|y| y.school_id() == school_id)
            .cloned()
            .collect();
        years.sort_by(|a, b| b.id().cmp(&a.id()));
        Ok(years)
    }

    async fn count_by_school(&self, school_id: SchoolId) -> Result<u32, DomainError> {
        Ok(self.year_count(school_id) as u32)
    }

    async fn set_current(
        &self,
        school_id: SchoolId,
        year_id: AcademicYearId,
    ) -> Result<(), DomainError> {
        let mut years = self
            .years
            .write()
            .expect("InMemoryAcademicYearRepository: lock poisoned");

        if !years
            .iter()
            .any(|y| y.school_id() == school_id && y.id() == year_id)
        {
            return Err(DomainError::new(
                ErrorCode::AcademicYearNotFound,
                format!("Academic year not found: {}", year_id),
            ));
        }

        for year in years.iter_mut().filter(|y| y.school_id() == school_id) {
            let should_be_current = year.id() == year_id;
            if year.is_current() != should_be_current {
                *year = Self::with_current_flag(year, should_be_current);
            }
        }
        Ok(())
    }

    async fn delete(
        &self,
        school_id: SchoolId,
        year_id: AcademicYearId,
    ) -> Result<(), DomainError> {
        let mut years = self
            .years
            .write()
            .expect("InMemoryAcademicYearRepository: lock poisoned");

        let before = years.len();
        years.retain(|y| !(y.school_id() == school_id && y.id() == year_id));
        if years.len() == before {
            return Err(DomainError::new(
                ErrorCode::AcademicYearNotFound,
                format!("Academic year not found: {}", year_id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school() -> SchoolId {
        SchoolId::new(10)
    }

    fn draft(name: &str) -> NewAcademicYear {
        NewAcademicYear::new(school(), name.to_string(), None, None).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryAcademicYearRepository::new();
        let first = repo.create(&draft("2023-24")).await.unwrap();
        let second = repo.create(&draft("2024-25")).await.unwrap();
        assert!(first.id() < second.id());
    }

    #[tokio::test]
    async fn find_by_id_is_school_scoped() {
        let repo = InMemoryAcademicYearRepository::new();
        let year = repo.create(&draft("2023-24")).await.unwrap();

        let other_school = SchoolId::new(99);
        assert!(repo
            .find_by_id(other_school, year.id())
            .await
            .unwrap()
            .is_none());
        assert!(repo.find_by_id(school(), year.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn set_current_flips_exactly_one_flag() {
        let repo = InMemoryAcademicYearRepository::new();
        let first = repo.create(&draft("2023-24").as_current()).await.unwrap();
        let second = repo.create(&draft("2024-25")).await.unwrap();

        repo.set_current(school(), second.id()).await.unwrap();

        let years = repo.list_by_school(school()).await.unwrap();
        let current: Vec<_> = years.iter().filter(|y| y.is_current()).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].id(), second.id());
        assert!(!years
            .iter()
            .find(|y| y.id() == first.id())
            .unwrap()
            .is_current());
    }

    #[tokio::test]
    async fn set_current_rejects_unknown_year() {
        let repo = InMemoryAcademicYearRepository::new();
        repo.create(&draft("2023-24").as_current()).await.unwrap();

        let result = repo.set_current(school(), AcademicYearId::new(999)).await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().code,
            ErrorCode::AcademicYearNotFound
        );
        // The existing default must survive the failed switch.
        assert!(repo.current_of(school()).is_some());
    }

    #[tokio::test]
    async fn set_current_rejects_year_of_another_school() {
        let repo = InMemoryAcademicYearRepository::new();
        let other = NewAcademicYear::new(SchoolId::new(99), "2023-24".to_string(), None, None)
            .unwrap()
            .as_current();
        let foreign = repo.create(&other).await.unwrap();
        repo.create(&draft("2023-24").as_current()).await.unwrap();

        let result = repo.set_current(school(), foreign.id()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn creating_a_current_year_clears_previous_default() {
        let repo = InMemoryAcademicYearRepository::new();
        repo.create(&draft("2023-24").as_current()).await.unwrap();
        let second = repo.create(&draft("2024-25").as_current()).await.unwrap();

        let years = repo.list_by_school(school()).await.unwrap();
        assert_eq!(years.iter().filter(|y| y.is_current()).count(), 1);
        assert_eq!(repo.current_of(school()), Some(second.id()));
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let repo = InMemoryAcademicYearRepository::new();
        repo.create(&draft("2023-24")).await.unwrap();
        let second = repo.create(&draft("2024-25")).await.unwrap();

        let years = repo.list_by_school(school()).await.unwrap();
        assert_eq!(years[0].id(), second.id());
    }

    #[tokio::test]
    async fn delete_removes_the_year() {
        let repo = InMemoryAcademicYearRepository::new();
        let year = repo.create(&draft("2023-24")).await.unwrap();

        repo.delete(school(), year.id()).await.unwrap();
        assert_eq!(repo.year_count(school()), 0);
        assert!(repo.delete(school(), year.id()).await.is_err());
    }
}
