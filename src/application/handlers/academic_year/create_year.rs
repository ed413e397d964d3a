//! CreateYearHandler - command handler for configuring academic years.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::academic_year::{AcademicYear, AcademicYearError, NewAcademicYear};
use crate::domain::foundation::SchoolId;
use crate::ports::AcademicYearRepository;

/// Command to create a new academic year for a school.
#[derive(Debug, Clone)]
pub struct CreateYearCommand {
    pub school_id: SchoolId,
    pub name: String,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub make_default: bool,
}

/// Result of a successful creation.
#[derive(Debug, Clone)]
pub struct CreateYearResult {
    pub year: AcademicYear,
}

/// Handler for creating academic years.
pub struct CreateYearHandler {
    repository: Arc<dyn AcademicYearRepository>,
}

impl CreateYearHandler {
    pub fn new(repository: Arc<dyn AcademicYearRepository>) -> Self {
        Self { repository }
    }

    /// Handle a create command.
    ///
    /// The first year of a school always becomes its default, so a
    /// configured school is immediately resolvable. For later years,
    /// `make_default` runs the atomic set-current after the insert; the
    /// invariant of at most one default holds throughout.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name or bounds are invalid
    pub async fn handle(&self, cmd: CreateYearCommand) -> Result<CreateYearResult, AcademicYearError> {
        let draft = NewAcademicYear::new(cmd.school_id, cmd.name, cmd.starts_on, cmd.ends_on)?;

        let first_for_school = self.repository.count_by_school(cmd.school_id).await? == 0;
        let draft = if first_for_school {
            draft.as_current()
        } else {
            draft
        };

        let year = self.repository.create(&draft).await?;
        tracing::info!(
            school_id = %cmd.school_id,
            year_id = %year.id(),
            name = %year.name(),
            "academic year created"
        );

        if cmd.make_default && !first_for_school {
            self.repository
                .set_current(cmd.school_id, year.id())
                .await?;
            // Re-read so the returned aggregate carries the new flag.
            if let Some(refreshed) = self
                .repository
                .find_by_id(cmd.school_id, year.id())
                .await?
            {
                return Ok(CreateYearResult { year: refreshed });
            }
        }

        Ok(CreateYearResult { year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAcademicYearRepository;
    use crate::domain::foundation::AcademicYearId;

    fn school() -> SchoolId {
        SchoolId::new(10)
    }

    fn cmd(name: &str, make_default: bool) -> CreateYearCommand {
        CreateYearCommand {
            school_id: school(),
            name: name.to_string(),
            starts_on: None,
            ends_on: None,
            make_default,
        }
    }

    #[tokio::test]
    async fn first_year_becomes_the_default() {
        let repo = Arc::new(InMemoryAcademicYearRepository::new());
        let handler = CreateYearHandler::new(repo.clone());

        let result = handler.handle(cmd("2023-24", false)).await.unwrap();

        assert!(result.year.is_current());
        assert_eq!(repo.current_of(school()), Some(result.year.id()));
    }

    #[tokio::test]
    async fn later_year_is_not_default_unless_requested() {
        let repo = Arc::new(InMemoryAcademicYearRepository::new());
        let handler = CreateYearHandler::new(repo.clone());

        let first = handler.handle(cmd("2023-24", false)).await.unwrap();
        let second = handler.handle(cmd("2024-25", false)).await.unwrap();

        assert!(!second.year.is_current());
        assert_eq!(repo.current_of(school()), Some(first.year.id()));
    }

    #[tokio::test]
    async fn make_default_retargets_the_tenant_default() {
        let repo = Arc::new(InMemoryAcademicYearRepository::new());
        let handler = CreateYearHandler::new(repo.clone());

        handler.handle(cmd("2023-24", false)).await.unwrap();
        let second = handler.handle(cmd("2024-25", true)).await.unwrap();

        assert!(second.year.is_current());
        assert_eq!(repo.current_of(school()), Some(second.year.id()));
        assert_eq!(repo.year_count(school()), 2);
    }

    #[tokio::test]
    async fn rejects_invalid_name() {
        let repo = Arc::new(InMemoryAcademicYearRepository::new());
        let handler = CreateYearHandler::new(repo.clone());

        let result = handler.handle(cmd("  ", false)).await;

        assert!(matches!(
            result,
            Err(AcademicYearError::ValidationFailed { .. })
        ));
        assert_eq!(repo.year_count(school()), 0);
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let repo = Arc::new(InMemoryAcademicYearRepository::new());
        let handler = CreateYearHandler::new(repo);

        let first = handler.handle(cmd("2023-24", false)).await.unwrap();
        let second = handler.handle(cmd("2024-25", false)).await.unwrap();

        assert!(first.year.id() < second.year.id());
        assert_ne!(first.year.id(), AcademicYearId::new(0));
    }
}
