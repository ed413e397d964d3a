//! ListYearsHandler - query handler for a school's academic years.

use std::sync::Arc;

use crate::domain::academic_year::{AcademicYear, AcademicYearError};
use crate::domain::foundation::SchoolId;
use crate::ports::AcademicYearRepository;

/// Query for a school's academic years.
#[derive(Debug, Clone)]
pub struct ListYearsQuery {
    pub school_id: SchoolId,
}

/// Handler for listing academic years.
pub struct ListYearsHandler {
    repository: Arc<dyn AcademicYearRepository>,
}

impl ListYearsHandler {
    pub fn new(repository: Arc<dyn AcademicYearRepository>) -> Self {
        Self { repository }
    }

    /// List the school's years, newest first.
    ///
    /// An empty list is a valid result: the school has not been set up
    /// yet. Resolution will fail for such a school until a year exists.
    pub async fn handle(&self, query: ListYearsQuery) -> Result<Vec<AcademicYear>, AcademicYearError> {
        Ok(self.repository.list_by_school(query.school_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::academic_year::NewAcademicYear;
    use crate::domain::foundation::{AcademicYearId, DomainError, ErrorCode, Timestamp};
    use async_trait::async_trait;

    struct MockRepository {
        years: Vec<AcademicYear>,
        fail: bool,
    }

    #[async_trait]
    impl AcademicYearRepository for MockRepository {
        async fn create(&self, _draft: &NewAcademicYear) -> Result<AcademicYear, DomainError> {
            unimplemented!()
        }

        async fn find_by_id(
            &self,
            _school_id: SchoolId,
            _year_id: AcademicYearId,
        ) -> Result<Option<AcademicYear>, DomainError> {
            Ok(None)
        }

        async fn find_current(
            &self,
            _school_id: SchoolId,
        ) -> Result<Option<AcademicYear>, DomainError> {
            Ok(None)
        }

        async fn list_by_school(
            &self,
            _school_id: SchoolId,
        ) -> Result<Vec<AcademicYear>, DomainError> {
            if self.fail {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated list failure",
                ));
            }
            Ok(self.years.clone())
        }

        async fn count_by_school(&self, _school_id: SchoolId) -> Result<u32, DomainError> {
            Ok(self.years.len() as u32)
        }

        async fn set_current(
            &self,
            _school_id: SchoolId,
            _year_id: AcademicYearId,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn delete(
            &self,
            _school_id: SchoolId,
            _year_id: AcademicYearId,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn year(id: i64, name: &str) -> AcademicYear {
        AcademicYear::reconstitute(
            AcademicYearId::new(id),
            SchoolId::new(10),
            name.to_string(),
            false,
            None,
            None,
            Timestamp::now(),
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn returns_the_schools_years() {
        let repo = Arc::new(MockRepository {
            years: vec![year(2, "2024-25"), year(1, "2023-24")],
            fail: false,
        });
        let handler = ListYearsHandler::new(repo);

        let years = handler
            .handle(ListYearsQuery {
                school_id: SchoolId::new(10),
            })
            .await
            .unwrap();

        assert_eq!(years.len(), 2);
        assert_eq!(years[0].name(), "2024-25");
    }

    #[tokio::test]
    async fn empty_school_yields_empty_list() {
        let repo = Arc::new(MockRepository {
            years: vec![],
            fail: false,
        });
        let handler = ListYearsHandler::new(repo);

        let years = handler
            .handle(ListYearsQuery {
                school_id: SchoolId::new(10),
            })
            .await
            .unwrap();

        assert!(years.is_empty());
    }

    #[tokio::test]
    async fn propagates_store_failures() {
        let repo = Arc::new(MockRepository {
            years: vec![],
            fail: true,
        });
        let handler = ListYearsHandler::new(repo);

        let result = handler
            .handle(ListYearsQuery {
                school_id: SchoolId::new(10),
            })
            .await;

        assert!(matches!(result, Err(AcademicYearError::Infrastructure(_))));
    }
}
