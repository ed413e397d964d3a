//! PostgreSQL implementation of AcademicYearRepository.
//!
//! Persists academic years to PostgreSQL. The set-current toggle runs
//! inside a single transaction so the one-default-per-school invariant
//! holds at every observable point; a partial unique index on
//! `(school_id) WHERE is_current` backs it up at the schema level.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::academic_year::{AcademicYear, NewAcademicYear};
use crate::domain::foundation::{AcademicYearId, DomainError, ErrorCode, SchoolId, Timestamp};
use crate::ports::AcademicYearRepository;

/// PostgreSQL implementation of AcademicYearRepository.
#[derive(Clone)]
pub struct PostgresAcademicYearRepository {
    pool: PgPool,
}

impl PostgresAcademicYearRepository {
    /// Creates a new PostgresAcademicYearRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AcademicYearRepository for PostgresAcademicYearRepository {
    async fn create(&self, draft: &NewAcademicYear) -> Result<AcademicYear, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO academic_years (
                school_id, name, is_current, starts_on, ends_on
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING id, school_id, name, is_current, starts_on, ends_on,
                      created_at, updated_at
            "#,
        )
        .bind(draft.school_id().as_i64())
        .bind(draft.name())
        .bind(draft.is_current())
        .bind(draft.starts_on())
        .bind(draft.ends_on())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert academic year: {}", e),
            )
        })?;

        row_to_year(row)
    }

    async fn find_by_id(
        &self,
        school_id: SchoolId,
        year_id: AcademicYearId,
    ) -> Result<Option<AcademicYear>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, school_id, name, is_current, starts_on, ends_on,
                   created_at, updated_at
            FROM academic_years
            WHERE school_id = $1 AND id = $2
            "#,
        )
        .bind(school_id.as_i64())
        .bind(year_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch academic year: {}", e),
            )
        })?;

        row.map(row_to_year).transpose()
    }

    async fn find_current(&self, school_id: SchoolId) -> Result<Option<AcademicYear>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, school_id, name, is_current, starts_on, ends_on,
                   created_at, updated_at
            FROM academic_years
            WHERE school_id = $1 AND is_current
            "#,
        )
        .bind(school_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch current academic year: {}", e),
            )
        })?;

        row.map(row_to_year).transpose()
    }

    async fn list_by_school(&self, school_id: SchoolId) -> Result<Vec<AcademicYear>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, school_id, name, is_current, starts_on, ends_on,
                   created_at, updated_at
            FROM academic_years
            WHERE school_id = $1
            ORDER BY starts_on DESC NULLS LAST, id DESC
            "#,
        )
        .bind(school_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list academic years: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_year).collect()
    }

    async fn count_by_school(&self, school_id: SchoolId) -> Result<u32, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM academic_years WHERE school_id = $1")
                .bind(school_id.as_i64())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to count academic years: {}", e),
                    )
                })?;

        Ok(result.0 as u32)
    }

    async fn set_current(
        &self,
        school_id: SchoolId,
        year_id: AcademicYearId,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        // Clear first: the partial unique index would reject two rows
        // with the flag inside the same school.
        sqlx::query(
            "UPDATE academic_years SET is_current = FALSE, updated_at = now()
             WHERE school_id = $1 AND is_current AND id <> $2",
        )
        .bind(school_id.as_i64())
        .bind(year_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to clear current academic year: {}", e),
            )
        })?;

        let result = sqlx::query(
            "UPDATE academic_years SET is_current = TRUE, updated_at = now()
             WHERE school_id = $1 AND id = $2",
        )
        .bind(school_id.as_i64())
        .bind(year_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to set current academic year: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            // Target not in the school's set; the rollback restores the
            // previous default.
            tx.rollback().await.map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to roll back transaction: {}", e),
                )
            })?;
            return Err(DomainError::new(
                ErrorCode::AcademicYearNotFound,
                format!("Academic year not found: {}", year_id),
            ));
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })?;

        Ok(())
    }

    async fn delete(
        &self,
        school_id: SchoolId,
        year_id: AcademicYearId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM academic_years WHERE school_id = $1 AND id = $2")
            .bind(school_id.as_i64())
            .bind(year_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete academic year: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AcademicYearNotFound,
                format!("Academic year not found: {}", year_id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_year(row: sqlx::postgres::PgRow) -> Result<AcademicYear, DomainError> {
    let id: i64 = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let school_id: i64 = row.try_get("school_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get school_id: {}", e),
        )
    })?;

    let name: String = row.try_get("name").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get name: {}", e),
        )
    })?;

    let is_current: bool = row.try_get("is_current").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get is_current: {}", e),
        )
    })?;

    let starts_on: Option<chrono::NaiveDate> = row.try_get("starts_on").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get starts_on: {}", e),
        )
    })?;

    let ends_on: Option<chrono::NaiveDate> = row.try_get("ends_on").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get ends_on: {}", e),
        )
    })?;

    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get created_at: {}", e),
        )
    })?;

    let updated_at: chrono::DateTime<chrono::Utc> = row.try_get("updated_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get updated_at: {}", e),
        )
    })?;

    Ok(AcademicYear::reconstitute(
        AcademicYearId::new(id),
        SchoolId::new(school_id),
        name,
        is_current,
        starts_on,
        ends_on,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
