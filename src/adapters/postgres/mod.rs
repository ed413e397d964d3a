//! PostgreSQL adapters - production persistence implementations.

mod academic_year_repository;

pub use academic_year_repository::PostgresAcademicYearRepository;
