//! In-memory adapters for testing and local development.

mod academic_year_repository;

pub use academic_year_repository::InMemoryAcademicYearRepository;
