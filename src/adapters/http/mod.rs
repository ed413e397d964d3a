//! HTTP adapters - REST API implementations.

pub mod academic_year;

// Re-export key types for convenience
pub use academic_year::academic_year_routes;
pub use academic_year::AcademicYearHandlers;
