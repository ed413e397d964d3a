//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod academic_year_repository;

pub use academic_year_repository::AcademicYearRepository;
