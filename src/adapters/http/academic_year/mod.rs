//! HTTP adapter for academic year endpoints.

pub mod cookie;
mod dto;
mod handlers;
mod routes;

pub use cookie::CookieSettings;
pub use dto::{
    ActiveYearResponse, CreateYearRequest, ErrorResponse, SwitchYearRequest, SwitchYearResponse,
    YearListResponse, YearResponse,
};
pub use handlers::AcademicYearHandlers;
pub use routes::academic_year_routes;
