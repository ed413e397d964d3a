//! HTTP routes for academic year endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_year, get_active_year, list_years, switch_year, AcademicYearHandlers,
};

/// Creates the academic year router with all endpoints.
///
/// Meant to be nested under a path that captures `:school_id`.
pub fn academic_year_routes(handlers: AcademicYearHandlers) -> Router {
    Router::new()
        .route("/", get(list_years))
        .route("/", post(create_year))
        .route("/active", get(get_active_year))
        .route("/switch", post(switch_year))
        .with_state(handlers)
}
