//! HTTP handlers for academic year endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::academic_year::{
    CreateYearCommand, CreateYearHandler, ListYearsHandler, ListYearsQuery,
    ResolveActiveYearHandler, ResolveActiveYearQuery, SwitchYearCommand, SwitchYearHandler,
};
use crate::domain::academic_year::AcademicYearError;
use crate::domain::foundation::SchoolId;
use crate::ports::AcademicYearRepository;

use super::cookie::{self, CookieSettings};
use super::dto::{
    ActiveYearResponse, CreateYearRequest, ErrorResponse, SwitchYearRequest, SwitchYearResponse,
    YearListResponse, YearResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AcademicYearHandlers {
    resolve_handler: Arc<ResolveActiveYearHandler>,
    switch_handler: Arc<SwitchYearHandler>,
    list_handler: Arc<ListYearsHandler>,
    create_handler: Arc<CreateYearHandler>,
    cookie_settings: CookieSettings,
}

impl AcademicYearHandlers {
    pub fn new(
        resolve_handler: Arc<ResolveActiveYearHandler>,
        switch_handler: Arc<SwitchYearHandler>,
        list_handler: Arc<ListYearsHandler>,
        create_handler: Arc<CreateYearHandler>,
        cookie_settings: CookieSettings,
    ) -> Self {
        Self {
            resolve_handler,
            switch_handler,
            list_handler,
            create_handler,
            cookie_settings,
        }
    }

    /// Wires every handler to the same repository.
    pub fn with_repository(
        repository: Arc<dyn AcademicYearRepository>,
        cookie_settings: CookieSettings,
    ) -> Self {
        Self::new(
            Arc::new(ResolveActiveYearHandler::new(repository.clone())),
            Arc::new(SwitchYearHandler::new(repository.clone())),
            Arc::new(ListYearsHandler::new(repository.clone())),
            Arc::new(CreateYearHandler::new(repository)),
            cookie_settings,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/schools/:school_id/academic-years/active - Resolve the active year
///
/// Reads the session cookie; a read never sets one.
pub async fn get_active_year(
    State(handlers): State<AcademicYearHandlers>,
    Path(school_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let session_selection = cookie::session_selection(&headers, &handlers.cookie_settings.name);

    let query = ResolveActiveYearQuery {
        school_id: SchoolId::new(school_id),
        session_selection,
    };

    match handlers.resolve_handler.handle(query).await {
        Ok(resolved) => {
            let response: ActiveYearResponse = resolved.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_academic_year_error(e),
    }
}

/// POST /api/schools/:school_id/academic-years/switch - Switch the active year
///
/// Always pins the calling session via Set-Cookie; retargets the tenant
/// default only when the request asks for it.
pub async fn switch_year(
    State(handlers): State<AcademicYearHandlers>,
    Path(school_id): Path<i64>,
    Json(req): Json<SwitchYearRequest>,
) -> Response {
    let cmd = SwitchYearCommand {
        school_id: SchoolId::new(school_id),
        raw_year_id: req.year_id,
        set_as_default: req.set_as_default,
    };

    match handlers.switch_handler.handle(cmd).await {
        Ok(result) => {
            let set_cookie = cookie::selection_cookie(&handlers.cookie_settings, result.year_id);
            let response: SwitchYearResponse = result.into();
            (
                StatusCode::OK,
                [(header::SET_COOKIE, set_cookie)],
                Json(response),
            )
                .into_response()
        }
        Err(e) => handle_academic_year_error(e),
    }
}

/// GET /api/schools/:school_id/academic-years - List the school's years
pub async fn list_years(
    State(handlers): State<AcademicYearHandlers>,
    Path(school_id): Path<i64>,
) -> Response {
    let query = ListYearsQuery {
        school_id: SchoolId::new(school_id),
    };

    match handlers.list_handler.handle(query).await {
        Ok(years) => {
            let response: YearListResponse = years.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_academic_year_error(e),
    }
}

/// POST /api/schools/:school_id/academic-years - Create a year
pub async fn create_year(
    State(handlers): State<AcademicYearHandlers>,
    Path(school_id): Path<i64>,
    Json(req): Json<CreateYearRequest>,
) -> Response {
    let cmd = CreateYearCommand {
        school_id: SchoolId::new(school_id),
        name: req.name,
        starts_on: req.starts_on,
        ends_on: req.ends_on,
        make_default: req.make_default,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response: YearResponse = result.year.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_academic_year_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_academic_year_error(error: AcademicYearError) -> Response {
    match error {
        AcademicYearError::NotConfigured(school_id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::year_not_found(format!(
                "School {} has no academic year configured",
                school_id
            ))),
        )
            .into_response(),
        AcademicYearError::NotFound { school_id, year_id } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::year_not_found(format!(
                "Academic year {} not found for school {}",
                year_id, school_id
            ))),
        )
            .into_response(),
        AcademicYearError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        AcademicYearError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "academic year operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(msg)),
            )
                .into_response()
        }
    }
}
