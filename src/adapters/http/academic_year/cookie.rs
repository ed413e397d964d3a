//! Session-selection cookie codec.
//!
//! The only place the selection cookie is read or written. Resolution
//! logic receives the parsed selection as a plain value and never
//! touches headers, which keeps the handlers unit-testable without any
//! HTTP machinery.

use axum::http::{header, HeaderMap};
use cookie::{Cookie, SameSite};

use crate::config::SessionConfig;
use crate::domain::academic_year::SessionYearSelection;
use crate::domain::foundation::AcademicYearId;

/// Attributes of the session year selection cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_days: i64,
    pub secure: bool,
}

impl CookieSettings {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            max_age_days: config.cookie_max_age_days,
            secure: config.cookie_secure,
        }
    }
}

/// Parse the session selection out of the request's Cookie header.
///
/// A missing header, missing cookie, or syntactically invalid value all
/// yield `None`; resolution then falls back to the tenant default.
pub fn session_selection(headers: &HeaderMap, cookie_name: &str) -> Option<SessionYearSelection> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    Cookie::split_parse(raw.to_string())
        .filter_map(Result::ok)
        .find(|c| c.name() == cookie_name)
        .and_then(|c| c.value().parse().ok())
}

/// Build the Set-Cookie value that pins the calling session to `year_id`.
pub fn selection_cookie(settings: &CookieSettings, year_id: AcademicYearId) -> String {
    let mut builder = Cookie::build(settings.name.clone(), year_id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::days(settings.max_age_days));
    if settings.secure {
        builder = builder.secure(true);
    }
    builder.finish().to_string()
}
