//! Session cookie configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Session year-selection cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Cookie name carrying the selected academic year id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Cookie lifetime in days
    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: i64,

    /// Whether to mark the cookie Secure (HTTPS only)
    #[serde(default)]
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.cookie_name.trim();
        if name.is_empty()
            || name
                .chars()
                .any(|c| c.is_whitespace() || c == ';' || c == '=' || c == ',')
        {
            return Err(ValidationError::InvalidCookieName);
        }
        if self.cookie_max_age_days < 1 || self.cookie_max_age_days > 365 {
            return Err(ValidationError::InvalidCookieMaxAge);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_max_age_days: default_cookie_max_age_days(),
            cookie_secure: false,
        }
    }
}

fn default_cookie_name() -> String {
    "activeAcademicYearId".to_string()
}

fn default_cookie_max_age_days() -> i64 {
    30
}
