//! HTML views
//!
//! Askama templates under `templates/`. Each page struct carries exactly what
//! its template prints; the base layout owns the shared chrome and shows the
//! navigation only when `signed_in` is set.

use askama::Template;
use axum::response::Html;
use kernel::error::app_error::AppError;

use crate::domain::entity::{Profile, ProfileField, SessionClaims};
use crate::error::AccountResult;
use crate::presentation::dto::LoginFormErrors;

/// Render a template into an HTML body
pub fn render(template: &impl Template) -> AccountResult<Html<String>> {
    Ok(Html(template.render()?))
}

// ============================================================================
// Login
// ============================================================================

#[derive(Template, Debug, Default)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub signed_in: bool,
    pub email: String,
    pub csrf_token: String,
    pub return_url: Option<String>,
    /// Form-level message (failed sign in)
    pub error: Option<String>,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
}

impl LoginPage {
    pub fn new(csrf_token: String, return_url: Option<String>) -> Self {
        Self {
            csrf_token,
            return_url,
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn with_field_errors(mut self, errors: LoginFormErrors) -> Self {
        self.email_error = errors.email;
        self.password_error = errors.password;
        self
    }
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Template, Debug)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub signed_in: bool,
    pub display_name: String,
    pub email: String,
    pub fields: Vec<ProfileField>,
}

impl ProfilePage {
    pub fn new(claims: &SessionClaims, profile: Option<Profile>) -> Self {
        Self {
            signed_in: true,
            display_name: claims.display_name.clone(),
            email: claims.email.clone(),
            fields: profile.map(|p| p.fields()).unwrap_or_default(),
        }
    }
}

// ============================================================================
// Home
// ============================================================================

#[derive(Template, Debug)]
#[template(path = "home.html")]
pub struct HomePage {
    pub signed_in: bool,
    pub display_name: String,
    pub rows: Vec<Vec<ProfileField>>,
}

impl HomePage {
    pub fn new(claims: &SessionClaims, profiles: Vec<Profile>) -> Self {
        Self {
            signed_in: true,
            display_name: claims.display_name.clone(),
            rows: profiles.iter().map(Profile::fields).collect(),
        }
    }
}

// ============================================================================
// Access denied / errors
// ============================================================================

#[derive(Template, Debug, Default)]
#[template(path = "access_denied.html")]
pub struct AccessDeniedPage {
    pub signed_in: bool,
    pub signed_in_as: Option<String>,
}

impl AccessDeniedPage {
    pub fn new(signed_in_as: Option<String>) -> Self {
        Self {
            signed_in: signed_in_as.is_some(),
            signed_in_as,
        }
    }
}

#[derive(Template, Debug)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub signed_in: bool,
    pub status: u16,
    pub title: String,
    pub message: String,
    pub action: Option<String>,
}

impl From<&AppError> for ErrorPage {
    fn from(err: &AppError) -> Self {
        Self {
            signed_in: false,
            status: err.status_code(),
            title: err.kind().as_str().to_string(),
            message: err.message().to_string(),
            action: err.action().map(str::to_string),
        }
    }
}
