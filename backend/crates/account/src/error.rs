//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system, plus the transport
//! taxonomy of the backend client.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::presentation::views::{ErrorPage, render};

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Backend client result type alias
pub type BackendResult<T> = Result<T, BackendError>;

/// Why a backend call produced no usable answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No answer within the configured timeout
    #[error("Backend request timed out")]
    Timeout,

    /// Connection refused, DNS failure, TLS failure
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// 2xx answer whose body could not be read as the expected JSON
    #[error("Malformed backend response: {0}")]
    Decode(String),

    /// Anything else the HTTP client reported
    #[error("Backend transport error: {0}")]
    Transport(String),
}

impl BackendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::Timeout => ErrorKind::GatewayTimeout,
            BackendError::Unreachable(_) => ErrorKind::ServiceUnavailable,
            BackendError::Decode(_) | BackendError::Transport(_) => ErrorKind::BadGateway,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::Unreachable(err.to_string())
        } else if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Backend answered the login with a non-success status
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Backend gave no usable answer
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Session cookie failed signature or format checks
    #[error("Session not found or invalid")]
    SessionInvalid,

    /// Session cookie is past its expiry
    #[error("Session expired")]
    SessionExpired,

    /// Anti-forgery token missing or not matching its cookie
    #[error("Anti-forgery token missing or invalid")]
    AntiForgery,

    /// Template rendering failed
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::InvalidCredentials
            | AccountError::SessionInvalid
            | AccountError::SessionExpired => ErrorKind::Unauthorized,
            AccountError::Backend(e) => e.kind(),
            AccountError::AntiForgery => ErrorKind::BadRequest,
            AccountError::Template(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Failures the login form reports with the single generic message
    pub fn is_sign_in_failure(&self) -> bool {
        matches!(
            self,
            AccountError::InvalidCredentials | AccountError::Backend(_)
        )
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let app_error = AppError::new(self.kind(), self.public_message());
        match self {
            AccountError::SessionInvalid | AccountError::SessionExpired => {
                app_error.with_action("Please sign in again")
            }
            AccountError::AntiForgery => app_error.with_action("Reload the page and try again"),
            _ => app_error,
        }
    }

    /// Message shown to end users; internals stay in the logs
    fn public_message(&self) -> String {
        match self {
            AccountError::Backend(_) => "The service is temporarily unavailable".to_string(),
            AccountError::Template(_) | AccountError::Internal(_) => {
                "Something went wrong".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        let kind = self.kind();

        if kind.is_upstream_error() {
            tracing::error!(error = %self, kind = %kind, "Backend call failed");
        } else if kind.is_server_error() {
            tracing::error!(error = %self, "Account internal error");
        } else {
            match self {
                AccountError::InvalidCredentials => {
                    tracing::warn!("Invalid login attempt");
                }
                AccountError::AntiForgery => {
                    tracing::warn!("Anti-forgery validation failed");
                }
                _ => {
                    tracing::debug!(error = %self, "Account error");
                }
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let page = ErrorPage::from(&self.to_app_error());

        match render(&page) {
            Ok(html) => (status, html).into_response(),
            Err(_) => (status, Html(status.to_string())).into_response(),
        }
    }
}

impl From<serde_json::Error> for AccountError {
    fn from(err: serde_json::Error) -> Self {
        AccountError::Internal(AppError::from(err).to_string())
    }
}
