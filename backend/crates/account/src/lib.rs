//! Account Front-end Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, the backend API trait
//! - `application/` - Use cases, session and anti-forgery services
//! - `infra/` - HTTP client for the backend API
//! - `presentation/` - HTTP handlers, forms, views, router
//!
//! ## Features
//! - Login against a remote backend that issues a bearer token
//! - Cookie sessions carrying the backend token and identity claims
//! - Profile page and user listing fetched with the session's token
//! - Logout with local-only return URLs
//!
//! ## Security Model
//! - The session cookie is HMAC-SHA256 signed and carries its own expiry
//! - The backend token is opaque here: stored and replayed, never inspected
//! - Login form protected by a double-submit anti-forgery token
//! - Every sign in failure shows the same message; causes go to the log

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AccountConfig, BackendConfig};
pub use error::{AccountError, AccountResult, BackendError, BackendResult};
pub use infra::http_backend::HttpBackend;
pub use presentation::router::{account_router, account_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
