//! Account Middleware
//!
//! Session and role gates for protected routes. Both answer with redirects
//! rather than status codes since the client is a browser.

use axum::extract::{Request, State};
use axum::http::{Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;
use url::form_urlencoded;

use crate::application::config::AccountConfig;
use crate::application::{SessionLookup, SessionManager};
use crate::domain::entity::SessionClaims;
use crate::presentation::router::{ACCESS_DENIED_PATH, LOGIN_PATH};

/// Middleware that requires a valid session
///
/// On success the claims are stored in request extensions for the handler.
/// An anonymous request goes to the login page with a `returnUrl`; an invalid
/// cookie is cleared on the way.
pub async fn require_session(
    State(config): State<Arc<AccountConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let sessions = SessionManager::new(config);

    match sessions.lookup(req.headers()) {
        SessionLookup::Authenticated(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        SessionLookup::Anonymous => login_redirect(req.uri()).into_response(),
        SessionLookup::Invalid(e) => {
            e.log();
            (
                [(header::SET_COOKIE, sessions.end())],
                login_redirect(req.uri()),
            )
                .into_response()
        }
    }
}

/// Middleware that restricts a route to the configured listing roles.
/// Must run after `require_session`.
pub async fn require_role(
    State(config): State<Arc<AccountConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let allowed = req
        .extensions()
        .get::<SessionClaims>()
        .is_some_and(|claims| config.allows_listing(&claims.role));

    if !allowed {
        tracing::warn!(path = %req.uri().path(), "Role not allowed");
        return Redirect::to(ACCESS_DENIED_PATH).into_response();
    }

    next.run(req).await
}

fn login_redirect(uri: &Uri) -> Redirect {
    let return_url = uri.path_and_query().map_or("/", |pq| pq.as_str());
    let encoded: String = form_urlencoded::byte_serialize(return_url.as_bytes()).collect();
    Redirect::to(&format!("{LOGIN_PATH}?returnUrl={encoded}"))
}
