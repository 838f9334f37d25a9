//! HTTP Handlers

use axum::Extension;
use axum::extract::{ConnectInfo, Form, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::net::SocketAddr;
use std::sync::Arc;

use platform::client::{extract_client_ip, extract_user_agent};

use crate::application::config::AccountConfig;
use crate::application::{
    AntiForgery, ListProfilesUseCase, SessionManager, SignInInput, SignInUseCase,
    ViewProfileUseCase,
};
use crate::domain::backend::BackendApi;
use crate::domain::entity::{ClaimName, SessionClaims};
use crate::error::AccountResult;
use crate::presentation::dto::{LoginForm, ReturnUrlQuery};
use crate::presentation::router::{LANDING_PATH, LOGIN_PATH};
use crate::presentation::views::{
    AccessDeniedPage, HomePage, LoginPage, ProfilePage, render,
};

/// The one message a failed sign in shows, whatever the cause
pub const SIGN_IN_FAILED: &str = "Invalid credentials. Please try again.";

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<B>
where
    B: BackendApi + Clone + Send + Sync + 'static,
{
    pub backend: Arc<B>,
    pub config: Arc<AccountConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// GET /account/login
pub async fn login_form<B>(
    State(state): State<AccountAppState<B>>,
    headers: HeaderMap,
    Query(query): Query<ReturnUrlQuery>,
) -> AccountResult<Response>
where
    B: BackendApi + Clone + Send + Sync + 'static,
{
    let (csrf_token, csrf_cookie) = AntiForgery::new(state.config.clone()).issue(&headers);
    let return_url = query.return_url().map(|url| url.to_string());

    let page = render(&LoginPage::new(csrf_token, return_url))?;

    Ok(([(header::SET_COOKIE, csrf_cookie)], page).into_response())
}

/// POST /account/login
pub async fn login_submit<B>(
    State(state): State<AccountAppState<B>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Form(form): Form<LoginForm>,
) -> AccountResult<Response>
where
    B: BackendApi + Clone + Send + Sync + 'static,
{
    AntiForgery::new(state.config.clone()).verify(&headers, &form.csrf_token)?;

    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let return_url = form.return_url();

    // Redisplayed form keeps the email and the anti-forgery token, never the password
    let page = LoginPage::new(
        form.csrf_token.clone(),
        return_url.as_ref().map(|url| url.to_string()),
    )
    .with_email(form.email.trim());

    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            return Ok(render(&page.with_field_errors(errors))?.into_response());
        }
    };

    let use_case = SignInUseCase::new(state.backend.clone());

    match use_case.execute(SignInInput { credentials }).await {
        Ok(output) => {
            let cookie = SessionManager::new(state.config.clone()).establish(&output.claims)?;
            let target = return_url
                .map(|url| url.as_str().to_owned())
                .unwrap_or_else(|| LANDING_PATH.to_owned());

            tracing::info!(
                client_ip = ?client_ip,
                user_agent = extract_user_agent(&headers).unwrap_or("-"),
                "Session established"
            );

            Ok(([(header::SET_COOKIE, cookie)], Redirect::to(&target)).into_response())
        }
        Err(e) if e.is_sign_in_failure() => {
            tracing::warn!(client_ip = ?client_ip, error = %e, "Sign in failed");
            Ok(render(&page.with_error(SIGN_IN_FAILED))?.into_response())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Profile / Home (behind the session gate)
// ============================================================================

/// GET /account/profile
pub async fn profile<B>(
    State(state): State<AccountAppState<B>>,
    Extension(claims): Extension<SessionClaims>,
) -> AccountResult<Html<String>>
where
    B: BackendApi + Clone + Send + Sync + 'static,
{
    let profile = ViewProfileUseCase::new(state.backend.clone())
        .execute(&claims)
        .await;

    render(&ProfilePage::new(&claims, profile))
}

/// GET /
pub async fn home<B>(
    State(state): State<AccountAppState<B>>,
    Extension(claims): Extension<SessionClaims>,
) -> AccountResult<Html<String>>
where
    B: BackendApi + Clone + Send + Sync + 'static,
{
    let profiles = ListProfilesUseCase::new(state.backend.clone())
        .execute(&claims)
        .await;

    render(&HomePage::new(&claims, profiles))
}

// ============================================================================
// Logout
// ============================================================================

/// GET|POST /account/logout
///
/// Always clears the session. Only a local `returnUrl` is honoured.
pub async fn logout<B>(
    State(state): State<AccountAppState<B>>,
    Query(query): Query<ReturnUrlQuery>,
) -> Response
where
    B: BackendApi + Clone + Send + Sync + 'static,
{
    let cookie = SessionManager::new(state.config.clone()).end();

    let target = match query.return_url() {
        Some(url) => url.as_str().to_owned(),
        None => {
            if let Some(rejected) = query.return_url.as_deref().filter(|raw| !raw.is_empty()) {
                tracing::warn!(return_url = rejected, "Ignoring non-local return URL");
            }
            LOGIN_PATH.to_owned()
        }
    };

    ([(header::SET_COOKIE, cookie)], Redirect::to(&target)).into_response()
}

// ============================================================================
// Access denied
// ============================================================================

/// GET /account/access-denied
pub async fn access_denied<B>(
    State(state): State<AccountAppState<B>>,
    headers: HeaderMap,
) -> AccountResult<Response>
where
    B: BackendApi + Clone + Send + Sync + 'static,
{
    let signed_in_as =
        SessionManager::new(state.config.clone()).current_claim(&headers, ClaimName::Email);

    let page = render(&AccessDeniedPage::new(signed_in_as))?;

    Ok((StatusCode::FORBIDDEN, page).into_response())
}
