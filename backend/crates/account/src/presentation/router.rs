//! Account Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::get,
};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::backend::BackendApi;
use crate::infra::http_backend::HttpBackend;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::{require_role, require_session};

pub const LOGIN_PATH: &str = "/account/login";
pub const LOGOUT_PATH: &str = "/account/logout";
pub const PROFILE_PATH: &str = "/account/profile";
pub const ACCESS_DENIED_PATH: &str = "/account/access-denied";
pub const LANDING_PATH: &str = "/";

/// Create the account router backed by the HTTP backend client
pub fn account_router(backend: HttpBackend, config: AccountConfig) -> Router {
    account_router_generic(backend, config)
}

/// Create an account router for any backend implementation
pub fn account_router_generic<B>(backend: B, config: AccountConfig) -> Router
where
    B: BackendApi + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let state = AccountAppState {
        backend: Arc::new(backend),
        config: config.clone(),
    };

    let profile = Router::new()
        .route(PROFILE_PATH, get(handlers::profile::<B>))
        .route_layer(from_fn_with_state(config.clone(), require_session));

    // Outermost layer runs first: session, then role
    let landing = Router::new()
        .route(LANDING_PATH, get(handlers::home::<B>))
        .route_layer(from_fn_with_state(config.clone(), require_role))
        .route_layer(from_fn_with_state(config, require_session));

    Router::new()
        .route(
            LOGIN_PATH,
            get(handlers::login_form::<B>).post(handlers::login_submit::<B>),
        )
        .route(
            LOGOUT_PATH,
            get(handlers::logout::<B>).post(handlers::logout::<B>),
        )
        .route(ACCESS_DENIED_PATH, get(handlers::access_denied::<B>))
        .merge(profile)
        .merge(landing)
        .with_state(state)
}
