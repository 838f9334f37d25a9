//! HTTP Backend Client
//!
//! `reqwest` implementation of [`BackendApi`]. One pooled client per
//! process; every call carries the configured timeouts.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::application::config::BackendConfig;
use crate::domain::backend::BackendApi;
use crate::domain::entity::{AuthUser, Credentials, Profile};
use crate::domain::value_object::AccessToken;
use crate::error::{AccountError, AccountResult, BackendError, BackendResult};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Wire payloads
// ============================================================================

#[derive(Serialize)]
struct LoginPayload<'a> {
    #[serde(rename = "Correo")]
    correo: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "Email", alias = "email")]
    email: String,
    #[serde(rename = "Nombre", alias = "nombre", default)]
    nombre: String,
    #[serde(rename = "AccessToken", alias = "accessToken")]
    access_token: String,
    #[serde(rename = "Rol", alias = "rol", default)]
    rol: String,
}

impl TryFrom<LoginResponse> for AuthUser {
    type Error = BackendError;

    fn try_from(response: LoginResponse) -> Result<Self, Self::Error> {
        if response.access_token.is_empty() {
            return Err(BackendError::Decode(
                "login response carries an empty access token".to_string(),
            ));
        }

        Ok(AuthUser {
            email: response.email,
            display_name: response.nombre,
            access_token: AccessToken::new(response.access_token),
            role: response.rol,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

/// Backend client over HTTP
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> AccountResult<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(AccountError::Internal(format!(
                "backend URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AccountError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded on its own
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn call<T>(&self, endpoint: &'static str, request: RequestBuilder) -> BackendResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let result = match request.send().await {
            Ok(response) => read_json(endpoint, response).await,
            Err(e) => Err(BackendError::from(e)),
        };

        if let Err(e) = &result {
            tracing::error!(endpoint, error = %e, "Backend call failed");
        }

        result
    }
}

/// Non-2xx is an answer (`Ok(None)`); an undecodable 2xx body is not.
async fn read_json<T>(endpoint: &'static str, response: reqwest::Response) -> BackendResult<Option<T>>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(endpoint, status = status.as_u16(), "Backend rejected request");
        return Ok(None);
    }

    let body = response.bytes().await?;
    let value = serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))?;

    tracing::debug!(endpoint, status = status.as_u16(), "Backend call succeeded");

    Ok(Some(value))
}

// ============================================================================
// BackendApi Implementation
// ============================================================================

impl BackendApi for HttpBackend {
    async fn authenticate(&self, credentials: &Credentials) -> BackendResult<Option<AuthUser>> {
        let payload = LoginPayload {
            correo: credentials.email.as_str(),
            password: credentials.password(),
        };

        let request = self.client.post(self.endpoint(&["login"])).json(&payload);

        match self.call::<LoginResponse>("login", request).await? {
            Some(response) => AuthUser::try_from(response).map(Some).inspect_err(|e| {
                tracing::error!(endpoint = "login", error = %e, "Backend call failed");
            }),
            None => Ok(None),
        }
    }

    async fn fetch_profile(
        &self,
        email: &str,
        token: &AccessToken,
    ) -> BackendResult<Option<Profile>> {
        let request = self
            .client
            .get(self.endpoint(&["home", email]))
            .bearer_auth(token.as_str());

        self.call("home/{email}", request).await
    }

    async fn fetch_all_profiles(&self, token: &AccessToken) -> BackendResult<Option<Vec<Profile>>> {
        let request = self
            .client
            .get(self.endpoint(&["home"]))
            .bearer_auth(token.as_str());

        self.call("home", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::Email;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::time::Duration;

    async fn login(Json(body): Json<Value>) -> axum::response::Response {
        if body["Correo"] == "a@x.com" && body["Password"] == "good" {
            Json(json!({
                "Email": "a@x.com",
                "Nombre": "Ann",
                "AccessToken": "tok123",
                "Rol": "user"
            }))
            .into_response()
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    }

    async fn profile(Path(email): Path<String>, headers: HeaderMap) -> Json<Value> {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Json(json!({ "Email": email, "Authorization": authorization }))
    }

    async fn listing() -> Json<Value> {
        Json(json!([{ "Email": "a@x.com" }, { "Email": "b@x.com" }]))
    }

    fn stub_router() -> Router {
        Router::new()
            .route("/api/login", post(login))
            .route("/api/home", get(listing))
            .route("/api/home/{email}", get(profile))
    }

    async fn spawn(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/api/")).unwrap()
    }

    fn backend(base_url: Url) -> HttpBackend {
        HttpBackend::new(&BackendConfig::new(base_url)).unwrap()
    }

    fn credentials(password: &str) -> Credentials {
        Credentials::new(Email::new("a@x.com").unwrap(), password)
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let backend = backend(Url::parse("http://backend.local/api").unwrap());
        assert_eq!(backend.endpoint(&["login"]).path(), "/api/login");
        assert_eq!(
            backend.endpoint(&["home", "a/b@x.com"]).path(),
            "/api/home/a%2Fb@x.com"
        );

        let at_root = self::backend(Url::parse("http://backend.local/").unwrap());
        assert_eq!(at_root.endpoint(&["home"]).path(), "/home");
    }

    #[test]
    fn test_rejects_non_base_url() {
        let config = BackendConfig::new(Url::parse("mailto:ops@x.com").unwrap());
        assert!(HttpBackend::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let backend = backend(spawn(stub_router()).await);

        let user = backend
            .authenticate(&credentials("good"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.display_name, "Ann");
        assert_eq!(user.access_token.as_str(), "tok123");
        assert_eq!(user.role, "user");
    }

    #[tokio::test]
    async fn test_authenticate_rejected() {
        let backend = backend(spawn(stub_router()).await);
        let result = backend.authenticate(&credentials("bad")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fetch_profile_sends_bearer() {
        let backend = backend(spawn(stub_router()).await);

        let profile = backend
            .fetch_profile("a@x.com", &AccessToken::new("tok123"))
            .await
            .unwrap()
            .unwrap();

        let profile = serde_json::to_value(&profile).unwrap();
        assert_eq!(profile["Authorization"], "Bearer tok123");
        assert_eq!(profile["Email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_fetch_all_profiles() {
        let backend = backend(spawn(stub_router()).await);

        let profiles = backend
            .fetch_all_profiles(&AccessToken::new("tok123"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(profiles.len(), 2);
    }

    #[tokio::test]
    async fn test_timeout() {
        let router = Router::new().route(
            "/api/login",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                StatusCode::OK
            }),
        );
        let mut config = BackendConfig::new(spawn(router).await);
        config.timeout = Duration::from_millis(200);
        let backend = HttpBackend::new(&config).unwrap();

        let err = backend.authenticate(&credentials("good")).await.unwrap_err();
        assert_eq!(err, BackendError::Timeout);
    }

    #[tokio::test]
    async fn test_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = backend(Url::parse(&format!("http://{addr}/")).unwrap());
        let err = backend.authenticate(&credentials("good")).await.unwrap_err();
        assert!(matches!(err, BackendError::Unreachable(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let router = Router::new()
            .route("/api/login", post(|| async { "not json" }))
            .route(
                "/api/home",
                get(|| async { Json(json!({ "not": "a list" })) }),
            );
        let backend = backend(spawn(router).await);

        let err = backend.authenticate(&credentials("good")).await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)), "{err:?}");

        let err = backend
            .fetch_all_profiles(&AccessToken::new("tok123"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_empty_token_is_malformed() {
        let router = Router::new().route(
            "/api/login",
            post(|| async {
                Json(json!({ "Email": "a@x.com", "Nombre": "Ann", "AccessToken": "", "Rol": "user" }))
            }),
        );
        let backend = backend(spawn(router).await);

        let err = backend.authenticate(&credentials("good")).await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_camel_case_response() {
        let router = Router::new().route(
            "/api/login",
            post(|| async {
                Json(json!({ "email": "a@x.com", "nombre": "Ann", "accessToken": "tok123", "rol": "user" }))
            }),
        );
        let backend = backend(spawn(router).await);

        let user = backend
            .authenticate(&credentials("good"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.access_token.as_str(), "tok123");
    }
}
