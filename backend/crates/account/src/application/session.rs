//! Session Manager
//!
//! Cookie-only sessions: the signed cookie is the whole session, there is no
//! server-side table. Establishing a session overwrites the previous cookie,
//! ending it sends an expired one.
//!
//! Cookie value: `base64url(json(envelope)) "." base64url(hmac_sha256(payload))`

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue};
use chrono::Utc;
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use serde::{Deserialize, Serialize};

use crate::application::config::AccountConfig;
use crate::domain::entity::{ClaimName, SessionClaims};
use crate::error::{AccountError, AccountResult};

/// What the cookie signs
#[derive(Debug, Serialize, Deserialize)]
struct SessionEnvelope {
    claims: SessionClaims,
    issued_at_ms: i64,
    expires_at_ms: i64,
}

/// Result of reading the session cookie off a request
#[derive(Debug)]
pub enum SessionLookup {
    /// No session cookie at all
    Anonymous,
    /// Valid, unexpired session
    Authenticated(SessionClaims),
    /// Cookie present but unusable; it should be cleared
    Invalid(AccountError),
}

/// Session manager
pub struct SessionManager {
    config: Arc<AccountConfig>,
}

impl SessionManager {
    pub fn new(config: Arc<AccountConfig>) -> Self {
        Self { config }
    }

    /// Start a new session carrying `claims`, returned as a Set-Cookie value
    pub fn establish(&self, claims: &SessionClaims) -> AccountResult<HeaderValue> {
        let token = self.seal(claims, Utc::now().timestamp_millis())?;
        Ok(set_cookie_header(&self.config.session_cookie(), &token))
    }

    /// Set-Cookie value that ends the session. Safe to send any number of times.
    pub fn end(&self) -> HeaderValue {
        delete_cookie_header(&self.config.session_cookie())
    }

    /// Read the session off the request
    pub fn lookup(&self, headers: &HeaderMap) -> SessionLookup {
        let Some(token) = extract_cookie(headers, &self.config.session_cookie_name) else {
            return SessionLookup::Anonymous;
        };

        // A browser that was sent the deletion cookie may still echo an empty value
        if token.is_empty() {
            return SessionLookup::Anonymous;
        }

        match self.open(&token, Utc::now().timestamp_millis()) {
            Ok(claims) => SessionLookup::Authenticated(claims),
            Err(e) => SessionLookup::Invalid(e),
        }
    }

    /// Claims of the current session, if any
    pub fn current(&self, headers: &HeaderMap) -> Option<SessionClaims> {
        match self.lookup(headers) {
            SessionLookup::Authenticated(claims) => Some(claims),
            _ => None,
        }
    }

    /// One claim of the current session, if any
    pub fn current_claim(&self, headers: &HeaderMap, name: ClaimName) -> Option<String> {
        let value = self
            .current(headers)
            .map(|claims| claims.get(name).to_string());

        if value.is_none() {
            tracing::debug!(claim = %name, "No session to read claim from");
        }

        value
    }

    /// Sign the claims into a cookie value
    pub fn seal(&self, claims: &SessionClaims, now_ms: i64) -> AccountResult<String> {
        let envelope = SessionEnvelope {
            claims: claims.clone(),
            issued_at_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(self.config.session_ttl_ms()),
        };

        let payload = to_base64url(&serde_json::to_vec(&envelope)?);
        let signature = hmac_sha256(&self.config.session_secret, payload.as_bytes());

        Ok(format!("{}.{}", payload, to_base64url(&signature)))
    }

    /// Verify and decode a cookie value
    pub fn open(&self, token: &str, now_ms: i64) -> AccountResult<SessionClaims> {
        let (payload, signature_b64) = token
            .split_once('.')
            .ok_or(AccountError::SessionInvalid)?;

        let signature = from_base64url(signature_b64).map_err(|_| AccountError::SessionInvalid)?;

        if !verify_hmac_sha256(&self.config.session_secret, payload.as_bytes(), &signature) {
            return Err(AccountError::SessionInvalid);
        }

        let json = from_base64url(payload).map_err(|_| AccountError::SessionInvalid)?;
        let envelope: SessionEnvelope =
            serde_json::from_slice(&json).map_err(|_| AccountError::SessionInvalid)?;

        if envelope.expires_at_ms <= now_ms {
            return Err(AccountError::SessionExpired);
        }

        Ok(envelope.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::AccessToken;
    use axum::http::header;
    use std::time::Duration;

    const NOW: i64 = 1_700_000_000_000;

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(AccountConfig {
            session_secret: [7u8; 32],
            session_ttl: Duration::from_secs(60),
            ..AccountConfig::default()
        }))
    }

    fn claims() -> SessionClaims {
        SessionClaims {
            name: "a@x.com".to_string(),
            display_name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            token: AccessToken::new("tok123"),
            role: "user".to_string(),
        }
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("account_session={value}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_sealed_session_opens_to_same_claims() {
        let manager = manager();
        let token = manager.seal(&claims(), NOW).unwrap();

        assert_eq!(manager.open(&token, NOW + 1).unwrap(), claims());
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        for secs in [9_223_372_036_854_775, u64::MAX / 1000 * 999] {
            let manager = SessionManager::new(Arc::new(AccountConfig {
                session_ttl: Duration::from_secs(secs),
                ..AccountConfig::default()
            }));

            assert!(manager.establish(&claims()).is_ok());
            let token = manager.seal(&claims(), NOW).unwrap();
            assert_eq!(manager.open(&token, NOW + 1).unwrap(), claims());
        }
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let manager = manager();
        let token = manager.seal(&claims(), NOW).unwrap();
        let (payload, signature) = token.split_once('.').unwrap();

        let mut forged_claims = claims();
        forged_claims.role = "admin".to_string();
        let forged = manager.seal(&forged_claims, NOW).unwrap();
        let (forged_payload, _) = forged.split_once('.').unwrap();

        assert!(matches!(
            manager.open(&format!("{forged_payload}.{signature}"), NOW),
            Err(AccountError::SessionInvalid)
        ));
        assert!(matches!(
            manager.open(payload, NOW),
            Err(AccountError::SessionInvalid)
        ));
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = manager().seal(&claims(), NOW).unwrap();
        let other = SessionManager::new(Arc::new(AccountConfig {
            session_secret: [8u8; 32],
            ..AccountConfig::default()
        }));

        assert!(matches!(
            other.open(&token, NOW),
            Err(AccountError::SessionInvalid)
        ));
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let manager = manager();
        let token = manager.seal(&claims(), NOW).unwrap();

        assert!(manager.open(&token, NOW + 59_999).is_ok());
        assert!(matches!(
            manager.open(&token, NOW + 60_000),
            Err(AccountError::SessionExpired)
        ));
    }

    #[test]
    fn test_lookup_states() {
        let manager = manager();

        assert!(matches!(
            manager.lookup(&HeaderMap::new()),
            SessionLookup::Anonymous
        ));
        assert!(matches!(
            manager.lookup(&cookie_headers("")),
            SessionLookup::Anonymous
        ));
        assert!(matches!(
            manager.lookup(&cookie_headers("garbage")),
            SessionLookup::Invalid(AccountError::SessionInvalid)
        ));
    }

    #[test]
    fn test_established_cookie_is_readable() {
        let manager = manager();
        let set_cookie = manager.establish(&claims()).unwrap();
        let set_cookie = set_cookie.to_str().unwrap();

        assert!(set_cookie.starts_with("account_session="));
        assert!(set_cookie.contains("Max-Age=60"));

        let value = set_cookie
            .trim_start_matches("account_session=")
            .split(';')
            .next()
            .unwrap();
        let headers = cookie_headers(value);

        assert_eq!(
            manager.current_claim(&headers, ClaimName::Token).as_deref(),
            Some("tok123")
        );
        assert_eq!(
            manager.current_claim(&headers, ClaimName::DisplayName).as_deref(),
            Some("Ann")
        );
    }

    #[test]
    fn test_end_is_idempotent() {
        let manager = manager();
        let first = manager.end();
        let second = manager.end();

        assert_eq!(first, second);
        assert!(first.to_str().unwrap().contains("Max-Age=0"));
        assert!(manager.current(&HeaderMap::new()).is_none());
    }
}
