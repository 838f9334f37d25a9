//! Application Configuration
//!
//! Configuration for the account application layer and the backend client.

use std::time::Duration;

use platform::cookie::CookieConfig;
use url::Url;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Longest session lifetime accepted from configuration
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime (cookie Max-Age and signed expiry)
    pub session_ttl: Duration,
    /// Anti-forgery cookie name
    pub anti_forgery_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy for the session cookie
    pub cookie_same_site: SameSite,
    /// Roles allowed on the landing page; empty means any session
    pub listing_roles: Vec<String>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "account_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(14 * 24 * 3600), // 14 days
            anti_forgery_cookie_name: "account_csrf".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            listing_roles: Vec::new(),
        }
    }
}

impl AccountConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get session TTL in milliseconds, clamped to `i64::MAX`
    pub fn session_ttl_ms(&self) -> i64 {
        i64::try_from(self.session_ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Cookie settings for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }

    /// Cookie settings for the anti-forgery cookie (session-scoped)
    pub fn anti_forgery_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.anti_forgery_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/account".to_string(),
            max_age_secs: None,
        }
    }

    /// Whether the landing page is open to this role
    pub fn allows_listing(&self, role: &str) -> bool {
        self.listing_roles.is_empty()
            || self
                .listing_roles
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(role))
    }
}

/// Backend client configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend API (`UrlWebAPI`)
    pub base_url: Url,
    /// Upper bound for a whole backend call
    pub timeout: Duration,
    /// Upper bound for establishing the connection
    pub connect_timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(3),
        }
    }
}
