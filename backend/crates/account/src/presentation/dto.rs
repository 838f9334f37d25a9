//! Form and query DTOs

use serde::Deserialize;

use crate::domain::entity::Credentials;
use crate::domain::value_object::{Email, ReturnUrl};

// ============================================================================
// Login
// ============================================================================

/// Login form body (`application/x-www-form-urlencoded`)
///
/// Every field defaults so a half-filled form reaches validation instead of
/// being rejected by the extractor.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    #[serde(alias = "Email")]
    pub email: String,
    #[serde(alias = "Password")]
    pub password: String,
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
    #[serde(rename = "returnUrl", alias = "ReturnUrl")]
    pub return_url: Option<String>,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("return_url", &self.return_url)
            .finish()
    }
}

/// Field messages for a login form that failed shape validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, LoginFormErrors> {
        let mut errors = LoginFormErrors::default();

        let email = match Email::new(self.email.as_str()) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.email = Some(e.message().to_string());
                None
            }
        };

        if self.password.is_empty() {
            errors.password = Some("The Password field is required.".to_string());
        }

        match email {
            Some(email) if errors.password.is_none() => {
                Ok(Credentials::new(email, self.password.clone()))
            }
            _ => Err(errors),
        }
    }

    pub fn return_url(&self) -> Option<ReturnUrl> {
        ReturnUrl::parse_opt(self.return_url.as_deref())
    }
}

// ============================================================================
// Query
// ============================================================================

/// `?returnUrl=` on login and logout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnUrlQuery {
    #[serde(rename = "returnUrl", alias = "ReturnUrl")]
    pub return_url: Option<String>,
}

impl ReturnUrlQuery {
    pub fn return_url(&self) -> Option<ReturnUrl> {
        ReturnUrl::parse_opt(self.return_url.as_deref())
    }
}
