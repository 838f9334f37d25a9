//! Anti-forgery tokens for the login form
//!
//! Double-submit scheme: the same random token goes into a Strict cookie and
//! a hidden form field; a cross-site POST can send the cookie but cannot know
//! the field value.

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue};
use platform::cookie::{extract_cookie, set_cookie_header};
use platform::crypto::{constant_time_eq, random_token};

use crate::application::config::AccountConfig;
use crate::error::{AccountError, AccountResult};

const TOKEN_BYTES: usize = 32;

pub struct AntiForgery {
    config: Arc<AccountConfig>,
}

impl AntiForgery {
    pub fn new(config: Arc<AccountConfig>) -> Self {
        Self { config }
    }

    /// Reuse the browser's current token if it has one, otherwise mint a new one.
    /// Returns the token and the Set-Cookie value to send with the form.
    pub fn issue(&self, headers: &HeaderMap) -> (String, HeaderValue) {
        let token = extract_cookie(headers, &self.config.anti_forgery_cookie_name)
            .filter(|existing| !existing.is_empty())
            .unwrap_or_else(|| random_token(TOKEN_BYTES));
        let cookie = set_cookie_header(&self.config.anti_forgery_cookie(), &token);
        (token, cookie)
    }

    /// Check the submitted field against the cookie
    pub fn verify(&self, headers: &HeaderMap, submitted: &str) -> AccountResult<()> {
        let expected = extract_cookie(headers, &self.config.anti_forgery_cookie_name)
            .ok_or(AccountError::AntiForgery)?;

        if expected.is_empty() || !constant_time_eq(expected.as_bytes(), submitted.as_bytes()) {
            return Err(AccountError::AntiForgery);
        }

        Ok(())
    }
}
