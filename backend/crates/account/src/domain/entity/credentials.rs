//! Login credentials
//!
//! Lives for exactly one authentication call. Never persisted, never logged.

use std::fmt;

use crate::domain::value_object::Email;

#[derive(Clone)]
pub struct Credentials {
    pub email: Email,
    password: String,
}

impl Credentials {
    pub fn new(email: Email, password: impl Into<String>) -> Self {
        Self {
            email,
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
