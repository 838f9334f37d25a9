//! Authenticated user, as reported by the backend on a successful login

use crate::domain::value_object::AccessToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
    pub display_name: String,
    pub access_token: AccessToken,
    pub role: String,
}
