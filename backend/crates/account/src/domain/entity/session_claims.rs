//! Session Claims Entity
//!
//! The identity carried by the session cookie. Derived 1:1 from an
//! [`AuthUser`] at login and never modified afterwards; a new login replaces
//! the whole set.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::domain::entity::auth_user::AuthUser;
use crate::domain::value_object::AccessToken;

/// Names of the claims a session carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClaimName {
    #[display("name")]
    Name,
    #[display("displayName")]
    DisplayName,
    #[display("email")]
    Email,
    #[display("token")]
    Token,
    #[display("role")]
    Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub name: String,
    pub display_name: String,
    pub email: String,
    /// Sole credential for backend calls during this session
    pub token: AccessToken,
    pub role: String,
}

impl SessionClaims {
    /// Look a claim up by name
    pub fn get(&self, name: ClaimName) -> &str {
        match name {
            ClaimName::Name => &self.name,
            ClaimName::DisplayName => &self.display_name,
            ClaimName::Email => &self.email,
            ClaimName::Token => self.token.as_str(),
            ClaimName::Role => &self.role,
        }
    }
}

impl From<&AuthUser> for SessionClaims {
    fn from(user: &AuthUser) -> Self {
        Self {
            name: user.email.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            token: user.access_token.clone(),
            role: user.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> AuthUser {
        AuthUser {
            email: "a@x.com".to_string(),
            display_name: "Ann".to_string(),
            access_token: AccessToken::new("tok123"),
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_claims_from_auth_user() {
        let claims = SessionClaims::from(&ann());

        assert_eq!(claims.get(ClaimName::Name), "a@x.com");
        assert_eq!(claims.get(ClaimName::DisplayName), "Ann");
        assert_eq!(claims.get(ClaimName::Email), "a@x.com");
        assert_eq!(claims.get(ClaimName::Token), "tok123");
        assert_eq!(claims.get(ClaimName::Role), "user");
    }

    #[test]
    fn test_claim_names() {
        assert_eq!(ClaimName::DisplayName.to_string(), "displayName");
        assert_eq!(ClaimName::Token.to_string(), "token");
    }

    #[test]
    fn test_serialized_claim_keys() {
        let json = serde_json::to_value(SessionClaims::from(&ann())).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        for expected in ["name", "displayName", "email", "token", "role"] {
            assert!(keys.contains(&expected), "missing claim {expected}");
        }
        assert_eq!(keys.len(), 5);
    }
}
