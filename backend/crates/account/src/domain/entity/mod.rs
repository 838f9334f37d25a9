//! Entity Module

pub mod auth_user;
pub mod credentials;
pub mod profile;
pub mod session_claims;

pub use auth_user::AuthUser;
pub use credentials::Credentials;
pub use profile::{Profile, ProfileField};
pub use session_claims::{ClaimName, SessionClaims};
