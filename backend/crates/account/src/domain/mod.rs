//! Domain Layer
//!
//! Contains entities, value objects, and the backend API trait.

pub mod backend;
pub mod entity;
pub mod value_object;

// Re-exports
pub use backend::BackendApi;
pub use entity::{AuthUser, ClaimName, Credentials, Profile, SessionClaims};
