//! Application Layer
//!
//! Use cases and application services.

pub mod anti_forgery;
pub mod config;
pub mod list_profiles;
pub mod session;
pub mod sign_in;
pub mod view_profile;

// Re-exports
pub use anti_forgery::AntiForgery;
pub use config::{AccountConfig, BackendConfig};
pub use list_profiles::ListProfilesUseCase;
pub use session::{SessionLookup, SessionManager};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use view_profile::ViewProfileUseCase;
