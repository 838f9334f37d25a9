//! Backend API Trait
//!
//! The three calls this service makes to the backend. Implementation is in
//! the infrastructure layer.
//!
//! Every call answers one of three ways:
//! - `Ok(Some(_))` - the backend accepted the request
//! - `Ok(None)` - the backend answered with a non-success status
//! - `Err(_)` - no usable answer (timeout, unreachable, malformed body)

use crate::domain::entity::{AuthUser, Credentials, Profile};
use crate::domain::value_object::AccessToken;
use crate::error::BackendResult;

#[trait_variant::make(BackendApi: Send)]
pub trait LocalBackendApi {
    /// POST {base}/login
    async fn authenticate(&self, credentials: &Credentials) -> BackendResult<Option<AuthUser>>;

    /// GET {base}/home/{email}
    async fn fetch_profile(
        &self,
        email: &str,
        token: &AccessToken,
    ) -> BackendResult<Option<Profile>>;

    /// GET {base}/home
    async fn fetch_all_profiles(&self, token: &AccessToken) -> BackendResult<Option<Vec<Profile>>>;
}
