//! View Profile Use Case
//!
//! Fetches the signed-in user's profile with the session token. A missing
//! profile is a normal outcome here: the page renders empty instead of
//! failing, and the reason goes to the log.

use std::sync::Arc;

use crate::domain::backend::BackendApi;
use crate::domain::entity::{Profile, SessionClaims};

pub struct ViewProfileUseCase<B>
where
    B: BackendApi,
{
    backend: Arc<B>,
}

impl<B> ViewProfileUseCase<B>
where
    B: BackendApi,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, claims: &SessionClaims) -> Option<Profile> {
        match self.backend.fetch_profile(&claims.email, &claims.token).await {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                tracing::warn!(email = %claims.email, "Backend returned no profile");
                None
            }
            Err(e) => {
                tracing::warn!(email = %claims.email, error = %e, "Profile unavailable");
                None
            }
        }
    }
}
