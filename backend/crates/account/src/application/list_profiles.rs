//! List Profiles Use Case
//!
//! Backs the landing page. Any failure yields an empty list.

use std::sync::Arc;

use crate::domain::backend::BackendApi;
use crate::domain::entity::{Profile, SessionClaims};

pub struct ListProfilesUseCase<B>
where
    B: BackendApi,
{
    backend: Arc<B>,
}

impl<B> ListProfilesUseCase<B>
where
    B: BackendApi,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, claims: &SessionClaims) -> Vec<Profile> {
        match self.backend.fetch_all_profiles(&claims.token).await {
            Ok(Some(profiles)) => profiles,
            Ok(None) => {
                tracing::warn!(email = %claims.email, "Backend refused profile listing");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(email = %claims.email, error = %e, "Profile listing unavailable");
                Vec::new()
            }
        }
    }
}
