//! Sign In Use Case
//!
//! Exchanges credentials for a backend token and derives the session claims.
//! Establishing the cookie is left to the caller.

use std::sync::Arc;

use crate::domain::backend::BackendApi;
use crate::domain::entity::{Credentials, SessionClaims};
use crate::error::{AccountError, AccountResult};

/// Sign in input
pub struct SignInInput {
    pub credentials: Credentials,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub claims: SessionClaims,
}

/// Sign in use case
pub struct SignInUseCase<B>
where
    B: BackendApi,
{
    backend: Arc<B>,
}

impl<B> SignInUseCase<B>
where
    B: BackendApi,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// `InvalidCredentials` when the backend says no, `Backend(_)` when it
    /// could not be asked. Callers decide how much of that to show.
    pub async fn execute(&self, input: SignInInput) -> AccountResult<SignInOutput> {
        let user = self
            .backend
            .authenticate(&input.credentials)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let claims = SessionClaims::from(&user);

        tracing::info!(
            email = %claims.email,
            role = %claims.role,
            "User signed in"
        );

        Ok(SignInOutput { claims })
    }
}
