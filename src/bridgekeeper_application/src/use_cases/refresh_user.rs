use bridgekeeper_core::{ExternalUser, IdentitySource, IdentitySourceError, Username};

/// Error types for refresh user use case
#[derive(Debug, thiserror::Error)]
pub enum RefreshUserError {
    #[error("Unknown user {0}")]
    UnknownUser(Username),
    #[error("Identity source error: {0}")]
    IdentitySourceError(#[from] IdentitySourceError),
}

/// Refresh user use case - re-reads a session-bound user from the identity
/// source without checking a password
pub struct RefreshUserUseCase<I>
where
    I: IdentitySource,
{
    identity_source: I,
}

impl<I> RefreshUserUseCase<I>
where
    I: IdentitySource,
{
    pub fn new(identity_source: I) -> Self {
        Self { identity_source }
    }

    #[tracing::instrument(name = "RefreshUserUseCase::execute", skip(self))]
    pub async fn execute(&self, username: &Username) -> Result<ExternalUser, RefreshUserError> {
        self.identity_source
            .lookup_by_username(username)
            .await?
            .ok_or_else(|| RefreshUserError::UnknownUser(username.clone()))
    }
}
