use bridgekeeper_core::{ExternalUser, IdentitySource, SignOnOutcome, Username};
use secrecy::Secret;

/// Error types specific to sign-on use case
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignOnError {
    #[error("{}", .0.join(", "))]
    Rejected(Vec<String>),
    #[error("Identity source unavailable: {0}")]
    Unavailable(String),
}

/// Sign-on use case - verifies credentials with the identity source
pub struct SignOnUseCase<I>
where
    I: IdentitySource,
{
    identity_source: I,
}

impl<I> SignOnUseCase<I>
where
    I: IdentitySource,
{
    pub fn new(identity_source: I) -> Self {
        Self { identity_source }
    }

    /// Execute the sign-on use case
    ///
    /// # Arguments
    /// * `username` - Login name to verify
    /// * `secret` - Password submitted with it
    /// * `remember` - Whether the source should start a persistent login
    ///
    /// # Returns
    /// The external user record on success, or SignOnError
    #[tracing::instrument(name = "SignOnUseCase::execute", skip(self, secret))]
    pub async fn execute(
        &self,
        username: &Username,
        secret: &Secret<String>,
        remember: bool,
    ) -> Result<ExternalUser, SignOnError> {
        match self.identity_source.verify(username, secret, remember).await {
            SignOnOutcome::Authenticated(user) => Ok(user),
            SignOnOutcome::Rejected(messages) => Err(SignOnError::Rejected(messages)),
            SignOnOutcome::Unavailable(detail) => Err(SignOnError::Unavailable(detail)),
        }
    }
}
