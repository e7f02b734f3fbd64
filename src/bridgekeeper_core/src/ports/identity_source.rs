use std::sync::Arc;

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{external_user::ExternalUser, username::Username};

/// Answer of the identity source's login facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOnOutcome {
    /// Credentials accepted.
    Authenticated(ExternalUser),
    /// Credentials refused, with the source's own messages in order.
    Rejected(Vec<String>),
    /// Neither a user nor an error came back: the source is unreachable or
    /// misconfigured.
    Unavailable(String),
}

// IdentitySource port trait and errors
#[derive(Debug, Clone, Error)]
pub enum IdentitySourceError {
    #[error("Identity source unreachable: {0}")]
    Unreachable(String),
    #[error("Unexpected response from identity source: {0}")]
    UnexpectedResponse(String),
}

impl PartialEq for IdentitySourceError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Unreachable(_), Self::Unreachable(_))
                | (Self::UnexpectedResponse(_), Self::UnexpectedResponse(_))
        )
    }
}

/// The external user store being bridged.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Verify a username/secret pair with the source's login facility.
    async fn verify(
        &self,
        username: &Username,
        secret: &Secret<String>,
        remember: bool,
    ) -> SignOnOutcome;

    /// Fetch a user without checking any password.
    async fn lookup_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<ExternalUser>, IdentitySourceError>;
}

#[async_trait]
impl<T: IdentitySource + ?Sized> IdentitySource for &T {
    async fn verify(
        &self,
        username: &Username,
        secret: &Secret<String>,
        remember: bool,
    ) -> SignOnOutcome {
        (**self).verify(username, secret, remember).await
    }

    async fn lookup_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<ExternalUser>, IdentitySourceError> {
        (**self).lookup_by_username(username).await
    }
}

#[async_trait]
impl<T: IdentitySource + ?Sized> IdentitySource for Arc<T> {
    async fn verify(
        &self,
        username: &Username,
        secret: &Secret<String>,
        remember: bool,
    ) -> SignOnOutcome {
        (**self).verify(username, secret, remember).await
    }

    async fn lookup_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<ExternalUser>, IdentitySourceError> {
        (**self).lookup_by_username(username).await
    }
}
