use async_trait::async_trait;

use crate::domain::{
    authenticated_principal::AuthenticatedPrincipal, failure::AuthenticationFailure, token::Token,
};

/// Core trait that all authentication providers implement.
///
/// A calling framework keeps an ordered chain of providers. For each
/// incoming token it asks `supports` first and only hands the token to a
/// provider that recognises its shape.
///
/// Providers are stateless between calls: every `authenticate` is
/// independent and nothing is retried.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Whether this provider can handle the given token shape.
    ///
    /// Returning `false` tells the framework to try the next provider in
    /// its chain.
    fn supports(&self, token: &Token) -> bool;

    /// Authenticate the token, producing an authenticated principal.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if the identity source refused the credentials
    /// - `ServiceUnavailable` if the identity source gave no usable answer
    /// - `UnsupportedPrincipal` if called with a token `supports` rejects
    async fn authenticate(&self, token: Token)
    -> Result<AuthenticatedPrincipal, AuthenticationFailure>;
}
