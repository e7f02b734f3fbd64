use bridgekeeper_core::{
    AuthenticatedPrincipal, AuthenticationFailure, AuthenticationProvider, Token,
};

/// Ordered chain of authentication providers.
///
/// The first provider whose `supports` accepts a token authenticates it, and
/// its result is returned unchanged. Failures are never retried on later
/// providers.
#[derive(Default)]
pub struct ProviderManager {
    providers: Vec<Box<dyn AuthenticationProvider>>,
}

impl ProviderManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: AuthenticationProvider + 'static,
    {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn supports(&self, token: &Token) -> bool {
        self.providers.iter().any(|provider| provider.supports(token))
    }

    #[tracing::instrument(
        name = "ProviderManager::authenticate",
        skip_all,
        fields(token_kind = token.kind(), correlation_key = %token.correlation_key())
    )]
    pub async fn authenticate(
        &self,
        token: Token,
    ) -> Result<AuthenticatedPrincipal, AuthenticationFailure> {
        let Some(provider) = self.providers.iter().find(|p| p.supports(&token)) else {
            tracing::warn!("No authentication provider supports this token");
            return Err(AuthenticationFailure::unsupported_principal(token.kind()));
        };

        provider.authenticate(token).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use bridgekeeper_core::{CorrelationKey, ExternalUser, FailureKind, RoleMapper, Username};

    /// Accepts only pre-authenticated tokens and counts calls.
    struct PreAuthProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl AuthenticationProvider for PreAuthProvider {
        fn supports(&self, token: &Token) -> bool {
            matches!(token, Token::PreAuthenticated { .. })
        }

        async fn authenticate(
            &self,
            token: Token,
        ) -> Result<AuthenticatedPrincipal, AuthenticationFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let Token::PreAuthenticated {
                username,
                correlation_key,
            } = token
            else {
                return Err(AuthenticationFailure::unsupported_principal("other"));
            };
            let user = ExternalUser::new(1, username.as_str(), ["proxy"]);
            let roles = RoleMapper::default().map_roles(["proxy"]);
            Ok(AuthenticatedPrincipal::new(user, roles, None, correlation_key))
        }
    }

    fn key() -> CorrelationKey {
        CorrelationKey::new("key").unwrap()
    }

    #[tokio::test]
    async fn test_first_supporting_provider_authenticates() {
        let skipped = Arc::new(AtomicUsize::new(0));
        let used = Arc::new(AtomicUsize::new(0));
        let manager = ProviderManager::new()
            .with_provider(PreAuthProvider {
                calls: used.clone(),
            })
            .with_provider(PreAuthProvider {
                calls: skipped.clone(),
            });

        let principal = manager
            .authenticate(Token::PreAuthenticated {
                username: Username::parse("proxied").unwrap(),
                correlation_key: key(),
            })
            .await
            .unwrap();

        assert_eq!(principal.username(), "proxied");
        assert_eq!(used.load(Ordering::SeqCst), 1);
        assert_eq!(skipped.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_token_is_reported() {
        let calls = Arc::new(AtomicUsize::new(0));
        let manager = ProviderManager::new().with_provider(PreAuthProvider {
            calls: calls.clone(),
        });
        let token = Token::Anonymous {
            correlation_key: key(),
        };

        assert!(!manager.supports(&token));
        let failure = manager.authenticate(token).await.unwrap_err();

        assert_eq!(failure.kind(), FailureKind::UnsupportedPrincipal);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_manager_supports_nothing() {
        let manager = ProviderManager::new();

        assert!(manager.is_empty());
        let result = manager
            .authenticate(Token::Anonymous {
                correlation_key: key(),
            })
            .await;

        assert!(result.is_err());
    }
}
