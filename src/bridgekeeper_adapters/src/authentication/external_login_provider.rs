use async_trait::async_trait;
use bridgekeeper_application::{RefreshUserError, RefreshUserUseCase, SignOnError, SignOnUseCase};
use bridgekeeper_core::{
    AuthenticatedPrincipal, AuthenticationFailure, AuthenticationProvider, ExternalUser,
    IdentitySource, Principal, RequestContext, RoleMapper, Token, Username,
};
use secrecy::Secret;

use crate::{config::BridgeSettings, request_context::NoRequestContext};

/// Field of the ambient request whose truthiness turns on "remember me".
struct RememberMe<C> {
    field: String,
    context: C,
}

/// Authentication provider that delegates credential checks to an external
/// identity source and maps its users onto [`AuthenticatedPrincipal`]s.
///
/// Handles `Token::UsernamePassword` in both forms:
/// - a raw username with a password, verified by the identity source;
/// - an already-resolved external user from the caller's session, which is
///   trusted and mapped without any verify call.
pub struct ExternalLoginProvider<I, C = NoRequestContext> {
    identity_source: I,
    role_mapper: RoleMapper,
    remember_me: Option<RememberMe<C>>,
    refresh_resolved_users: bool,
}

impl<I> ExternalLoginProvider<I>
where
    I: IdentitySource,
{
    pub fn new(identity_source: I) -> Self {
        Self {
            identity_source,
            role_mapper: RoleMapper::default(),
            remember_me: None,
            refresh_resolved_users: false,
        }
    }
}

impl<I, C> ExternalLoginProvider<I, C>
where
    I: IdentitySource,
    C: RequestContext,
{
    /// Derive the remember flag from `field` in the given request context.
    pub fn with_remember_me<R>(
        self,
        field: impl Into<String>,
        context: R,
    ) -> ExternalLoginProvider<I, R>
    where
        R: RequestContext,
    {
        ExternalLoginProvider {
            identity_source: self.identity_source,
            role_mapper: self.role_mapper,
            remember_me: Some(RememberMe {
                field: field.into(),
                context,
            }),
            refresh_resolved_users: self.refresh_resolved_users,
        }
    }

    pub fn with_role_mapper(mut self, role_mapper: RoleMapper) -> Self {
        self.role_mapper = role_mapper;
        self
    }

    /// Re-read session-bound users from the identity source instead of
    /// trusting the stored record.
    pub fn refresh_resolved_users(mut self, refresh: bool) -> Self {
        self.refresh_resolved_users = refresh;
        self
    }

    /// Apply the role prefix and refresh policy from settings.
    pub fn with_settings(self, settings: &BridgeSettings) -> Self {
        self.with_role_mapper(settings.role_mapper())
            .refresh_resolved_users(settings.refresh_resolved_users)
    }

    /// A configured remember field decides alone; the request's own flag only
    /// counts when no field is configured.
    fn remember_flag(&self, requested: bool) -> bool {
        match &self.remember_me {
            Some(remember_me) => remember_me.context.is_set(&remember_me.field),
            None => requested,
        }
    }

    async fn sign_on(
        &self,
        username: &Username,
        secret: &Secret<String>,
        remember: bool,
    ) -> Result<ExternalUser, AuthenticationFailure> {
        SignOnUseCase::new(&self.identity_source)
            .execute(username, secret, remember)
            .await
            .map_err(|e| match e {
                SignOnError::Rejected(messages) => {
                    tracing::info!(%username, "Identity source rejected credentials");
                    AuthenticationFailure::invalid_credentials(messages)
                }
                SignOnError::Unavailable(detail) => {
                    tracing::error!(%username, %detail, "Identity source gave no usable answer");
                    AuthenticationFailure::service_unavailable(detail)
                }
            })
    }

    async fn resolve(&self, user: ExternalUser) -> Result<ExternalUser, AuthenticationFailure> {
        if !self.refresh_resolved_users {
            return Ok(user);
        }

        let username = Username::parse(user.login())
            .map_err(|e| AuthenticationFailure::invalid_credentials([e.to_string()]))?;

        RefreshUserUseCase::new(&self.identity_source)
            .execute(&username)
            .await
            .map_err(|e| match e {
                RefreshUserError::UnknownUser(login) => {
                    tracing::warn!(%login, "Session user no longer exists");
                    AuthenticationFailure::invalid_credentials([format!("Unknown user {login}")])
                }
                RefreshUserError::IdentitySourceError(source) => {
                    tracing::error!(%username, error = %source, "Failed to refresh session user");
                    AuthenticationFailure::service_unavailable(source.to_string())
                }
            })
    }
}

#[async_trait]
impl<I, C> AuthenticationProvider for ExternalLoginProvider<I, C>
where
    I: IdentitySource,
    C: RequestContext,
{
    fn supports(&self, token: &Token) -> bool {
        matches!(token, Token::UsernamePassword(_))
    }

    #[tracing::instrument(
        name = "ExternalLoginProvider::authenticate",
        skip_all,
        fields(token_kind = token.kind(), correlation_key = %token.correlation_key())
    )]
    async fn authenticate(
        &self,
        token: Token,
    ) -> Result<AuthenticatedPrincipal, AuthenticationFailure> {
        let token_kind = token.kind();
        let Token::UsernamePassword(request) = token else {
            tracing::warn!("Provider invoked with a token it does not support");
            return Err(AuthenticationFailure::unsupported_principal(token_kind));
        };

        let (principal, secret, remember_requested, correlation_key) = request.into_parts();

        let user = match principal {
            Principal::Resolved(user) => self.resolve(user).await?,
            Principal::Raw(username) => {
                let remember = self.remember_flag(remember_requested);
                let password = secret
                    .clone()
                    .unwrap_or_else(|| Secret::new(String::new()));
                self.sign_on(&username, &password, remember).await?
            }
        };

        let roles = self
            .role_mapper
            .map_roles(user.roles().iter().map(String::as_str));

        tracing::debug!(user_id = user.id(), roles = roles.len(), "Authenticated external user");

        Ok(AuthenticatedPrincipal::new(
            user,
            roles,
            secret,
            correlation_key,
        ))
    }
}
