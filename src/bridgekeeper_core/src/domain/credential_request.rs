use secrecy::Secret;

use crate::domain::{
    correlation_key::CorrelationKey, external_user::ExternalUser, username::Username,
};

/// Who is asking to be authenticated.
#[derive(Debug, Clone)]
pub enum Principal {
    /// A login name that still has to be verified against the identity source.
    Raw(Username),
    /// A record the identity source already produced, re-presented from the
    /// caller's session. Never re-verified.
    Resolved(ExternalUser),
}

/// Not-yet-authenticated principal/credential pair handed in by the calling
/// framework.
#[derive(Debug, Clone)]
pub struct CredentialRequest {
    principal: Principal,
    secret: Option<Secret<String>>,
    remember: bool,
    correlation_key: CorrelationKey,
}

impl CredentialRequest {
    pub fn with_password(
        username: Username,
        password: Secret<String>,
        correlation_key: CorrelationKey,
    ) -> Self {
        Self {
            principal: Principal::Raw(username),
            secret: Some(password),
            remember: false,
            correlation_key,
        }
    }

    pub fn for_resolved_user(user: ExternalUser, correlation_key: CorrelationKey) -> Self {
        Self {
            principal: Principal::Resolved(user),
            secret: None,
            remember: false,
            correlation_key,
        }
    }

    /// Ask the identity source for a persistent login.
    pub fn remember(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn secret(&self) -> Option<&Secret<String>> {
        self.secret.as_ref()
    }

    pub fn remember_requested(&self) -> bool {
        self.remember
    }

    pub fn correlation_key(&self) -> &CorrelationKey {
        &self.correlation_key
    }

    pub fn into_parts(self) -> (Principal, Option<Secret<String>>, bool, CorrelationKey) {
        (
            self.principal,
            self.secret,
            self.remember,
            self.correlation_key,
        )
    }
}
