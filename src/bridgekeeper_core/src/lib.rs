pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    authenticated_principal::AuthenticatedPrincipal,
    correlation_key::{CorrelationKey, CorrelationKeyError},
    credential_request::{CredentialRequest, Principal},
    external_user::ExternalUser,
    failure::{AuthenticationFailure, FailureKind},
    role::{DEFAULT_ROLE_PREFIX, MappedRole, RoleMapper},
    token::Token,
    username::{Username, UsernameError},
};

pub use ports::{
    identity_source::{IdentitySource, IdentitySourceError, SignOnOutcome},
    request_context::{RequestContext, is_truthy},
};

pub use strategies::authentication_provider::AuthenticationProvider;
