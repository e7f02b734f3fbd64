use crate::domain::{
    correlation_key::CorrelationKey, credential_request::CredentialRequest, username::Username,
};

/// Unauthenticated token shapes a calling framework may hand to a provider.
///
/// Providers inspect the variant in `supports` to decide whether they can
/// handle a token or whether the framework should try the next provider.
#[derive(Debug, Clone)]
pub enum Token {
    /// Username/password pair, or a session-bound external user record.
    UsernamePassword(CredentialRequest),

    /// Visitor with no credentials at all.
    Anonymous { correlation_key: CorrelationKey },

    /// Identity asserted by an upstream component (proxy header, client
    /// certificate) rather than by credentials.
    PreAuthenticated {
        username: Username,
        correlation_key: CorrelationKey,
    },
}

impl Token {
    pub fn kind(&self) -> &'static str {
        match self {
            Token::UsernamePassword(_) => "username_password",
            Token::Anonymous { .. } => "anonymous",
            Token::PreAuthenticated { .. } => "pre_authenticated",
        }
    }

    pub fn correlation_key(&self) -> &CorrelationKey {
        match self {
            Token::UsernamePassword(request) => request.correlation_key(),
            Token::Anonymous { correlation_key } => correlation_key,
            Token::PreAuthenticated {
                correlation_key, ..
            } => correlation_key,
        }
    }
}

impl From<CredentialRequest> for Token {
    fn from(request: CredentialRequest) -> Self {
        Token::UsernamePassword(request)
    }
}
