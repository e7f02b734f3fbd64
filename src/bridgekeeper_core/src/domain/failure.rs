use thiserror::Error;

const DEFAULT_REJECTION_MESSAGE: &str = "Invalid credentials.";
const GENERIC_UNAVAILABLE_MESSAGE: &str = "Authentication service unavailable. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidCredentials,
    ServiceUnavailable,
    UnsupportedPrincipal,
}

/// Why an authentication attempt was refused. Never retried by providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthenticationFailure {
    /// The identity source rejected the credentials. Messages come from the
    /// source verbatim and are safe to show to the end user.
    #[error("{}", .messages.join(", "))]
    InvalidCredentials { messages: Vec<String> },

    /// The identity source gave no usable answer. The detail is for logs only.
    #[error("Authentication service unavailable: {detail}")]
    ServiceUnavailable { detail: String },

    /// The provider was handed a token shape it does not handle.
    #[error("Unsupported token: {token_kind}")]
    UnsupportedPrincipal { token_kind: String },
}

impl AuthenticationFailure {
    pub fn invalid_credentials<I, M>(messages: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let mut messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            messages.push(DEFAULT_REJECTION_MESSAGE.to_owned());
        }
        Self::InvalidCredentials { messages }
    }

    pub fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            detail: detail.into(),
        }
    }

    pub fn unsupported_principal(token_kind: impl Into<String>) -> Self {
        Self::UnsupportedPrincipal {
            token_kind: token_kind.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidCredentials { .. } => FailureKind::InvalidCredentials,
            Self::ServiceUnavailable { .. } => FailureKind::ServiceUnavailable,
            Self::UnsupportedPrincipal { .. } => FailureKind::UnsupportedPrincipal,
        }
    }

    pub fn messages(&self) -> &[String] {
        match self {
            Self::InvalidCredentials { messages } => messages,
            Self::ServiceUnavailable { detail } => std::slice::from_ref(detail),
            Self::UnsupportedPrincipal { token_kind } => std::slice::from_ref(token_kind),
        }
    }

    /// Text the calling layer may show to the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials { .. } => self.to_string(),
            Self::ServiceUnavailable { .. } | Self::UnsupportedPrincipal { .. } => {
                GENERIC_UNAVAILABLE_MESSAGE.to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_are_joined_in_order() {
        let failure =
            AuthenticationFailure::invalid_credentials(["first message", "second message"]);

        assert_eq!(failure.kind(), FailureKind::InvalidCredentials);
        assert_eq!(failure.to_string(), "first message, second message");
        assert_eq!(failure.user_message(), "first message, second message");
    }

    #[test]
    fn rejection_without_messages_gets_a_default() {
        let failure = AuthenticationFailure::invalid_credentials(Vec::<String>::new());
        assert_eq!(failure.messages(), [DEFAULT_REJECTION_MESSAGE.to_owned()]);
    }

    #[test]
    fn unavailable_detail_is_hidden_from_users() {
        let failure = AuthenticationFailure::service_unavailable("connection refused");

        assert_eq!(failure.kind(), FailureKind::ServiceUnavailable);
        assert!(failure.to_string().contains("connection refused"));
        assert!(!failure.user_message().contains("connection refused"));
    }
}
