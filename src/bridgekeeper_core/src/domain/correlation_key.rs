use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorrelationKeyError {
    #[error("Correlation key must not be empty")]
    Empty,
}

/// Opaque key tying a token to the authentication context that issued it
/// (the framework's "provider key"). Passed through authentication unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CorrelationKey(String);

impl CorrelationKey {
    pub fn new(value: impl Into<String>) -> Result<Self, CorrelationKeyError> {
        let value = value.into();
        if value.is_empty() {
            return Err(CorrelationKeyError::Empty);
        }
        Ok(Self(value))
    }

    /// Random key for callers that have no provider key of their own.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CorrelationKey {
    type Error = CorrelationKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CorrelationKey> for String {
    fn from(key: CorrelationKey) -> Self {
        key.0
    }
}

impl AsRef<str> for CorrelationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(CorrelationKey::new(""), Err(CorrelationKeyError::Empty));
    }

    #[test]
    fn generated_keys_are_unique_uuids() {
        let first = CorrelationKey::generate();
        let second = CorrelationKey::generate();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }
}
