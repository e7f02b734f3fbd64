use serde::{Deserialize, Serialize};

/// A user record as returned by the external identity source.
///
/// Field names on the wire follow the CMS's own user object (`ID`,
/// `user_login`, `roles`). Records are read-only once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUser {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "user_login")]
    login: String,
    #[serde(default)]
    roles: Vec<String>,
}

impl ExternalUser {
    pub fn new<I, R>(id: u64, login: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            id,
            login: login.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Native role names, in the order the identity source reported them.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}
