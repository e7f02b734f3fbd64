use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::domain::{
    correlation_key::CorrelationKey, external_user::ExternalUser, role::MappedRole,
};

/// A user the identity source has vouched for, in the calling framework's
/// terms. Built by authentication providers on success and never modified
/// afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedPrincipal {
    username: String,
    // Kept for parity with the framework's token; never re-validated.
    #[serde(skip)]
    credentials: Option<Secret<String>>,
    roles: Vec<MappedRole>,
    correlation_key: CorrelationKey,
    user: ExternalUser,
}

impl AuthenticatedPrincipal {
    pub fn new(
        user: ExternalUser,
        roles: Vec<MappedRole>,
        credentials: Option<Secret<String>>,
        correlation_key: CorrelationKey,
    ) -> Self {
        Self {
            username: user.login().to_owned(),
            credentials,
            roles,
            correlation_key,
            user,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn credentials(&self) -> Option<&Secret<String>> {
        self.credentials.as_ref()
    }

    pub fn roles(&self) -> &[MappedRole] {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|mapped| mapped.as_str() == role)
    }

    pub fn is_authenticated(&self) -> bool {
        true
    }

    pub fn correlation_key(&self) -> &CorrelationKey {
        &self.correlation_key
    }

    pub fn user(&self) -> &ExternalUser {
        &self.user
    }
}

impl PartialEq for AuthenticatedPrincipal {
    fn eq(&self, other: &Self) -> bool {
        let same_credentials = match (&self.credentials, &other.credentials) {
            (Some(a), Some(b)) => a.expose_secret() == b.expose_secret(),
            (None, None) => true,
            _ => false,
        };

        same_credentials
            && self.username == other.username
            && self.roles == other.roles
            && self.correlation_key == other.correlation_key
            && self.user == other.user
    }
}

impl Eq for AuthenticatedPrincipal {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::RoleMapper;

    fn principal(password: Option<&str>) -> AuthenticatedPrincipal {
        let user = ExternalUser::new(99, "user", ["somerole"]);
        let roles = RoleMapper::default().map_roles(user.roles().iter().map(String::as_str));
        AuthenticatedPrincipal::new(
            user,
            roles,
            password.map(|p| Secret::new(p.to_owned())),
            CorrelationKey::new("key").unwrap(),
        )
    }

    #[test]
    fn username_comes_from_the_external_login() {
        let principal = principal(None);

        assert_eq!(principal.username(), "user");
        assert!(principal.is_authenticated());
        assert!(principal.has_role("ROLE_EXT_SOMEROLE"));
        assert!(!principal.has_role("ROLE_EXT_OTHER"));
    }

    #[test]
    fn equality_compares_credentials_by_value() {
        assert_eq!(principal(Some("pass")), principal(Some("pass")));
        assert_ne!(principal(Some("pass")), principal(Some("other")));
        assert_ne!(principal(Some("pass")), principal(None));
    }

    #[test]
    fn serialization_never_includes_credentials() {
        let json = serde_json::to_value(principal(Some("hunter2"))).unwrap();

        assert_eq!(json["username"], "user");
        assert_eq!(json["roles"], serde_json::json!(["ROLE_EXT_SOMEROLE"]));
        assert!(json.get("credentials").is_none());
        assert!(!json.to_string().contains("hunter2"));
    }
}
