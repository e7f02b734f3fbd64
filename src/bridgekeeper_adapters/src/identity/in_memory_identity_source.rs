use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString, rand_core::OsRng},
};
use bridgekeeper_core::{
    ExternalUser, IdentitySource, IdentitySourceError, SignOnOutcome, Username,
};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum InMemoryIdentitySourceError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

struct StoredUser {
    user: ExternalUser,
    password_hash: String,
}

/// Identity source kept in process memory, for tests and local development.
///
/// Passwords are stored as Argon2 hashes. Rejection messages mimic the CMS
/// login form. The source can be taken offline to emulate an unreachable
/// backend.
#[derive(Default, Clone)]
pub struct InMemoryIdentitySource {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryIdentitySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user; ids are assigned in insertion order starting at 1.
    pub async fn add_user<I, R>(
        &self,
        login: &Username,
        password: Secret<String>,
        roles: I,
    ) -> Result<ExternalUser, InMemoryIdentitySourceError>
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(InMemoryIdentitySourceError::PasswordHash)?;

        let mut users = self.users.write().await;
        if users.contains_key(login.as_str()) {
            return Err(InMemoryIdentitySourceError::UserAlreadyExists);
        }

        let user = ExternalUser::new(users.len() as u64 + 1, login.as_str(), roles);
        users.insert(
            login.as_str().to_owned(),
            StoredUser {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    pub fn set_online(&self, online: bool) {
        self.offline.store(!online, Ordering::SeqCst);
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IdentitySource for InMemoryIdentitySource {
    #[tracing::instrument(name = "InMemoryIdentitySource::verify", skip(self, secret))]
    async fn verify(
        &self,
        username: &Username,
        secret: &Secret<String>,
        _remember: bool,
    ) -> SignOnOutcome {
        if self.is_offline() {
            return SignOnOutcome::Unavailable("identity source is offline".to_string());
        }

        let stored = {
            let users = self.users.read().await;
            users
                .get(username.as_str())
                .map(|stored| (stored.user.clone(), stored.password_hash.clone()))
        };
        let Some((user, password_hash)) = stored else {
            return SignOnOutcome::Rejected(vec!["Invalid username.".to_string()]);
        };

        if secret.expose_secret().is_empty() {
            return SignOnOutcome::Rejected(vec!["The password field is empty.".to_string()]);
        }

        match verify_password_hash(password_hash, secret.clone()).await {
            Ok(true) => SignOnOutcome::Authenticated(user),
            Ok(false) => SignOnOutcome::Rejected(vec![format!(
                "The password you entered for the username {username} is incorrect."
            )]),
            Err(e) => SignOnOutcome::Unavailable(e),
        }
    }

    async fn lookup_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<ExternalUser>, IdentitySourceError> {
        if self.is_offline() {
            return Err(IdentitySourceError::Unreachable(
                "identity source is offline".to_string(),
            ));
        }

        let users = self.users.read().await;
        Ok(users.get(username.as_str()).map(|stored| stored.user.clone()))
    }
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Secret<String>) -> Result<String, String> {
    let current_span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.expose_secret().as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

/// `Ok(false)` means the candidate does not match; `Err` means the check
/// itself could not run.
#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: String,
    password_candidate: Secret<String>,
) -> Result<bool, String> {
    let current_span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash =
                PasswordHash::new(&expected_password_hash).map_err(|e| e.to_string())?;

            match Argon2::default().verify_password(
                password_candidate.expose_secret().as_bytes(),
                &expected_password_hash,
            ) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(e.to_string()),
            }
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{
        Fake,
        faker::internet::en::{Password as FakePassword, Username as FakeUsername},
    };

    fn secret(value: &str) -> Secret<String> {
        Secret::new(value.to_string())
    }

    #[tokio::test]
    async fn test_verify_accepts_correct_password() {
        let source = InMemoryIdentitySource::new();
        let login = Username::parse(FakeUsername().fake::<String>()).unwrap();
        let password: String = FakePassword(12..20).fake();
        let user = source
            .add_user(&login, secret(&password), ["editor"])
            .await
            .unwrap();

        let outcome = source.verify(&login, &secret(&password), false).await;

        assert_eq!(outcome, SignOnOutcome::Authenticated(user));
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_password() {
        let source = InMemoryIdentitySource::new();
        let login = Username::parse("user").unwrap();
        source
            .add_user(&login, secret("password"), ["editor"])
            .await
            .unwrap();

        let outcome = source.verify(&login, &secret("wrong"), false).await;

        assert_eq!(
            outcome,
            SignOnOutcome::Rejected(vec![
                "The password you entered for the username user is incorrect.".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_verify_rejects_unknown_user_and_empty_password() {
        let source = InMemoryIdentitySource::new();
        let login = Username::parse("user").unwrap();
        source
            .add_user(&login, secret("password"), Vec::<String>::new())
            .await
            .unwrap();

        let unknown = source
            .verify(&Username::parse("nobody").unwrap(), &secret("password"), false)
            .await;
        let empty = source.verify(&login, &secret(""), false).await;

        assert!(matches!(unknown, SignOnOutcome::Rejected(_)));
        assert!(matches!(empty, SignOnOutcome::Rejected(_)));
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_unavailable_not_rejected() {
        let source = InMemoryIdentitySource::new();
        let login = Username::parse("user").unwrap();
        source.users.write().await.insert(
            login.as_str().to_owned(),
            StoredUser {
                user: ExternalUser::new(1, "user", ["editor"]),
                password_hash: "not-a-phc-string".to_string(),
            },
        );

        let outcome = source.verify(&login, &secret("password"), false).await;

        assert!(matches!(outcome, SignOnOutcome::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_duplicate_users_are_refused() {
        let source = InMemoryIdentitySource::new();
        let login = Username::parse("user").unwrap();
        source
            .add_user(&login, secret("password"), ["editor"])
            .await
            .unwrap();

        let result = source.add_user(&login, secret("other"), ["admin"]).await;

        assert!(matches!(
            result,
            Err(InMemoryIdentitySourceError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_offline_source_is_unavailable() {
        let source = InMemoryIdentitySource::new();
        let login = Username::parse("user").unwrap();
        source
            .add_user(&login, secret("password"), ["editor"])
            .await
            .unwrap();
        source.set_online(false);

        let outcome = source.verify(&login, &secret("password"), false).await;
        let lookup = source.lookup_by_username(&login).await;

        assert!(matches!(outcome, SignOnOutcome::Unavailable(_)));
        assert!(lookup.is_err());
    }

    #[tokio::test]
    async fn test_lookup_by_username() {
        let source = InMemoryIdentitySource::new();
        let login = Username::parse("frankenfurter").unwrap();
        let user = source
            .add_user(&login, secret("password"), ["somerole", "anotherrole"])
            .await
            .unwrap();

        let found = source.lookup_by_username(&login).await.unwrap();
        let missing = source
            .lookup_by_username(&Username::parse("ghost").unwrap())
            .await
            .unwrap();

        assert_eq!(found, Some(user));
        assert_eq!(missing, None);
    }
}
