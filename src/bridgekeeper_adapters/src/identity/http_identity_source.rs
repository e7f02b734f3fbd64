use bridgekeeper_core::{
    ExternalUser, IdentitySource, IdentitySourceError, SignOnOutcome, Username,
};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{
    IdentitySourceSettings,
    identity_source::{API_TOKEN_HEADER, SIGNON_PATH, USERS_PATH},
};

#[derive(Debug, Error)]
pub enum HttpIdentitySourceError {
    #[error("Invalid identity source URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Identity source reached over HTTP through a login bridge installed in the
/// CMS.
///
/// - `POST {base}/signon` verifies credentials. A `2xx` answer carries the
///   user record, a `4xx` answer carries `{"errors": [...]}`.
/// - `GET {base}/users/{login}` returns the user record, or `404`.
pub struct HttpIdentitySource {
    http_client: Client,
    base_url: Url,
    api_token: Secret<String>,
}

impl HttpIdentitySource {
    pub fn new(
        base_url: &str,
        api_token: Secret<String>,
        http_client: Client,
    ) -> Result<Self, HttpIdentitySourceError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| HttpIdentitySourceError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(HttpIdentitySourceError::InvalidUrl(base_url.to_string()));
        }
        // Relative joins replace the last segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
            api_token,
        })
    }

    pub fn from_settings(
        settings: &IdentitySourceSettings,
    ) -> Result<Self, HttpIdentitySourceError> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;
        Self::new(&settings.base_url, settings.api_token.clone(), http_client)
    }

    fn signon_url(&self) -> Result<Url, String> {
        self.base_url.join(SIGNON_PATH).map_err(|e| e.to_string())
    }

    fn user_url(&self, username: &Username) -> Result<Url, String> {
        let mut url = self.base_url.join(USERS_PATH).map_err(|e| e.to_string())?;
        url.path_segments_mut()
            .map_err(|_| "identity source URL cannot be a base".to_string())?
            .pop_if_empty()
            .push(username.as_str());
        Ok(url)
    }
}

#[async_trait::async_trait]
impl IdentitySource for HttpIdentitySource {
    #[tracing::instrument(name = "HttpIdentitySource::verify", skip(self, secret))]
    async fn verify(
        &self,
        username: &Username,
        secret: &Secret<String>,
        remember: bool,
    ) -> SignOnOutcome {
        let url = match self.signon_url() {
            Ok(url) => url,
            Err(e) => return SignOnOutcome::Unavailable(e),
        };

        let request_body = SignOnRequest {
            user_login: username.as_str(),
            user_password: secret.expose_secret(),
            remember,
        };

        let response = match self
            .http_client
            .post(url)
            .header(API_TOKEN_HEADER, self.api_token.expose_secret())
            .json(&request_body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SignOnOutcome::Unavailable(e.to_string()),
        };

        let status = response.status();
        if status.is_success() {
            match response.json::<ExternalUser>().await {
                Ok(user) => SignOnOutcome::Authenticated(user),
                Err(e) => SignOnOutcome::Unavailable(format!("malformed user record: {e}")),
            }
        } else if status.is_client_error() {
            match response.json::<ErrorResponse>().await {
                Ok(body) if !body.errors.is_empty() => SignOnOutcome::Rejected(body.errors),
                _ => SignOnOutcome::Unavailable(format!("{status} without error messages")),
            }
        } else {
            SignOnOutcome::Unavailable(format!("identity source responded with {status}"))
        }
    }

    #[tracing::instrument(name = "HttpIdentitySource::lookup_by_username", skip(self))]
    async fn lookup_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<ExternalUser>, IdentitySourceError> {
        let url = self
            .user_url(username)
            .map_err(IdentitySourceError::Unreachable)?;

        let response = self
            .http_client
            .get(url)
            .header(API_TOKEN_HEADER, self.api_token.expose_secret())
            .send()
            .await
            .map_err(|e| IdentitySourceError::Unreachable(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<ExternalUser>()
                .await
                .map(Some)
                .map_err(|e| IdentitySourceError::UnexpectedResponse(e.to_string())),
            status => Err(IdentitySourceError::UnexpectedResponse(status.to_string())),
        }
    }
}

#[derive(Serialize, Debug)]
struct SignOnRequest<'a> {
    user_login: &'a str,
    user_password: &'a str,
    remember: bool,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}
