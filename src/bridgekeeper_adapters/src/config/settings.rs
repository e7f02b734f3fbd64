use std::{collections::HashMap, path::Path, time::Duration};

use bridgekeeper_core::{DEFAULT_ROLE_PREFIX, RoleMapper};
use config::{Config, Environment, File, FileFormat};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::constants::{DEFAULT_SETTINGS_FILE, env, identity_source};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Config(#[from] config::ConfigError),
}

/// Settings for the bridge, layered from built-in defaults, an optional
/// JSON file and `BRIDGEKEEPER__*` environment variables (highest wins).
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeSettings {
    pub role_prefix: String,
    pub remember_field: Option<String>,
    pub refresh_resolved_users: bool,
    pub identity_source: IdentitySourceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySourceSettings {
    pub base_url: String,
    pub api_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl IdentitySourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

impl BridgeSettings {
    /// Load settings from `bridgekeeper.json` in the working directory, if
    /// present, after reading `.env`.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(DEFAULT_SETTINGS_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::build(path.as_ref(), None)
    }

    fn build(
        path: &Path,
        env_override: Option<HashMap<String, String>>,
    ) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .set_default("role_prefix", DEFAULT_ROLE_PREFIX)?
            .set_default("refresh_resolved_users", false)?
            .set_default("identity_source.base_url", identity_source::BASE_URL)?
            .set_default("identity_source.api_token", "")?
            .set_default(
                "identity_source.timeout_in_millis",
                identity_source::TIMEOUT_IN_MILLIS,
            )?
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(env_override),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn role_mapper(&self) -> RoleMapper {
        RoleMapper::new(self.role_prefix.clone())
    }
}
