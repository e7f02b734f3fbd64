pub mod env {
    pub const ENV_PREFIX: &str = "BRIDGEKEEPER";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const DEFAULT_SETTINGS_FILE: &str = "bridgekeeper.json";
pub const DEFAULT_REMEMBER_FIELD: &str = "_remember_me";

pub mod identity_source {
    pub const BASE_URL: &str = "http://localhost:8080/wp-json/bridge/v1/";
    pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    pub const API_TOKEN_HEADER: &str = "X-Bridge-Token";
    pub const SIGNON_PATH: &str = "signon";
    pub const USERS_PATH: &str = "users/";
}
