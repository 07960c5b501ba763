use std::env;
use tracing::warn;

pub const DEFAULT_REGION: &str = "sa-east-1";
pub const DEFAULT_SECRET_NAME: &str = "google/places";
pub const DEFAULT_CACHE_MAX_AGE: u64 = 21600;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_PLACES_API_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_SECRETS_EXTENSION_URL: &str = "http://localhost:2773";

/// Process-wide settings, read once when the execution context starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub region: String,
    pub secret_name: String,
    pub place_id: Option<String>,
    /// Freshness window and advertised `Cache-Control` max-age, in seconds.
    /// Zero disables caching.
    pub cache_max_age: u64,
    pub allowed_origin: String,
    pub places_api_url: String,
    pub secrets_extension_url: String,
    pub session_token: Option<String>,
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            secret_name: get("SECRET_NAME").unwrap_or_else(|| DEFAULT_SECRET_NAME.to_string()),
            place_id: get("GOOGLE_PLACE_ID").or_else(|| get("PLACE_ID")),
            cache_max_age: Self::parse_max_age(get("CACHE_MAX_AGE")),
            allowed_origin: get("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            places_api_url: get("PLACES_API_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_API_URL.to_string()),
            secrets_extension_url: get("SECRETS_EXTENSION_URL")
                .unwrap_or_else(|| DEFAULT_SECRETS_EXTENSION_URL.to_string()),
            session_token: get("AWS_SESSION_TOKEN"),
        }
    }

    fn parse_max_age(raw: Option<String>) -> u64 {
        match raw {
            None => DEFAULT_CACHE_MAX_AGE,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) => secs,
                Err(_) => {
                    warn!(
                        "Invalid CACHE_MAX_AGE {:?}, using {}",
                        value, DEFAULT_CACHE_MAX_AGE
                    );
                    DEFAULT_CACHE_MAX_AGE
                }
            },
        }
    }
}
