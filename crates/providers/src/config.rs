use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

pub const DEFAULT_HOTEL_API_BASE: &str = "https://api.makcorps.com/free";
pub const DEFAULT_SYNTH_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SYNTH_MODEL: &str = "gemini-2.0-flash-exp";

const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 6;
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Provider endpoints and credentials, read once at startup. A missing value
/// disables the corresponding tier instead of failing.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub travel_proxy_base: Option<String>,
    pub rail_api_base: Option<String>,
    pub legacy_train_base: Option<String>,
    pub hotel_api_base: String,
    pub hotel_api_token: Option<String>,
    pub synth_proxy_url: Option<String>,
    pub synth_api_base: String,
    pub synth_api_key: Option<String>,
    pub synth_model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            travel_proxy_base: env_opt("YATRI_TRAVEL_PROXY_BASE"),
            rail_api_base: env_opt("YATRI_RAIL_API_BASE"),
            legacy_train_base: env_opt("YATRI_TRAIN_API_BASE"),
            hotel_api_base: env_opt("YATRI_HOTEL_API_BASE")
                .unwrap_or_else(|| DEFAULT_HOTEL_API_BASE.to_string()),
            hotel_api_token: env_opt("YATRI_HOTEL_API_TOKEN"),
            synth_proxy_url: env_opt("YATRI_SYNTH_PROXY_URL"),
            synth_api_base: env_opt("YATRI_SYNTH_API_BASE")
                .unwrap_or_else(|| DEFAULT_SYNTH_API_BASE.to_string()),
            synth_api_key: env_opt("YATRI_SYNTH_API_KEY"),
            synth_model: env_opt("YATRI_SYNTH_MODEL")
                .unwrap_or_else(|| DEFAULT_SYNTH_MODEL.to_string()),
            connect_timeout: duration_env(
                "YATRI_HTTP_CONNECT_TIMEOUT_SECONDS",
                DEFAULT_CONNECT_TIMEOUT_SECONDS,
            ),
            request_timeout: duration_env(
                "YATRI_HTTP_TIMEOUT_SECONDS",
                DEFAULT_REQUEST_TIMEOUT_SECONDS,
            ),
        }
    }

    /// Disables every remote tier; only static fallback data is served.
    pub fn offline() -> Self {
        Self {
            travel_proxy_base: None,
            rail_api_base: None,
            legacy_train_base: None,
            hotel_api_base: DEFAULT_HOTEL_API_BASE.to_string(),
            hotel_api_token: None,
            synth_proxy_url: None,
            synth_api_base: DEFAULT_SYNTH_API_BASE.to_string(),
            synth_api_key: None,
            synth_model: DEFAULT_SYNTH_MODEL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECONDS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::offline()
    }
}

/// Every outbound call shares this client, so the connect and total timeouts
/// bound each provider's contribution to the fan-out barrier.
pub fn build_http_client(config: &ProviderConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .context("failed to build HTTP client")
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn duration_env(name: &str, default_seconds: u64) -> Duration {
    Duration::from_secs(
        env::var(name)
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(default_seconds),
    )
}
