use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub voting: VotingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Upstream cat API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// API key sent as the `x-api-key` header (required).
    pub api_key: String,
    /// Base URL (default: https://api.thecatapi.com/v1).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Sub id attached to votes and favourites.
    #[serde(default = "default_sub_id")]
    pub sub_id: String,
    /// How many images to request for a breed profile (default: 8).
    #[serde(default = "default_breed_image_limit")]
    pub breed_image_limit: u32,
}

fn default_base_url() -> String {
    "https://api.thecatapi.com/v1".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_sub_id() -> String {
    "user-123".to_string()
}

fn default_breed_image_limit() -> u32 {
    8
}

/// Voting behavior configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VotingConfig {
    /// Reject unrecognized `action` values instead of falling through
    /// to a plain image fetch (default: false).
    #[serde(default)]
    pub strict_actions: bool,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub upstream: SanitizedUpstreamConfig,
    pub voting: VotingConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedUpstreamConfig {
    pub api_key_set: bool,
    pub base_url: String,
    pub timeout_secs: u32,
    pub sub_id: String,
    pub breed_image_limit: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            upstream: SanitizedUpstreamConfig {
                api_key_set: !config.upstream.api_key.is_empty(),
                base_url: config.upstream.base_url.clone(),
                timeout_secs: config.upstream.timeout_secs,
                sub_id: config.upstream.sub_id.clone(),
                breed_image_limit: config.upstream.breed_image_limit,
            },
            voting: config.voting.clone(),
        }
    }
}
