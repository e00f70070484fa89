//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Lifetime of a re-issued session token.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: i64,
    /// Session tokens expiring within this many seconds get re-issued.
    #[serde(default = "default_session_refresh_window_secs")]
    pub session_refresh_window_secs: i64,
}

fn default_session_ttl_secs() -> i64 {
    3600
}

fn default_session_refresh_window_secs() -> i64 {
    900
}
