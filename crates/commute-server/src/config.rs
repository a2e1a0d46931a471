//! Server configuration from environment.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub ors_base_url: String,
    pub ors_api_key: String,
    pub elevation_primary_url: String,
    pub elevation_fallback_url: String,
    /// Maximum spacing between densified route points, meters.
    pub densify_step_m: f64,
    /// Points per elevation request.
    pub elevation_chunk_size: usize,
    /// Pause between consecutive elevation chunks.
    pub elevation_chunk_delay: Duration,
    pub elevation_retry_attempts: u32,
    pub elevation_retry_base_delay: Duration,
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env_parsed("COMMUTE_PORT", 3000),
            ors_base_url: env::var("COMMUTE_ORS_URL")
                .unwrap_or_else(|_| "https://api.openrouteservice.org".to_string()),
            ors_api_key: env::var("ORS_API_KEY").unwrap_or_default(),
            elevation_primary_url: env::var("COMMUTE_ELEVATION_URL")
                .unwrap_or_else(|_| "https://api.open-elevation.com/api/v1/lookup".to_string()),
            elevation_fallback_url: env::var("COMMUTE_ELEVATION_FALLBACK_URL")
                .unwrap_or_else(|_| "https://elevation-api.io/api/elevation".to_string()),
            densify_step_m: env_parsed(
                "COMMUTE_DENSIFY_STEP_M",
                commute_core::geodesy::DEFAULT_STEP_M,
            ),
            elevation_chunk_size: env_parsed("COMMUTE_ELEVATION_CHUNK_SIZE", 50),
            elevation_chunk_delay: Duration::from_millis(env_parsed(
                "COMMUTE_ELEVATION_CHUNK_DELAY_MS",
                2000,
            )),
            elevation_retry_attempts: env_parsed("COMMUTE_ELEVATION_RETRIES", 3),
            elevation_retry_base_delay: Duration::from_millis(env_parsed(
                "COMMUTE_ELEVATION_RETRY_BASE_MS",
                1000,
            )),
        }
    }
}
