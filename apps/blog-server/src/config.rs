//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "redis")]
use scribe_infra::RedisConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub telemetry: TelemetryConfig,
    #[cfg(feature = "redis")]
    pub redis: RedisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            telemetry: TelemetryConfig::from_env(),
            #[cfg(feature = "redis")]
            redis: RedisConfig::from_env(),
        }
    }
}
