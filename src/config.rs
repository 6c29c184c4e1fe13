//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP port for the todo API.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP port for the Prometheus exposition endpoint.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// SQLite database path.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Per-request deadline in milliseconds for storage calls.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    8080
}

fn default_metrics_port() -> u16 {
    8082
}

fn default_database_path() -> String {
    "todos.db".to_string()
}

fn default_idle_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == self.metrics_port {
            return Err("PORT and METRICS_PORT must differ".to_string());
        }

        if self.idle_timeout_ms == 0 {
            return Err("IDLE_TIMEOUT_MS must be greater than zero".to_string());
        }

        if self.database_path.is_empty() {
            return Err("DATABASE_PATH must not be empty".to_string());
        }

        Ok(())
    }

    /// The per-request deadline as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            metrics_port: default_metrics_port(),
            database_path: default_database_path(),
            idle_timeout_ms: default_idle_timeout_ms(),
            rust_log: default_log_level(),
        }
    }
}
