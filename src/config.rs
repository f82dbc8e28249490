//! Application configuration loaded from environment variables.
//!
//! Every variable is read with the `TEXTOPS_` prefix, e.g. `TEXTOPS_PORT`.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

/// Prefix shared by all configuration variables.
pub const ENV_PREFIX: &str = "TEXTOPS_";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address to bind the HTTP server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug mode: crate logs at debug level.
    #[serde(default)]
    pub debug: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    // === Request Limits ===
    /// Largest `/generate` output, in bytes.
    #[serde(default = "default_max_generated_bytes")]
    pub max_generated_bytes: usize,

    // === Middleware ===
    /// Allow cross-origin requests from any origin.
    #[serde(default)]
    pub cors_permissive: bool,

    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_generated_bytes() -> usize {
    1024 * 1024 // 1 MiB
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            log_level: default_log_level(),
            log_json: false,
            max_generated_bytes: default_max_generated_bytes(),
            cors_permissive: false,
            metrics_enabled: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX).from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.parse::<IpAddr>().is_err() {
            return Err(format!(
                "TEXTOPS_HOST must be an IP address, got '{}'",
                self.host
            ));
        }

        if self.max_generated_bytes == 0 {
            return Err("TEXTOPS_MAX_GENERATED_BYTES must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| format!("invalid host '{}': {}", self.host, e))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
