//! Telemetry configuration from environment variables.

use std::env;

/// Default service name.
pub const DEFAULT_SERVICE_NAME: &str = "chore-escrow";

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup record.
    pub service_name: String,

    /// `EnvFilter` directive string (e.g. `info,chore_escrow=debug`).
    pub log_level: String,

    /// Whether to write to stdout at all.
    pub console_output: bool,

    /// Whether to emit JSON instead of human-readable lines.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CHORE_SERVICE_NAME`: Service name (default: chore-escrow)
    /// - `CHORE_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `CHORE_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `CHORE_JSON_LOGS`: Enable JSON logs (default: false)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TelemetryConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            service_name: lookup("CHORE_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),

            log_level: lookup("CHORE_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),

            console_output: lookup("CHORE_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: lookup("CHORE_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Configuration for test binaries: debug filter, plain output.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            service_name: format!("{DEFAULT_SERVICE_NAME}-tests"),
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }
}
