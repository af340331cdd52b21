//! Subscriber initialisation and logging macros.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter for `config`.
///
/// # Errors
///
/// `TelemetryError::InvalidFilter` if the directive string does not parse.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::InvalidFilter(format!("{}: {e}", config.log_level)))
}

/// Install the global subscriber.
///
/// # Errors
///
/// - `InvalidFilter` if `log_level` does not parse
/// - `AlreadyInitialized` if a global subscriber is already set
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    let result = match (config.console_output, config.json_logs) {
        (false, _) => tracing_subscriber::registry().with(env_filter).try_init(),
        (true, true) => {
            // JSON output for containers/production
            let json_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_current_span(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer)
                .try_init()
        }
        (true, false) => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
    };
    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "logging initialised"
    );
    Ok(())
}

/// Install a subscriber that writes through the test harness capture.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    let config = TelemetryConfig::for_tests();
    let filter = build_filter(&config).unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Log a chore-related event with standard fields.
///
/// ```ignore
/// log_chore_event!(info, id, "chore settled", reward = %reward);
/// ```
#[macro_export]
macro_rules! log_chore_event {
    ($level:ident, $chore_id:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::__tracing::$level!(
            component = $crate::COMPONENT,
            chore_id = %$chore_id,
            $($($field)*,)?
            $msg
        )
    };
}
