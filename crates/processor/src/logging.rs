//! Logging setup
//!
//! Installs a global `tracing` subscriber according to the observability
//! configuration. `RUST_LOG` takes precedence over the configured level.

use crate::error::{ProcessorError, Result};
use event_exporter_config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Build the log filter from `RUST_LOG` or the configured level
pub fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ProcessorError::Logging(format!("invalid log level '{}': {}", config.log_level, e)))
}

/// Install the global subscriber.
///
/// Fails if the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| ProcessorError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_from_config() {
        let config = ObservabilityConfig {
            log_level: "event_exporter_processor=debug".to_string(),
            json_logging: false,
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn test_init_twice_fails() {
        let config = ObservabilityConfig::default();
        let _ = init_logging(&config);

        assert!(matches!(init_logging(&config), Err(ProcessorError::Logging(_))));
    }
}
