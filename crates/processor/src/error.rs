//! Error types for the event processor

use crate::metrics::MetricsError;
use event_exporter_config::ConfigError;
use thiserror::Error;

/// Main processor error type
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Metric registration and encoding errors
    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),

    /// Logging could not be initialized
    #[error("logging error: {0}")]
    Logging(String),
}

/// Result type for processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;
