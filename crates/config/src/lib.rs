//! Configuration management for the event exporter

use figment::{Figment, providers::{Format, Yaml, Env}};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Metric name prefix used when none is configured
pub const DEFAULT_METRICS_NAME_PREFIX: &str = "event_exporter_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main exporter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Prometheus sink configuration
    #[serde(default)]
    pub prometheus: PrometheusSinkConfig,

    /// Observability settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl ExporterConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        // Override with environment variables (prefixed with EVENT_EXPORTER_)
        figment = figment.merge(Env::prefixed("EVENT_EXPORTER_").split("__"));

        figment.extract().map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Figment::new()
            .merge(Yaml::string(yaml))
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.prometheus.validate()
    }
}

/// Prometheus sink configuration
///
/// Field names follow the exporter's YAML schema
/// (`eventsMetricsNamePrefix`, `reasonFilter`, `labelFilter`). The lowercase
/// aliases match keys coming from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusSinkConfig {
    /// Prefix prepended to every metric name, `event_exporter_` when empty
    #[serde(default, alias = "eventsmetricsnameprefix")]
    pub events_metrics_name_prefix: String,

    /// Kind -> reasons to track. Only kinds listed here get a metric.
    #[serde(default, alias = "reasonfilter")]
    pub reason_filter: BTreeMap<String, Vec<String>>,

    /// Kind -> object label keys to attach as extra metric labels
    #[serde(default, alias = "labelfilter")]
    pub label_filter: BTreeMap<String, Vec<String>>,
}

impl PrometheusSinkConfig {
    /// Create an empty sink configuration with the default prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metric name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.events_metrics_name_prefix = prefix.into();
        self
    }

    /// Track the given reasons for a kind
    pub fn with_reasons<I, S>(mut self, kind: impl Into<String>, reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reason_filter
            .insert(kind.into(), reasons.into_iter().map(Into::into).collect());
        self
    }

    /// Attach the given object labels to a kind's metric
    pub fn with_labels<I, S>(mut self, kind: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_filter
            .insert(kind.into(), labels.into_iter().map(Into::into).collect());
        self
    }

    /// Effective metric name prefix
    pub fn metrics_name_prefix(&self) -> &str {
        if self.events_metrics_name_prefix.is_empty() {
            DEFAULT_METRICS_NAME_PREFIX
        } else {
            &self.events_metrics_name_prefix
        }
    }

    /// Configured reasons for a kind, empty if the kind is not tracked
    pub fn reasons_for(&self, kind: &str) -> &[String] {
        self.reason_filter.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Configured extra label keys for a kind
    pub fn labels_for(&self, kind: &str) -> &[String] {
        self.label_filter.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Validate the sink configuration
    pub fn validate(&self) -> Result<()> {
        let prefix = &self.events_metrics_name_prefix;
        if !prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        {
            return Err(ConfigError::ValidationError(format!(
                "eventsMetricsNamePrefix '{}' contains characters outside [a-zA-Z0-9_:]",
                prefix
            )));
        }

        // Empty reason strings are allowed and routed like any other reason.
        if self.reason_filter.keys().any(|kind| kind.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "reasonFilter contains an empty kind".to_string(),
            ));
        }

        Ok(())
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,

    /// Enable structured JSON logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}
