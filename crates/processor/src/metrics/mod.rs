//! Prometheus metrics for cluster events
//!
//! This module owns the gauge families exported for each monitored object
//! kind, the label schema attached to them, and the registry they are
//! encoded from.

pub mod event_metrics;
pub mod gauge;
pub mod labels;
pub mod registry;

pub use event_metrics::{effective_label_keys, metric_name, EventMetrics, KindMetrics};
pub use gauge::{EventGaugeFamily, GaugeVec, SeriesLabels};
pub use labels::{
    build_labels, escape_label_value, metric_label_name, metric_label_names, sanitize_label_name,
    LabelNames, LabelSet, MANDATORY_LABELS,
};
pub use registry::MetricsRegistry;

use thiserror::Error;

/// Errors that can occur in the metrics subsystem
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Metric already registered: {0}")]
    DuplicateMetric(String),

    #[error("Invalid metric name: {0}")]
    InvalidMetricName(String),

    #[error("Label keys {:?} and {:?} both map to label {label} on metric {metric}", .keys.0, .keys.1)]
    DuplicateLabel {
        metric: String,
        label: String,
        keys: (String, String),
    },

    #[error("Metric encoding error: {0}")]
    EncodingError(String),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
