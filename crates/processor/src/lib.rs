//! Event-to-metric translation for the event exporter
//!
//! This crate turns cluster lifecycle events into Prometheus gauge series:
//! one gauge family per configured object kind, one series per
//! `(object, reason)` pair, holding the latest event count.
//!
//! ```ignore
//! use event_exporter_processor::{EventSink, MetricsRegistry, PrometheusSink};
//!
//! let registry = MetricsRegistry::new();
//! let sink = PrometheusSink::new(&config.prometheus, &registry)?;
//! sink.send(&event);
//! let exposition = registry.encode()?;
//! ```

pub mod error;
pub mod logging;
pub mod metrics;
pub mod sink;

pub use error::{ProcessorError, Result as ProcessorResult};

pub use metrics::{
    build_labels, escape_label_value, metric_label_name, sanitize_label_name, EventMetrics,
    GaugeVec, KindMetrics, LabelSet, MetricsError, MetricsRegistry,
};

pub use sink::{EventSink, PrometheusSink};

pub use logging::init_logging;
