//! Prometheus event sink
//!
//! Maps every event onto the gauge of its object's kind. For each reason
//! configured for the kind, the series matching the event's reason is set
//! to the event count and all other reasons' series for the same object
//! are deleted, so an object has at most one active reason series at a
//! time.
//!
//! Objects that stop producing events keep their last series until a later
//! event supersedes it.

use super::EventSink;
use crate::error::Result;
use crate::metrics::{EventMetrics, KindMetrics, MetricsRegistry};
use event_exporter_config::PrometheusSinkConfig;
use event_exporter_types::{Event, ObjectReference};
use tracing::{debug, info};

/// Sink exporting event counts as Prometheus gauges
#[derive(Debug, Clone)]
pub struct PrometheusSink {
    metrics: EventMetrics,
}

impl PrometheusSink {
    /// Validate `config` and register the per-kind gauges with `registry`
    pub fn new(config: &PrometheusSinkConfig, registry: &MetricsRegistry) -> Result<Self> {
        info!("Initializing new Prometheus sink");
        config.validate()?;
        let metrics = EventMetrics::build(config, registry)?;
        Ok(Self { metrics })
    }

    /// Create a sink over already built metrics
    pub fn from_metrics(metrics: EventMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &EventMetrics {
        &self.metrics
    }

    /// Apply one event to the gauges.
    ///
    /// Events for kinds without a configured reason filter are ignored.
    pub fn route(&self, event: &Event) {
        let Some(kind) = self.metrics.get(event.kind()) else {
            return;
        };

        for reason in kind.reasons() {
            if *reason == event.reason {
                set_event_count(kind, &event.involved_object, reason, event.count);
            } else {
                delete_event_count(kind, &event.involved_object, reason);
            }
        }
    }
}

impl EventSink for PrometheusSink {
    fn send(&self, event: &Event) {
        self.route(event);
    }

    fn close(&self) {
        debug!("Closing Prometheus sink");
    }
}

/// Set the series for `(object, reason)` to `count`
pub fn set_event_count(kind: &KindMetrics, object: &ObjectReference, reason: &str, count: i32) {
    let labels = kind.labels_for(object, reason);
    debug!(metric = kind.metric_name(), labels = ?labels.as_slice(), "Setting event count metric");
    kind.gauge().set(&labels, f64::from(count));
}

/// Delete the series for `(object, reason)` if present
pub fn delete_event_count(kind: &KindMetrics, object: &ObjectReference, reason: &str) {
    let labels = kind.labels_for(object, reason);
    debug!(metric = kind.metric_name(), labels = ?labels.as_slice(), "Deleting event count metric");
    kind.gauge().delete(&labels);
}
