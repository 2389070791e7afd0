//! Gauge vector abstraction
//!
//! The event router only needs to set and delete labeled series. Keeping
//! that behind a trait lets tests observe the exact calls made.

use super::labels::LabelSet;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use std::fmt;
use std::sync::atomic::AtomicU64;

/// Label representation used as the family key
pub type SeriesLabels = Vec<(String, String)>;

/// Floating point gauge family keyed by an ordered label list
pub type EventGaugeFamily = Family<SeriesLabels, Gauge<f64, AtomicU64>>;

/// A set of gauges addressed by label set
pub trait GaugeVec: Send + Sync + fmt::Debug {
    /// Create or update the series for `labels`
    fn set(&self, labels: &LabelSet, value: f64);

    /// Remove the series for `labels`. Returns whether a series was removed.
    fn delete(&self, labels: &LabelSet) -> bool;
}

impl GaugeVec for EventGaugeFamily {
    fn set(&self, labels: &LabelSet, value: f64) {
        self.get_or_create(labels.pairs()).set(value);
    }

    fn delete(&self, labels: &LabelSet) -> bool {
        self.remove(labels.pairs())
    }
}
