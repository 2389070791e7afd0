//! Metrics registry for event gauges
//!
//! Wraps a `prometheus_client` registry behind a lock and keeps track of
//! the registered metric names so duplicates fail at startup instead of
//! producing a broken exposition.

use super::{MetricsError, Result};
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use prometheus_client::registry::{Metric, Registry};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;

static METRIC_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*$").expect("valid regex"));

/// Thread-safe registry for Prometheus metrics
///
/// Cloning is cheap and yields a handle to the same underlying registry.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Arc<RwLock<Registry>>,
    names: Arc<Mutex<BTreeSet<String>>>,
}

impl MetricsRegistry {
    /// Create a new metrics registry
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            names: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }

    /// Get a reference to the internal registry
    pub fn registry(&self) -> Arc<RwLock<Registry>> {
        self.registry.clone()
    }

    /// Register a metric under `name`.
    ///
    /// `help` is given without a trailing period; the encoder appends one.
    /// Fails if the name is not a valid metric name or is already taken.
    pub fn register(
        &self,
        name: &str,
        help: impl Into<String>,
        metric: impl Metric,
    ) -> Result<()> {
        if !METRIC_NAME_PATTERN.is_match(name) {
            return Err(MetricsError::InvalidMetricName(name.to_string()));
        }

        let mut names = self.names.lock();
        if !names.insert(name.to_string()) {
            return Err(MetricsError::DuplicateMetric(name.to_string()));
        }

        self.registry.write().register(name, help, metric);
        Ok(())
    }

    /// Names of all metrics registered so far, sorted
    pub fn registered_names(&self) -> Vec<String> {
        self.names.lock().iter().cloned().collect()
    }

    /// Encode metrics in Prometheus text format
    pub fn encode(&self) -> Result<String> {
        let registry = self.registry.read();
        let mut buffer = String::new();

        prometheus_client::encoding::text::encode(&mut buffer, &registry)
            .map_err(|e| MetricsError::EncodingError(e.to_string()))?;

        Ok(buffer)
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("names", &*self.names.lock())
            .finish()
    }
}
