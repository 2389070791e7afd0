//! Per-kind event count gauges
//!
//! One gauge family is created for every kind listed in the sink's reason
//! filter. The set of kinds is fixed at startup; events for other kinds are
//! never recorded.

use super::gauge::{EventGaugeFamily, GaugeVec};
use super::labels::{build_labels, is_mandatory_label, metric_label_names, LabelSet, MANDATORY_LABELS};
use super::registry::MetricsRegistry;
use super::{MetricsError, Result};
use event_exporter_config::PrometheusSinkConfig;
use event_exporter_types::ObjectReference;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Metric name for a kind: `<prefix><kind lowercased>_event_count`
pub fn metric_name(prefix: &str, kind: &str) -> String {
    format!("{}{}_event_count", prefix, kind.to_lowercase())
}

/// Mandatory label keys followed by the configured extras, without duplicates
pub fn effective_label_keys<S: AsRef<str>>(extra_keys: &[S]) -> Vec<String> {
    let mut keys: Vec<String> = MANDATORY_LABELS.iter().map(|k| k.to_string()).collect();

    for key in extra_keys.iter().map(AsRef::as_ref) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }

    keys
}

/// Gauge and label schema for one monitored kind
#[derive(Debug, Clone)]
pub struct KindMetrics {
    kind: String,
    metric_name: String,
    reasons: Vec<String>,
    label_keys: Vec<String>,
    gauge: Arc<dyn GaugeVec>,
}

impl KindMetrics {
    /// Assemble kind metrics around an existing gauge vector.
    ///
    /// `label_keys` are the raw configured keys; mandatory keys are added
    /// if missing.
    pub fn new(
        kind: impl Into<String>,
        metric_name: impl Into<String>,
        reasons: Vec<String>,
        label_keys: &[String],
        gauge: Arc<dyn GaugeVec>,
    ) -> Self {
        Self {
            kind: kind.into(),
            metric_name: metric_name.into(),
            reasons,
            label_keys: effective_label_keys(label_keys),
            gauge,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    /// Reasons tracked for this kind, in configuration order
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Raw label keys, mandatory keys first
    pub fn label_keys(&self) -> &[String] {
        &self.label_keys
    }

    /// Configured keys that are not mandatory
    pub fn extra_label_keys(&self) -> impl Iterator<Item = &str> {
        self.label_keys
            .iter()
            .map(String::as_str)
            .filter(|k| !is_mandatory_label(k))
    }

    /// Exported label names, in the order values are emitted
    pub fn metric_label_names(&self) -> Vec<String> {
        metric_label_names(&self.label_keys)
    }

    /// Label set addressing `object`'s series for `reason`
    pub fn labels_for(&self, object: &ObjectReference, reason: &str) -> LabelSet {
        build_labels(&self.label_keys, object, reason)
    }

    pub fn gauge(&self) -> &dyn GaugeVec {
        self.gauge.as_ref()
    }
}

/// Event count gauges for all configured kinds
#[derive(Debug, Clone, Default)]
pub struct EventMetrics {
    kinds: HashMap<String, KindMetrics>,
}

impl EventMetrics {
    /// Create and register one gauge family per configured kind.
    ///
    /// Registration failures (duplicate or invalid metric names, label keys
    /// that sanitize to the same name) are returned as errors; the caller
    /// is expected to abort startup.
    pub fn build(config: &PrometheusSinkConfig, registry: &MetricsRegistry) -> Result<Self> {
        let prefix = config.metrics_name_prefix();
        let mut kinds = HashMap::with_capacity(config.reason_filter.len());

        for kind in config.label_filter.keys() {
            if !config.reason_filter.contains_key(kind) {
                warn!(kind = %kind, "labelFilter entry has no matching reasonFilter entry, ignoring");
            }
        }

        for (kind, reasons) in &config.reason_filter {
            let name = metric_name(prefix, kind);
            let label_keys = effective_label_keys(config.labels_for(kind));
            check_label_names(&name, &label_keys)?;

            let family = EventGaugeFamily::default();
            registry.register(&name, format!("Event counts for {} resources", kind), family.clone())?;

            info!(
                metric = %name,
                kind = %kind,
                reasons = ?reasons,
                labels = ?label_keys,
                "Created event count metric"
            );

            let metrics = KindMetrics::new(kind.clone(), name, reasons.clone(), &label_keys, Arc::new(family));
            kinds.insert(kind.clone(), metrics);
        }

        Ok(Self { kinds })
    }

    /// Build from pre-assembled kind metrics
    pub fn from_kinds(kinds: impl IntoIterator<Item = KindMetrics>) -> Self {
        Self {
            kinds: kinds
                .into_iter()
                .map(|k| (k.kind.clone(), k))
                .collect(),
        }
    }

    /// Metrics for a kind, `None` if the kind is not monitored
    pub fn get(&self, kind: &str) -> Option<&KindMetrics> {
        self.kinds.get(kind)
    }

    /// Monitored kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

fn check_label_names(metric: &str, label_keys: &[String]) -> Result<()> {
    let names = metric_label_names(label_keys);
    for (i, name) in names.iter().enumerate() {
        if let Some(j) = names[..i].iter().position(|n| n == name) {
            return Err(MetricsError::DuplicateLabel {
                metric: metric.to_string(),
                label: name.clone(),
                keys: (label_keys[j].clone(), label_keys[i].clone()),
            });
        }
    }
    Ok(())
}
