//! Label management for event metrics
//!
//! Object label keys are arbitrary strings supplied by the event source.
//! This module turns them into backend-safe metric label names and builds
//! the label set identifying one series of a kind's gauge.

use event_exporter_types::ObjectReference;
use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_CHARS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid regex"));

static CAMEL_CASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Label names attached to every event series
pub struct LabelNames;

impl LabelNames {
    pub const NAME: &'static str = "name";
    pub const NAMESPACE: &'static str = "namespace";
    pub const REASON: &'static str = "reason";

    /// Prefix for label names derived from object labels
    pub const OBJECT_LABEL_PREFIX: &'static str = "label_";
}

/// The labels every series carries, in emission order
pub const MANDATORY_LABELS: [&str; 3] = [LabelNames::NAME, LabelNames::NAMESPACE, LabelNames::REASON];

/// Returns true for `name`, `namespace` and `reason`
pub fn is_mandatory_label(key: &str) -> bool {
    MANDATORY_LABELS.contains(&key)
}

/// Sanitize an arbitrary label key into a metric label name fragment.
///
/// Characters outside `[a-zA-Z0-9_]` become `_`, camelCase boundaries are
/// split with `_`, and the result is lower-cased. Follows the
/// kube-state-metrics label name format.
pub fn sanitize_label_name(raw: &str) -> String {
    let replaced = INVALID_CHARS_PATTERN.replace_all(raw, "_");
    let split = CAMEL_CASE_PATTERN.replace_all(&replaced, "${1}_${2}");
    split.to_ascii_lowercase()
}

/// Map a configured label key to the metric label name it is exported as.
///
/// Mandatory keys are returned unchanged; anything else is sanitized and
/// prefixed with `label_`.
pub fn metric_label_name(key: &str) -> String {
    if is_mandatory_label(key) {
        key.to_string()
    } else {
        format!("{}{}", LabelNames::OBJECT_LABEL_PREFIX, sanitize_label_name(key))
    }
}

/// Map a list of configured label keys to metric label names
pub fn metric_label_names<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    keys.iter().map(|k| metric_label_name(k.as_ref())).collect()
}

/// Build the label set for one series.
///
/// `name`, `namespace` and `reason` always come first, followed by every
/// non-mandatory key of `label_keys` in order. An object lacking one of
/// those labels gets an empty value.
pub fn build_labels<S: AsRef<str>>(
    label_keys: &[S],
    object: &ObjectReference,
    reason: &str,
) -> LabelSet {
    let mut labels = LabelSet::with_capacity(MANDATORY_LABELS.len() + label_keys.len())
        .with(LabelNames::NAME, object.name.as_str())
        .with(LabelNames::NAMESPACE, object.namespace.as_str())
        .with(LabelNames::REASON, reason);

    for key in label_keys.iter().map(AsRef::as_ref) {
        if !is_mandatory_label(key) {
            labels = labels.with(metric_label_name(key), object.label_or_empty(key));
        }
    }

    labels
}

/// Escape a label value for the text exposition format.
///
/// `prometheus-client` writes label values verbatim, so backslash, double
/// quote and newline are escaped before a value enters a gauge family.
pub fn escape_label_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// An ordered set of metric labels
///
/// Equality is order-sensitive, so label sets must always be built in the
/// same key order to address the same series. Values are held in their
/// escaped exposition form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LabelSet {
    labels: Vec<(String, String)>,
}

impl LabelSet {
    /// Create a new empty label set
    pub fn new() -> Self {
        Self { labels: Vec::new() }
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
        }
    }

    /// Add a label to the set, escaping its value
    pub fn with(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.labels.push((name.into(), escape_label_value(value.as_ref())));
        self
    }

    /// Escaped value of a label, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Label names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|(k, _)| k.as_str())
    }

    /// Get all labels as a slice
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.labels
    }

    /// Labels in the representation used as a gauge family key.
    ///
    /// Returns `&Vec` rather than a slice because `Family::get_or_create` and
    /// `Family::remove` take `&S` with `S = Vec<(String, String)>`.
    pub fn pairs(&self) -> &Vec<(String, String)> {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<Vec<(String, String)>> for LabelSet {
    fn from(labels: Vec<(String, String)>) -> Self {
        labels
            .into_iter()
            .fold(Self::new(), |set, (name, value)| set.with(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_backend_safe(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    #[test]
    fn test_sanitize_camel_case() {
        assert_eq!(sanitize_label_name("fooBar"), "foo_bar");
        assert_eq!(sanitize_label_name("podTemplateHash"), "pod_template_hash");
        assert_eq!(sanitize_label_name("v2Beta"), "v2_beta");
    }

    #[test]
    fn test_sanitize_invalid_chars() {
        assert_eq!(sanitize_label_name("a.b-c"), "a_b_c");
        assert_eq!(sanitize_label_name("app.kubernetes.io/name"), "app_kubernetes_io_name");
        assert_eq!(sanitize_label_name("!!!"), "___");
        assert_eq!(sanitize_label_name(""), "");
    }

    #[test]
    fn test_sanitize_uppercase_runs() {
        assert_eq!(sanitize_label_name("ABC"), "abc");
        assert_eq!(sanitize_label_name("myURL"), "my_url");
    }

    #[test]
    fn test_sanitize_output_charset() {
        let inputs = [
            "fooBar",
            "a.b-c",
            "app.kubernetes.io/managed-by",
            "Ünïcödé",
            "with space",
            "tab\there",
            "MixedCASE_and_123",
            "",
        ];

        for input in inputs {
            let out = sanitize_label_name(input);
            assert!(is_backend_safe(&out), "{:?} -> {:?}", input, out);
        }
    }

    #[test]
    fn test_sanitize_idempotent() {
        for input in ["fooBar", "a.b-c", "helm.sh/chart", "XMLHttpRequest", "k8s-app"] {
            let once = sanitize_label_name(input);
            assert_eq!(sanitize_label_name(&once), once);
        }
    }

    #[test]
    fn test_metric_label_name() {
        assert_eq!(metric_label_name("name"), "name");
        assert_eq!(metric_label_name("namespace"), "namespace");
        assert_eq!(metric_label_name("reason"), "reason");
        assert_eq!(metric_label_name("test_label"), "label_test_label");
        assert_eq!(metric_label_name("app.kubernetes.io/name"), "label_app_kubernetes_io_name");
        assert_eq!(metric_label_name("Name"), "label_name");
    }

    #[test]
    fn test_metric_label_names() {
        let names = metric_label_names(&["name", "namespace", "reason", "fooBar"]);
        assert_eq!(names, vec!["name", "namespace", "reason", "label_foo_bar"]);
    }

    #[test]
    fn test_build_labels() {
        let obj = ObjectReference::new("Pod", "p1", "ns").with_label("test_label", "v1");
        let labels = build_labels(&["test_label"], &obj, "Starting");

        assert_eq!(
            labels.as_slice(),
            &[
                ("name".to_string(), "p1".to_string()),
                ("namespace".to_string(), "ns".to_string()),
                ("reason".to_string(), "Starting".to_string()),
                ("label_test_label".to_string(), "v1".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_labels_missing_label() {
        let obj = ObjectReference::new("Pod", "p1", "ns");
        let labels = build_labels(&["team"], &obj, "Killing");

        assert_eq!(labels.get("label_team"), Some(""));
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn test_build_labels_skips_mandatory_keys() {
        let obj = ObjectReference::new("Pod", "p1", "ns")
            .with_label("name", "from-labels")
            .with_label("app", "web");
        let labels = build_labels(&["name", "namespace", "reason", "app"], &obj, "Pulled");

        assert_eq!(labels.get("name"), Some("p1"));
        assert_eq!(
            labels.names().collect::<Vec<_>>(),
            vec!["name", "namespace", "reason", "label_app"]
        );
    }

    #[test]
    fn test_build_labels_ignores_unconfigured_object_labels() {
        let obj = ObjectReference::new("Pod", "p1", "ns")
            .with_label("app", "web")
            .with_label("pod-template-hash", "abc123");
        let labels = build_labels(&["app"], &obj, "Pulled");

        assert_eq!(labels.len(), 4);
        assert_eq!(labels.get("label_pod_template_hash"), None);
    }

    #[test]
    fn test_escape_label_value() {
        assert_eq!(escape_label_value("web-0"), "web-0");
        assert_eq!(escape_label_value(""), "");
        assert_eq!(escape_label_value("p\"1"), "p\\\"1");
        assert_eq!(escape_label_value("a\\b"), "a\\\\b");
        assert_eq!(escape_label_value("a\nb"), "a\\nb");
    }

    #[test]
    fn test_build_labels_escapes_values() {
        let obj = ObjectReference::new("Pod", "p\"1", "ns").with_label("k", "a\\b\nc");
        let labels = build_labels(&["k"], &obj, "Started");

        assert_eq!(labels.get("name"), Some(r#"p\"1"#));
        assert_eq!(labels.get("label_k"), Some(r"a\\b\nc"));
        assert!(labels.as_slice().iter().all(|(_, v)| !v.contains('\n')));
    }

    #[test]
    fn test_build_labels_deterministic() {
        let a = ObjectReference::new("Pod", "p1", "ns")
            .with_label("app", "web")
            .with_label("tier", "front")
            .with_label("unrelated", "x");
        let b = ObjectReference::new("Pod", "p1", "ns")
            .with_label("tier", "front")
            .with_label("app", "web");

        let keys = ["tier", "app"];
        assert_eq!(build_labels(&keys, &a, "Started"), build_labels(&keys, &b, "Started"));
        assert_ne!(build_labels(&keys, &a, "Started"), build_labels(&keys, &a, "BackOff"));
    }
}
