//! Shared helpers for sink integration tests

#![allow(dead_code)]

use event_exporter_types::{Event, ObjectReference};

/// Build an event for an object with the given labels
pub fn event(
    kind: &str,
    name: &str,
    namespace: &str,
    labels: &[(&str, &str)],
    reason: &str,
    count: i32,
) -> Event {
    let object = labels
        .iter()
        .fold(ObjectReference::new(kind, name, namespace), |obj, (k, v)| obj.with_label(*k, *v));
    Event::new(object, reason, count)
}

/// Render a series selector the way the text exposition writes it
pub fn series_key(metric: &str, labels: &[(&str, &str)]) -> String {
    let rendered: Vec<String> = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect();
    format!("{}{{{}}}", metric, rendered.join(","))
}

/// Value of a series in an encoded exposition, `None` if absent
pub fn series_value(exposition: &str, metric: &str, labels: &[(&str, &str)]) -> Option<f64> {
    let key = series_key(metric, labels);
    exposition.lines().find_map(|line| {
        line.strip_prefix(&key)
            .and_then(|rest| rest.strip_prefix(' '))
            .and_then(|value| value.trim().parse().ok())
    })
}

/// Number of series lines of `metric` in an encoded exposition
pub fn series_count(exposition: &str, metric: &str) -> usize {
    let prefix = format!("{}{{", metric);
    exposition
        .lines()
        .filter(|line| line.starts_with(&prefix))
        .count()
}
