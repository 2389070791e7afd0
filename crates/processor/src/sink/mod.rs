//! Event sinks
//!
//! A sink receives every event read from the cluster and decides what to do
//! with it. Sinks are synchronous and infallible per event.

pub mod prometheus;

pub use prometheus::PrometheusSink;

use event_exporter_types::Event;

/// Destination for cluster events
pub trait EventSink: Send + Sync {
    /// Handle one event
    fn send(&self, event: &Event);

    /// Release resources held by the sink
    fn close(&self);
}
