//! Core types for the event exporter
//!
//! This crate provides the event records consumed by the exporter sinks,
//! in the shape produced by the upstream cluster event watcher.

pub mod events;

pub use events::{Event, ObjectReference};
