//! Event sink adapters

mod json;

pub use json::JsonEventSink;
