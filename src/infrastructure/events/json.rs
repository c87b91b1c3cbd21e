//! JSON Event Sink
//!
//! Outputs resolve events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::Value;

use crate::domain::ports::{ResolveEvent, ResolveEventSink};

/// Event sink that writes one JSON object per line
pub struct JsonEventSink {
    command: &'static str,
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// JSON sink on stdout, tagging each event with `command`
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl ResolveEventSink for JsonEventSink {
    fn on_event(&self, event: ResolveEvent) {
        let mut json = match serde_json::to_value(&event) {
            Ok(json) => json,
            Err(_) => return,
        };
        if let Value::Object(map) = &mut json {
            map.insert("command".to_string(), Value::from(self.command));
        }
        self.write_event(json);
    }
}
