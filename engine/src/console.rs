use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;

use crate::event::property_pairs;
use crate::{LogEvent, SOURCE_CONTEXT_PROPERTY, Sink};

/// How the console sink lays out each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleFormat {
    /// `LEVEL timestamp context message key=value ...`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Writes one line per event, to stderr unless told otherwise.
pub struct ConsoleSink {
    format: ConsoleFormat,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn new(format: ConsoleFormat) -> Self {
        Self::with_writer(format, Box::new(std::io::stderr()))
    }

    pub fn with_writer(format: ConsoleFormat, writer: Box<dyn Write + Send>) -> Self {
        Self {
            format,
            writer: Mutex::new(writer),
        }
    }

    pub fn format(&self) -> ConsoleFormat {
        self.format
    }

    fn render(&self, event: &LogEvent) -> String {
        match self.format {
            ConsoleFormat::Text => render_text(event),
            ConsoleFormat::Json => render_json(event),
        }
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, event: &LogEvent) {
        let line = self.render(event);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{line}");
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("format", &self.format)
            .finish()
    }
}

fn timestamp(event: &LogEvent) -> String {
    event
        .timestamp()
        .format(&Rfc3339)
        .unwrap_or("<unknown>".to_string())
}

fn render_text(event: &LogEvent) -> String {
    let mut buffer = String::with_capacity(128);
    let level = event.severity().as_str();
    let timestamp = timestamp(event);
    let context = match event.property(SOURCE_CONTEXT_PROPERTY) {
        Some(Value::String(context)) => context.as_str(),
        _ => "<root>",
    };
    let message = event.render_message();
    let _ = write!(&mut buffer, "{level} {timestamp} {context} {message}");

    let properties = property_pairs(event);
    if !properties.is_empty() {
        let _ = write!(&mut buffer, " {properties}");
    }
    if let Some(exception) = event.exception() {
        let _ = write!(&mut buffer, " | {exception}");
    }
    buffer
}

#[derive(Serialize)]
struct EventRecord<'a> {
    timestamp: String,
    level: &'static str,
    message_template: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<String>,
    properties: Map<String, Value>,
}

fn render_json(event: &LogEvent) -> String {
    let record = EventRecord {
        timestamp: timestamp(event),
        level: event.severity().as_str(),
        message_template: event.message_template(),
        message: event.render_message(),
        exception: event.exception().map(|exception| exception.to_string()),
        properties: event
            .properties()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    };
    serde_json::to_string(&record).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}
