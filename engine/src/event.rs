use std::sync::Arc;

use itertools::Itertools;
use serde_json::Value;
use time::OffsetDateTime;

use crate::{SOURCE_CONTEXT_PROPERTY, Severity};

/// An error attached to an event.
pub type Exception = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A single structured event, as the engine records it.
///
/// Events are values: enriching one produces a new event rather than
/// mutating the original.
#[derive(Debug, Clone)]
pub struct LogEvent {
    severity: Severity,
    timestamp: OffsetDateTime,
    message_template: String,
    exception: Option<Exception>,
    properties: Vec<(String, Value)>,
}

impl LogEvent {
    pub fn new(
        severity: Severity,
        timestamp: OffsetDateTime,
        message_template: impl Into<String>,
        exception: Option<Exception>,
    ) -> Self {
        Self {
            severity,
            timestamp,
            message_template: message_template.into(),
            exception,
            properties: Vec::new(),
        }
    }

    /// Builds an event stamped with the current UTC time.
    pub fn now(
        severity: Severity,
        message_template: impl Into<String>,
        exception: Option<Exception>,
    ) -> Self {
        Self::new(
            severity,
            OffsetDateTime::now_utc(),
            message_template,
            exception,
        )
    }

    /// Adds `key` unless the event already carries a property with that key.
    pub fn with_property_if_absent(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if self.property(&key).is_none() {
            self.properties.push((key, value));
        }
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    pub fn message_template(&self) -> &str {
        &self.message_template
    }

    pub fn exception(&self) -> Option<&Exception> {
        self.exception.as_ref()
    }

    /// Properties in the order they were attached.
    pub fn properties(&self) -> &[(String, Value)] {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Renders the message template against the event's properties.
    pub fn render_message(&self) -> String {
        render_template(&self.message_template, &self.properties)
    }
}

/// Renders a message template against `properties`.
///
/// `{name}` holes are replaced by the first property called `name`.
/// Alignment and format suffixes (`{name,8}`, `{name:x}`) and capture hints
/// (`{@name}`, `{$name}`) are matched by name only. Holes with no matching
/// property are kept as written. `{{` and `}}` render as literal braces.
pub fn render_template(template: &str, properties: &[(String, Value)]) -> String {
    let lookup = |name: &str| {
        properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    };
    let mut rendered = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(position) = rest.find(['{', '}']) {
        rendered.push_str(&rest[..position]);
        let tail = &rest[position..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            rendered.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            rendered.push('}');
            rest = &tail[1..];
            continue;
        }
        let Some(end) = tail.find('}') else {
            rendered.push_str(tail);
            rest = "";
            break;
        };
        let hole = &tail[1..end];
        let name = hole
            .split([',', ':'])
            .next()
            .unwrap_or(hole)
            .trim_start_matches(['@', '$']);
        match lookup(name) {
            Some(value) => push_value(&mut rendered, value),
            None => rendered.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }
    rendered.push_str(rest);
    rendered
}

/// Strings render bare; everything else renders as JSON.
fn push_value(buffer: &mut String, value: &Value) {
    match value {
        Value::String(text) => buffer.push_str(text),
        other => buffer.push_str(&other.to_string()),
    }
}

/// `key=value` for every property but the source context, space separated.
pub(crate) fn property_pairs(event: &LogEvent) -> String {
    event
        .properties()
        .iter()
        .filter(|(key, _)| key != SOURCE_CONTEXT_PROPERTY)
        .map(|(key, value)| {
            let mut pair = format!("{key}=");
            push_value(&mut pair, value);
            pair
        })
        .join(" ")
}
