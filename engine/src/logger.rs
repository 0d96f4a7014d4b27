use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::{LogEvent, Severity, Sink};

/// Property naming the context a logger was derived for.
pub const SOURCE_CONTEXT_PROPERTY: &str = "SourceContext";

/// Property holding scope state that is not shaped like an object.
pub const SCOPE_PROPERTY: &str = "Scope";

/// What the engine offers to anything translating into it.
///
/// Handles are values: deriving a context or attaching properties yields a
/// new handle and leaves the original untouched.
pub trait EngineLogger: Clone + Send + Sync {
    /// Would an event at `severity` be recorded?
    fn is_enabled_for(&self, severity: Severity) -> bool;

    /// Records the event.
    fn log(&self, event: LogEvent);

    /// A handle scoped to the named sub-context.
    fn for_context(&self, name: &str) -> Self;

    /// A handle that attaches the properties of `state` to every event.
    fn with_object_properties<S: Serialize + ?Sized>(&self, state: &S) -> Self;
}

/// The engine's logger handle.
///
/// Cloning is cheap: the sink and the context properties are shared.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Sink>,
    minimum: Option<Severity>,
    context: Arc<Vec<(String, Value)>>,
}

impl Logger {
    /// A logger recording every severity into `sink`.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink,
            minimum: Some(Severity::Debug),
            context: Arc::new(Vec::new()),
        }
    }

    /// Only record events at `minimum` or above.
    pub fn with_minimum_severity(mut self, minimum: Severity) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Record nothing.
    pub fn silenced(mut self) -> Self {
        self.minimum = None;
        self
    }

    /// A handle that attaches `key` to every event, replacing any context
    /// property already called `key`.
    pub fn with_property(&self, key: impl Into<String>, value: Value) -> Self {
        self.with_properties([(key.into(), value)])
    }

    /// Adds several context properties at once. Later keys replace earlier
    /// ones.
    pub fn with_properties(&self, properties: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut context = self.context.as_ref().clone();
        for (key, value) in properties {
            match context.iter_mut().find(|(name, _)| *name == key) {
                Some(existing) => existing.1 = value,
                None => context.push((key, value)),
            }
        }
        Self {
            sink: Arc::clone(&self.sink),
            minimum: self.minimum,
            context: Arc::new(context),
        }
    }

    /// Context properties in the order they were first attached.
    pub fn context(&self) -> &[(String, Value)] {
        &self.context
    }

    pub fn context_property(&self, key: &str) -> Option<&Value> {
        self.context
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

impl EngineLogger for Logger {
    fn is_enabled_for(&self, severity: Severity) -> bool {
        self.minimum.is_some_and(|minimum| severity >= minimum)
    }

    fn log(&self, event: LogEvent) {
        if !self.is_enabled_for(event.severity()) {
            return;
        }
        let event = self
            .context
            .iter()
            .fold(event, |event, (key, value)| {
                event.with_property_if_absent(key.as_str(), value.clone())
            });
        self.sink.emit(&event);
    }

    fn for_context(&self, name: &str) -> Self {
        self.with_property(SOURCE_CONTEXT_PROPERTY, Value::String(name.to_string()))
    }

    fn with_object_properties<S: Serialize + ?Sized>(&self, state: &S) -> Self {
        self.with_properties(object_properties(state))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("minimum", &self.minimum)
            .field("context", &self.context)
            .finish()
    }
}

/// Flattens a value into properties.
///
/// Objects contribute one property per field, `null` contributes nothing,
/// anything else lands under [`SCOPE_PROPERTY`]. State that cannot be
/// serialized contributes nothing.
pub fn object_properties<S: Serialize + ?Sized>(state: &S) -> Vec<(String, Value)> {
    match serde_json::to_value(state) {
        Ok(Value::Object(fields)) => fields.into_iter().collect(),
        Ok(Value::Null) => Vec::new(),
        Ok(other) => vec![(SCOPE_PROPERTY.to_string(), other)],
        Err(e) => {
            log::warn!("Scope state could not be serialized, attaching no properties: {e}");
            Vec::new()
        }
    }
}
