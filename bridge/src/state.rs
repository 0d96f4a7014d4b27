use std::fmt;

use itertools::Itertools;
use logbridge_engine::{Value, render_template};
use serde::Serialize;
use serde_json::json;

/// Key under which structured state carries its message template.
pub const ORIGINAL_FORMAT_KEY: &str = "{OriginalFormat}";

/// Property under which a non-default [`EventId`] is attached.
pub const EVENT_ID_PROPERTY: &str = "EventId";

/// The payload of a log call.
///
/// State is either structured (an ordered sequence of key/value pairs) or
/// plain text. Structured state may name its message template under
/// [`ORIGINAL_FORMAT_KEY`].
pub trait LogState {
    /// The key/value pairs, for structured state.
    fn pairs(&self) -> Option<&[(String, Value)]> {
        None
    }

    /// The state as text.
    fn render(&self) -> String;
}

impl LogState for str {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl LogState for String {
    fn render(&self) -> String {
        self.clone()
    }
}

impl LogState for fmt::Arguments<'_> {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl LogState for Value {
    fn render(&self) -> String {
        match self {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl LogState for [(String, Value)] {
    fn pairs(&self) -> Option<&[(String, Value)]> {
        Some(self)
    }

    fn render(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{key}={}", value.render()))
            .join(", ")
    }
}

impl LogState for Vec<(String, Value)> {
    fn pairs(&self) -> Option<&[(String, Value)]> {
        Some(self.as_slice())
    }

    fn render(&self) -> String {
        self.as_slice().render()
    }
}

/// Structured state built from a message template and named values.
///
/// The template is stored last, under [`ORIGINAL_FORMAT_KEY`], after the
/// values in the order they were added.
///
/// ```
/// use logbridge::{LogState, StructuredState};
///
/// let state = StructuredState::new("Fetched {count} tiles").with("count", 12);
/// assert_eq!(state.to_string(), "Fetched 12 tiles");
/// assert_eq!(state.pairs().map(|pairs| pairs.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredState {
    pairs: Vec<(String, Value)>,
}

impl StructuredState {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            pairs: vec![(ORIGINAL_FORMAT_KEY.to_string(), Value::String(template.into()))],
        }
    }

    /// Adds a named value. Values that fail to serialize are recorded as `null`.
    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        let position = self.pairs.len() - 1;
        self.pairs.insert(position, (key.into(), value));
        self
    }

    pub fn template(&self) -> &str {
        match self.pairs.last() {
            Some((_, Value::String(template))) => template,
            _ => "",
        }
    }

    /// The named values, without the template.
    pub fn values(&self) -> &[(String, Value)] {
        &self.pairs[..self.pairs.len() - 1]
    }
}

impl fmt::Display for StructuredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_template(self.template(), self.values()))
    }
}

impl LogState for StructuredState {
    fn pairs(&self) -> Option<&[(String, Value)]> {
        Some(&self.pairs)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

/// Identifies a kind of event, independent of its message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EventId {
    pub id: i32,
    pub name: Option<String>,
}

impl EventId {
    pub fn new(id: i32) -> Self {
        Self { id, name: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `true` for the id every call gets when the caller names none.
    pub fn is_default(&self) -> bool {
        self.id == 0 && self.name.is_none()
    }

    pub(crate) fn to_value(&self) -> Value {
        match &self.name {
            Some(name) => json!({ "Id": self.id, "Name": name }),
            None => json!({ "Id": self.id }),
        }
    }
}

impl From<i32> for EventId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_state_keeps_template_last() {
        let state = StructuredState::new("{a} then {b}").with("a", 1).with("b", "two");
        let pairs = state.pairs().unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("a".to_string(), json!(1)));
        assert_eq!(pairs[1], ("b".to_string(), json!("two")));
        assert_eq!(pairs[2], (ORIGINAL_FORMAT_KEY.to_string(), json!("{a} then {b}")));
        assert_eq!(state.template(), "{a} then {b}");
        assert_eq!(state.values().len(), 2);
    }

    #[test]
    fn test_structured_state_display_renders_template() {
        let state = StructuredState::new("Hello {name}!").with("name", "world");
        assert_eq!(state.render(), "Hello world!");
    }

    #[test]
    fn test_plain_states_are_not_structured() {
        assert!("hello".pairs().is_none());
        assert!(String::from("hello").pairs().is_none());
        assert!(json!({"a": 1}).pairs().is_none());
        assert_eq!(format_args!("{}-{}", 1, 2).render(), "1-2");
    }

    #[test]
    fn test_pair_slices_are_structured() {
        let pairs = vec![("a".to_string(), json!(1)), ("b".to_string(), json!("x"))];
        assert_eq!(pairs.pairs().map(<[_]>::len), Some(2));
        assert_eq!(pairs.render(), "a=1, b=x");
    }

    #[test]
    fn test_event_id_value() {
        assert!(EventId::default().is_default());
        assert!(!EventId::new(3).is_default());
        assert_eq!(EventId::new(3).to_value(), json!({"Id": 3}));
        assert_eq!(
            EventId::from(7).with_name("CacheMiss").to_value(),
            json!({"Id": 7, "Name": "CacheMiss"})
        );
    }
}
