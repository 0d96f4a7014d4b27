use std::any::type_name;

use logbridge_engine::{EngineLogger, Exception, LogEvent};
use serde::Serialize;

use crate::scope::{HandleSlot, ScopeGuard, ScopeIsolation};
use crate::state::{EVENT_ID_PROPERTY, EventId, LogState, ORIGINAL_FORMAT_KEY};
use crate::Level;

/// Renders a message from the state and exception when the state does not
/// carry its own template.
pub type Formatter<'f, S: ?Sized> = &'f dyn Fn(Option<&S>, Option<&Exception>) -> String;

/// Translates front-end log calls for one category into engine events.
///
/// The adapter holds the engine logger currently in effect for its category.
/// Scopes swap that logger for an enriched one until their guard is
/// released; see [`ScopeIsolation`] for how that behaves across threads.
pub struct Adapter<L> {
    slot: HandleSlot<L>,
}

impl<L: EngineLogger> Adapter<L> {
    /// An adapter with one scope slot shared by all threads.
    pub fn new(handle: L) -> Self {
        Self::with_scope_isolation(handle, ScopeIsolation::Shared)
    }

    pub fn with_scope_isolation(handle: L, isolation: ScopeIsolation) -> Self {
        Self {
            slot: HandleSlot::new(handle, isolation),
        }
    }

    /// The engine logger the next call on this thread would use.
    pub fn current_handle(&self) -> L {
        self.slot.current()
    }

    pub fn scope_isolation(&self) -> ScopeIsolation {
        self.slot.isolation()
    }

    /// Whether a call at `level` would reach the engine.
    pub fn is_enabled(&self, level: Level) -> bool {
        match level.to_severity() {
            Some(severity) => self.slot.current().is_enabled_for(severity),
            None => false,
        }
    }

    /// Logs `state` at `level`.
    ///
    /// Structured state supplies the message template through its
    /// [`ORIGINAL_FORMAT_KEY`] pair, and every other pair becomes an event
    /// property, first occurrence winning. Otherwise the template comes from
    /// `formatter`, then from the state's text, and for absent state from
    /// the name of `S`. Nothing is built when the engine has the translated
    /// severity disabled.
    pub fn log<S: LogState + ?Sized>(
        &self,
        level: Level,
        event_id: EventId,
        state: Option<&S>,
        exception: Option<&Exception>,
        formatter: Option<Formatter<'_, S>>,
    ) {
        let Some(severity) = level.to_severity() else {
            return;
        };
        let logger = self.slot.current();
        if !logger.is_enabled_for(severity) {
            return;
        }

        let pairs = state.and_then(LogState::pairs).unwrap_or_default();
        let template = pairs
            .iter()
            .find(|(key, _)| key == ORIGINAL_FORMAT_KEY)
            .map(|(_, template)| template.render())
            .unwrap_or_else(|| match (formatter, state) {
                (Some(formatter), _) => formatter(state, exception),
                (None, Some(state)) => state.render(),
                (None, None) => type_name::<S>().to_string(),
            });

        let event = LogEvent::now(severity, template, exception.cloned());
        let mut event = pairs
            .iter()
            .filter(|(key, _)| key != ORIGINAL_FORMAT_KEY)
            .fold(event, |event, (key, value)| {
                event.with_property_if_absent(key.as_str(), value.clone())
            });
        if !event_id.is_default() {
            event = event.with_property_if_absent(EVENT_ID_PROPERTY, event_id.to_value());
        }

        logger.log(event);
    }

    /// Attaches the properties of `state` to every event logged through this
    /// adapter until the returned guard is released.
    pub fn begin_scope<T: Serialize + ?Sized>(&self, state: &T) -> ScopeGuard<'_, L> {
        let enriched = self.slot.current().with_object_properties(state);
        self.slot.enter(enriched)
    }
}

impl<L: EngineLogger + std::fmt::Debug> std::fmt::Debug for Adapter<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("current", &self.slot.current())
            .field("isolation", &self.slot.isolation())
            .finish()
    }
}
