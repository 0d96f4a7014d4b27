use std::sync::{Mutex, PoisonError};

use crate::LogEvent;

/// Where events go once the engine has decided to record them.
pub trait Sink: Send + Sync {
    fn emit(&self, event: &LogEvent);
}

/// Keeps every event in memory.
///
/// Useful when a test or a diagnostics endpoint needs to look at what was
/// logged.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<LogEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn emit(&self, event: &LogEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn test_memory_sink_records_and_drains() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.emit(&LogEvent::now(Severity::Info, "one", None));
        sink.emit(&LogEvent::now(Severity::Warn, "two", None));
        assert_eq!(sink.len(), 2);

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].message_template(), "two");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_memory_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemorySink>();
    }
}
