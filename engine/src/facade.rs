use std::fmt::Write;

use serde_json::Value;

use crate::event::property_pairs;
use crate::{LogEvent, SOURCE_CONTEXT_PROPERTY, Sink};

const DEFAULT_TARGET: &str = "logbridge";

/// Forwards events to whatever `log` logger the process installed.
///
/// The `SourceContext` property becomes the record target so `log` level
/// filters keyed by target keep working.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacadeSink;

impl FacadeSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for FacadeSink {
    fn emit(&self, event: &LogEvent) {
        let level = event.severity().to_log_level();
        let target = match event.property(SOURCE_CONTEXT_PROPERTY) {
            Some(Value::String(context)) => context.as_str(),
            _ => DEFAULT_TARGET,
        };
        if !log::log_enabled!(target: target, level) {
            return;
        }

        let mut buffer = String::with_capacity(128);
        let _ = write!(&mut buffer, "{}", event.render_message());
        let properties = property_pairs(event);
        if !properties.is_empty() {
            let _ = write!(&mut buffer, " {properties}");
        }
        if let Some(exception) = event.exception() {
            let _ = write!(&mut buffer, " | {exception}");
        }

        log::log!(target: target, level, "{buffer}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Exception, Severity};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct Capture {
        records: Mutex<Vec<(log::Level, String, String)>>,
    }

    impl log::Log for Capture {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            self.records.lock().unwrap().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture {
        records: Mutex::new(Vec::new()),
    };

    fn captured_for(target: &str) -> Vec<(log::Level, String)> {
        CAPTURE
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, record_target, _)| record_target == target)
            .map(|(level, _, message)| (*level, message.clone()))
            .collect()
    }

    #[test]
    fn test_facade_sink_forwards_to_log() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);

        let sink = FacadeSink::new();
        let error: Exception = Arc::new(std::io::Error::other("refused"));
        sink.emit(
            &LogEvent::now(Severity::Fatal, "Lost {peer}", Some(error))
                .with_property_if_absent("peer", json!("10.0.0.2"))
                .with_property_if_absent(SOURCE_CONTEXT_PROPERTY, json!("Net.Peers")),
        );
        sink.emit(&LogEvent::now(Severity::Info, "no context", None));

        assert_eq!(
            captured_for("Net.Peers"),
            vec![(log::Level::Error, "Lost 10.0.0.2 peer=10.0.0.2 | refused".to_string())]
        );
        assert_eq!(
            captured_for(DEFAULT_TARGET),
            vec![(log::Level::Info, "no context".to_string())]
        );
    }
}
