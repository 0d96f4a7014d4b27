//! Convenience macros for structured calls.
//!
//! ```
//! use logbridge::{Adapter, log_warn};
//! use logbridge_engine::{Logger, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Adapter::new(Logger::new(sink.clone()));
//! log_warn!(logger, "Disk {mount} at {percent}%", mount = "/data", percent = 91);
//! assert_eq!(sink.events()[0].render_message(), "Disk /data at 91%");
//! ```

/// Logs a message template and named values at the given level.
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $template:literal $(, $key:ident = $value:expr)* $(,)?) => {
        $logger.log(
            $level,
            $crate::EventId::default(),
            Some(&$crate::StructuredState::new($template)$(.with(stringify!($key), $value))*),
            None,
            None,
        )
    };
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Information, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Critical, $($arg)+)
    };
}
