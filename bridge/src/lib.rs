//! Structured logging front-end for the logbridge engine
//!
//! This crate adapts a category-based, structured logging front-end (levels,
//! event ids, key/value state, scopes) to the [`logbridge_engine`] event
//! model. Calls are translated as they happen: the level is mapped onto an
//! engine severity, the message template and properties are taken from the
//! state, and the resulting event is emitted through the engine logger in
//! effect for the adapter.
//!
//! ```
//! use logbridge::{BridgeConfiguration, Level, LogDestination, configure_logging, log_info};
//! use logbridge_engine::MemorySink;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let provider = configure_logging(
//!     BridgeConfiguration::new(LogDestination::memory(sink.clone()))
//!         .with_minimum_level(Level::Debug),
//! );
//! let logger = provider.create_logger(Some("Tiles.Cache"));
//! {
//!     let _scope = logger.begin_scope(&serde_json::json!({ "request": 42 }));
//!     log_info!(logger, "Evicted {count} tiles", count = 3);
//! }
//! assert_eq!(sink.events()[0].render_message(), "Evicted 3 tiles");
//! ```

use std::sync::Arc;

use logbridge_engine::{ConsoleFormat, ConsoleSink, FacadeSink, Logger, MemorySink, Sink};

mod adapter;
mod error;
mod level;
#[macro_use]
mod macros;
mod provider;
mod scope;
mod state;

pub use adapter::{Adapter, Formatter};
pub use error::BridgeError;
pub use level::Level;
pub use provider::LoggerProvider;
pub use scope::{ScopeGuard, ScopeIsolation};
pub use state::{EVENT_ID_PROPERTY, EventId, LogState, ORIGINAL_FORMAT_KEY, StructuredState};

/// Where do you want your logs to go?
#[derive(Debug, Clone)]
pub enum LogDestination {
    /// One line per event on stderr
    Console {
        /// Text or JSON lines
        format: ConsoleFormat,
    },
    /// Whatever `log` logger the process installed
    Facade,
    /// An in-memory sink you keep a handle to
    Memory {
        /// The sink events are recorded into
        sink: Arc<MemorySink>,
    },
}

impl LogDestination {
    /// Text lines on stderr
    pub fn console() -> Self {
        Self::Console {
            format: ConsoleFormat::Text,
        }
    }

    /// JSON lines on stderr
    pub fn json() -> Self {
        Self::Console {
            format: ConsoleFormat::Json,
        }
    }

    pub fn facade() -> Self {
        Self::Facade
    }

    pub fn memory(sink: Arc<MemorySink>) -> Self {
        Self::Memory { sink }
    }

    fn into_sink(self) -> Arc<dyn Sink> {
        match self {
            LogDestination::Console { format } => Arc::new(ConsoleSink::new(format)),
            LogDestination::Facade => Arc::new(FacadeSink::new()),
            LogDestination::Memory { sink } => sink,
        }
    }
}

/// Everything [`configure_logging`] needs.
#[derive(Debug, Clone)]
pub struct BridgeConfiguration {
    /// Calls below this level never reach the destination. Defaults to
    /// [`Level::Information`]; [`Level::None`] silences everything.
    minimum_level: Level,
    /// How scopes behave across threads. Defaults to [`ScopeIsolation::Shared`].
    scope_isolation: ScopeIsolation,
    destination: LogDestination,
}

impl BridgeConfiguration {
    pub fn new(destination: LogDestination) -> Self {
        Self {
            minimum_level: Level::Information,
            scope_isolation: ScopeIsolation::default(),
            destination,
        }
    }

    pub fn with_minimum_level(mut self, minimum_level: Level) -> Self {
        self.minimum_level = minimum_level;
        self
    }

    pub fn with_scope_isolation(mut self, scope_isolation: ScopeIsolation) -> Self {
        self.scope_isolation = scope_isolation;
        self
    }

    pub fn minimum_level(&self) -> Level {
        self.minimum_level
    }
}

impl From<LogDestination> for BridgeConfiguration {
    fn from(value: LogDestination) -> Self {
        Self::new(value)
    }
}

/// Builds the engine root logger for `configuration` and a provider over it.
pub fn configure_logging(configuration: impl Into<BridgeConfiguration>) -> LoggerProvider<Logger> {
    let BridgeConfiguration {
        minimum_level,
        scope_isolation,
        destination,
    } = configuration.into();
    log::debug!(
        "configuring logbridge: destination={destination:?} minimum_level={minimum_level} scope_isolation={scope_isolation:?}"
    );

    let root = Logger::new(destination.into_sink());
    let root = match minimum_level.to_severity() {
        Some(severity) => root.with_minimum_severity(severity),
        None => root.silenced(),
    };
    LoggerProvider::new(root).with_scope_isolation(scope_isolation)
}
