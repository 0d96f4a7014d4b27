//! Structured event engine for logbridge
//!
//! This crate is the logging engine the `logbridge` adapter translates into.
//! It records immutable [`LogEvent`]s carrying a severity, a message template,
//! an optional exception and ordered properties.
//!
//! A [`Logger`] handle is cheap to clone. Deriving a named context or
//! attaching properties yields a new handle; every event logged through it
//! picks up the handle's context properties. Events that pass the handle's
//! minimum severity are handed to a [`Sink`]:
//! * [`ConsoleSink`]: one text or JSON line per event on stderr.
//! * [`FacadeSink`]: forwards to the [`log`](https://docs.rs/log) facade.
//! * [`MemorySink`]: keeps events around for inspection.
//!
//! You are likely to be interested in the sibling crate:
//! * `logbridge`: the front-end adapter, provider and scopes.

mod console;
mod error;
mod event;
mod facade;
mod logger;
mod severity;
mod sink;

pub use console::{ConsoleFormat, ConsoleSink};
pub use error::EngineError;
pub use event::{Exception, LogEvent, render_template};
pub use facade::FacadeSink;
pub use logger::{EngineLogger, Logger, SCOPE_PROPERTY, SOURCE_CONTEXT_PROPERTY, object_properties};
pub use serde_json::Value;
pub use severity::Severity;
pub use sink::{MemorySink, Sink};
