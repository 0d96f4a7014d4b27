//! Engine error types

use thiserror::Error;

/// An error raised by the engine's own configuration surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A severity name did not match any known severity
    #[error("Unknown severity name: {name}")]
    UnknownSeverity {
        /// The name that failed to parse
        name: String,
    },
}
