use thiserror::Error;

/// Errors raised at the front-end boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// A raw level value outside the known levels
    #[error("Invalid log level value: {value}")]
    InvalidLevel {
        /// The offending value
        value: i32,
    },
    /// A level name that does not match any known level
    #[error("Unknown log level name: {name}")]
    UnknownLevel {
        /// The offending name
        name: String,
    },
}
