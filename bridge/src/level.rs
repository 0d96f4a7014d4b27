use std::fmt;
use std::str::FromStr;

use logbridge_engine::Severity;

use crate::BridgeError;

/// Front-end log level.
///
/// The discriminants are the raw values callers exchange across process or
/// FFI boundaries; convert those with [`Level::try_from`].
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Information = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    /// Logs nothing
    None = 6,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Information,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::None,
    ];

    /// The engine severity this level records at; `None` for [`Level::None`].
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            Level::Trace | Level::Debug => Some(Severity::Debug),
            Level::Information => Some(Severity::Info),
            Level::Warning => Some(Severity::Warn),
            Level::Error => Some(Severity::Error),
            Level::Critical => Some(Severity::Fatal),
            Level::None => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "Trace",
            Level::Debug => "Debug",
            Level::Information => "Information",
            Level::Warning => "Warning",
            Level::Error => "Error",
            Level::Critical => "Critical",
            Level::None => "None",
        }
    }
}

impl TryFrom<i32> for Level {
    type Error = BridgeError;

    fn try_from(value: i32) -> Result<Self, BridgeError> {
        Level::ALL
            .into_iter()
            .find(|level| *level as i32 == value)
            .ok_or(BridgeError::InvalidLevel { value })
    }
}

impl FromStr for Level {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.to_ascii_lowercase().as_str() {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "information" | "info" => Level::Information,
            "warning" | "warn" => Level::Warning,
            "error" => Level::Error,
            "critical" => Level::Critical,
            "none" | "off" => Level::None,
            _ => {
                return Err(BridgeError::UnknownLevel {
                    name: s.to_string(),
                });
            }
        };
        Ok(level)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
