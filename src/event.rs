//! Core data models for logplate
//!
//! Defines the read-only view of one log record consumed by the emission
//! engine:
//! - `LogEvent`: a single record (level, timestamp, logger, thread, message,
//!   marker, caller locations)
//! - Supporting types: `Level`, `CallerFrame`
//!
//! Events are created per emitted record and discarded after; the engine
//! never holds on to them across calls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level of a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Level {
    /// Canonical uppercase name, as written into rendered output
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One caller-location entry (innermost frame first)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerFrame {
    /// Fully qualified function path, e.g. `my_app::worker::run`
    pub function: String,
    /// Source file name
    pub file: String,
    /// 1-based source line
    pub line: u32,
}

impl fmt::Display for CallerFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}:{})", self.function, self.file, self.line)
    }
}

/// A single log record, as seen by the emission engine
///
/// Timestamps are epoch milliseconds. `None` and negative values both mean
/// "no timestamp" so inputs carrying the legacy `-1` sentinel behave the
/// same as inputs that omit the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Severity level
    #[serde(default)]
    pub level: Level,

    /// Epoch-millisecond timestamp
    #[serde(default)]
    pub timestamp_ms: Option<i64>,

    /// Logger name
    #[serde(default)]
    pub logger: String,

    /// Thread name
    #[serde(default)]
    pub thread: String,

    /// Fully rendered message
    #[serde(default)]
    pub message: String,

    /// Marker name, if the record carries one
    #[serde(default)]
    pub marker: Option<String>,

    /// Caller-location list; empty means no caller data was captured
    #[serde(default)]
    pub caller: Vec<CallerFrame>,
}

impl LogEvent {
    /// Create an event with the given level and message; everything else
    /// starts empty/absent.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp_ms: None,
            logger: String::new(),
            thread: String::new(),
            message: message.into(),
            marker: None,
            caller: Vec::new(),
        }
    }

    /// Effective timestamp, treating negative values as absent
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp_ms.filter(|ms| *ms >= 0)
    }

    /// Render the caller list the way `#{EVENT:caller}` expects:
    /// `[frame, frame, ...]`
    pub fn caller_display(&self) -> String {
        let frames: Vec<String> = self.caller.iter().map(|f| f.to_string()).collect();
        format!("[{}]", frames.join(", "))
    }
}
