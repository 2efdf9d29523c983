//! Build log sinks
//!
//! SWIG output is forwarded line by line from two drain threads while the
//! orchestrator logs its own progress, so every sink must accept concurrent
//! writes.

use std::sync::Mutex;

pub trait LogSink: Send + Sync {
    fn info(&self, line: &str);

    fn debug(&self, line: &str);

    fn error(&self, line: &str);

    /// Whether debug output is visible. Turns on SWIG's `-v` flag.
    fn is_debug_enabled(&self) -> bool;
}

/// Forwards build output to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, line: &str) {
        tracing::info!(target: "swig", "{line}");
    }

    fn debug(&self, line: &str) {
        tracing::debug!(target: "swig", "{line}");
    }

    fn error(&self, line: &str) {
        tracing::error!(target: "swig", "{line}");
    }

    fn is_debug_enabled(&self) -> bool {
        tracing::enabled!(target: "swig", tracing::Level::DEBUG)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub message: String,
}

/// Collects log lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<LogLine>>,
    debug_enabled: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(debug_enabled: bool) -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            debug_enabled,
        }
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.level == level)
            .map(|line| line.message)
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LogLine {
                level,
                message: message.to_string(),
            });
    }
}

impl LogSink for MemorySink {
    fn info(&self, line: &str) {
        self.push(LogLevel::Info, line);
    }

    fn debug(&self, line: &str) {
        self.push(LogLevel::Debug, line);
    }

    fn error(&self, line: &str) {
        self.push(LogLevel::Error, line);
    }

    fn is_debug_enabled(&self) -> bool {
        self.debug_enabled
    }
}
