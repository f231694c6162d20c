//! Diagnostic log: an append-only, developer-facing output channel.

use std::io::Write;
use std::sync::Mutex;

use serde_json::Value;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    /// The decoded JSON body of a response.
    Response(Value),
    /// The reason an upload failed.
    Error(String),
}

pub trait DiagnosticLog: Send + Sync {
    fn record(&self, entry: LogEntry);
}

/// Writes entries as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl DiagnosticLog for TracingLog {
    fn record(&self, entry: LogEntry) {
        match entry {
            LogEntry::Response(value) => info!(response = %value, "upload response"),
            LogEntry::Error(reason) => warn!(error = %reason, "upload failed"),
        }
    }
}

/// Prints entries to stdout: responses as pretty JSON, errors prefixed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLog;

impl DiagnosticLog for ConsoleLog {
    fn record(&self, entry: LogEntry) {
        let line = match entry {
            LogEntry::Response(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
            LogEntry::Error(reason) => format!("error: {reason}"),
        };
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

/// Keeps every entry in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticLog for MemoryLog {
    fn record(&self, entry: LogEntry) {
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
