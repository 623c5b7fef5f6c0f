// Debug logging module for tracing executed commands
//
// When enabled, every command the batch interpreter executes is appended to
// a JSONL file together with its printed result. Failures to write are
// logged and otherwise ignored so the game itself is never affected.

use log::error;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry<'a, C: Serialize> {
    line: usize,
    command: &'a C,
    result: &'a str,
    timestamp: String,
}

/// Command trace writer
#[derive(Debug)]
pub struct DebugLogger {
    file: Option<File>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger { file: Some(file) }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Appends one command and the result it produced
    pub fn log_command<C: Serialize>(&mut self, line: usize, command: &C, result: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let entry = DebugLogEntry {
            line,
            command,
            result,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                let line_with_newline = format!("{}\n", json_line);
                if let Err(e) = file.write_all(line_with_newline.as_bytes()) {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = file.flush() {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}
