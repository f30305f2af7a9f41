//! Import provenance logging.
//!
//! Every import session records where the data came from and what the
//! importer decided along the way: delimiter resolution, template choice,
//! parse results. The log exports as readable text or JSON so a table's
//! provenance can be archived next to the project file.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// A single log entry representing one import step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sequential step number (1-based)
    pub sequence: usize,
    /// Timestamp when the step was performed
    pub timestamp: DateTime<Local>,
    /// Human-readable operation name
    pub operation: String,
    /// What was decided or produced
    pub detail: String,
}

impl LogEntry {
    /// Format as human-readable text line
    pub fn to_text(&self) -> String {
        format!(
            "[{:03}] {} | {} | {}",
            self.sequence,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.detail
        )
    }
}

/// The import log — records all steps of one session in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportLog {
    /// Session metadata
    pub session_id: String,
    pub session_start: DateTime<Local>,
    pub source: String,
    pub software_version: String,
    /// Ordered list of steps
    pub entries: Vec<LogEntry>,
}

impl ImportLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            session_start: Local::now(),
            source: String::new(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: Vec::new(),
        }
    }

    /// Set the data source for this session (file path or in-memory label)
    pub fn set_source(&mut self, source: &str) {
        self.source = source.to_string();
    }

    /// Add a step to the log
    pub fn add_entry(&mut self, operation: &str, detail: &str) {
        let seq = self.entries.len() + 1;
        self.entries.push(LogEntry {
            sequence: seq,
            timestamp: Local::now(),
            operation: operation.to_string(),
            detail: detail.to_string(),
        });
        log::info!("[LOG {:03}] {} — {}", seq, operation, detail);
    }

    /// Get the number of steps
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as human-readable text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str("  Data Import Provenance Log\n");
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str(&format!("  Session ID:  {}\n", self.session_id));
        out.push_str(&format!(
            "  Started:     {}\n",
            self.session_start.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("  Source:      {}\n", self.source));
        out.push_str(&format!("  Software:    isotable v{}\n", self.software_version));
        out.push_str(&format!("  Steps:       {}\n", self.entries.len()));
        out.push_str("───────────────────────────────────────────────────────────────\n\n");

        for entry in &self.entries {
            out.push_str(&entry.to_text());
            out.push('\n');
        }

        out.push_str("\n═══════════════════════════════════════════════════════════════\n");
        out.push_str(&format!(
            "  Log exported: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out
    }

    /// Export as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// Save log as text file
    pub fn save_text(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_text())
    }

    /// Save log as JSON file
    pub fn save_json(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_json())
    }
}

impl Default for ImportLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_creation_and_entries() {
        let mut log = ImportLog::new();
        assert!(log.is_empty());

        log.add_entry("Delimiter", "Comma (detected from content)");
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries[0].sequence, 1);
        assert_eq!(log.entries[0].operation, "Delimiter");

        log.add_entry("Parse", "Default template: 4 columns, 12 rows");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries[1].sequence, 2);
    }

    #[test]
    fn test_text_export() {
        let mut log = ImportLog::new();
        log.set_source("unknowns.csv");
        log.add_entry("Delimiter", "Comma (from file extension)");
        let text = log.to_text();
        assert!(text.contains("unknowns.csv"));
        assert!(text.contains("Comma (from file extension)"));
        assert!(text.contains("Provenance Log"));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut log = ImportLog::new();
        log.add_entry("Parse", "Squid 3 template: 2 aliquots");
        let json = log.to_json();
        let parsed: ImportLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].detail, "Squid 3 template: 2 aliquots");
    }
}
