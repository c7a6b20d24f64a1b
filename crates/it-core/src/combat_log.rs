//! Per-round combat log
//!
//! One entry is recorded when combat starts and one more every time the
//! turn order wraps into a new round. The engine is the only writer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::{LogSink, StorageError};

/// Name of the file an exported log is delivered as
pub const EXPORT_FILE_NAME: &str = "combat-log.json";

/// Snapshot of the turn order at the start of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub round: u32,
    /// Combatant names in turn order
    pub order: Vec<String>,
}

/// Append-only log of one combat session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatLog {
    entries: Vec<LogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn record(&mut self, round: u32, order: Vec<String>) {
        self.entries.push(LogEntry { round, order });
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Render the whole log as pretty-printed JSON
    pub fn export(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(&self.entries)
    }

    /// Export the whole log and deliver it to `sink`
    pub fn export_to(&self, sink: &mut impl LogSink) -> Result<PathBuf, StorageError> {
        let bytes = self.export()?;
        sink.deliver(EXPORT_FILE_NAME, &bytes)
    }
}
