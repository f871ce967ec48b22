//! Append-only event log the harness writes human-readable entries to.
//!
//! The sink is injected so hosts decide where entries land (a visible page
//! list, test capture, or the tracing pipeline). Ordering is append order;
//! there is a single writer per harness.

use parking_lot::Mutex;

/// Ordered sink for harness log entries.
pub trait EventLog: Send + Sync {
    /// Append one entry to the end of the log.
    fn append(&self, entry: &str);
}

/// In-memory log retaining entries for later inspection.
#[derive(Debug, Default)]
pub struct MemoryLog {
    /// Entries in append order.
    entries: Mutex<Vec<String>>,
}

impl MemoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the entries appended so far, in order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

impl EventLog for MemoryLog {
    fn append(&self, entry: &str) {
        self.entries.lock().push(entry.to_string());
    }
}

/// Log that forwards entries to the `tracing` pipeline at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceLog;

impl EventLog for TraceLog {
    fn append(&self, entry: &str) {
        tracing::info!(target: "placement_harness", "{entry}");
    }
}
