use std::sync::{Mutex, PoisonError};

use super::{DispatchRecord, RecordSink, SinkError};

/// Sink that captures rendered lines in memory
///
/// Used by tests and the development setup to assert on what a chain emitted
/// without touching the filesystem. The buffer is behind a `Mutex` so one
/// instance can back several handlers in a shared chain.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emit order
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl RecordSink for MemorySink {
    fn emit(&self, record: &DispatchRecord) -> Result<(), SinkError> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("[{}] {record}", record.handler_id));
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
