use std::io::Write;

use super::{DispatchRecord, RecordSink, SinkError};

/// Sink that writes rendered lines to stdout
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl RecordSink for ConsoleSink {
    fn emit(&self, record: &DispatchRecord) -> Result<(), SinkError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "[CONSOLE] {record}")?;
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "console"
    }
}
