use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::{DispatchRecord, RecordSink, SinkError};

/// Sink that appends rendered lines to a log file
///
/// The file is opened and closed inside each `emit` call, so no handle is held
/// across dispatches and every exit path releases the file, including the
/// error paths.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl RecordSink for FileSink {
    fn emit(&self, record: &DispatchRecord) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{record}")?;

        debug!(path = %self.path.display(), trace_id = %record.trace_id, "Appended record to log file");
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
