//! Side-effect sinks for handler actions
//!
//! Handlers never write to a destination directly. Each handler is wired to a
//! [`RecordSink`] at chain construction time, and acting on a request means
//! rendering it into a [`DispatchRecord`] and emitting that record through the
//! sink. Keeping destinations behind a trait is what lets the chain core stay
//! free of console/file/notification specifics.
//!
//! Built-in sinks:
//!
//! - [`ConsoleSink`] - writes rendered lines to stdout
//! - [`FileSink`] - appends rendered lines to a log file
//! - [`NotifySink`] - simulated notification transport
//! - [`MemorySink`] - captures lines in memory for tests

mod console;
mod file;
mod memory;
mod notify;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::MemorySink;
pub use notify::NotifySink;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::request::{Request, Severity};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Rendered action payload handed to a sink
#[derive(Debug, Clone)]
pub struct DispatchRecord {
    pub handler_id: String,
    pub severity: Severity,
    pub component: String,
    pub magnitude: i64,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub trace_id: Uuid,
}

impl DispatchRecord {
    pub fn render(handler_id: &str, request: &Request) -> Self {
        Self {
            handler_id: handler_id.to_string(),
            severity: request.severity,
            component: request.component.clone(),
            magnitude: request.magnitude,
            description: request.description.clone(),
            timestamp: request.timestamp,
            trace_id: request.trace_id,
        }
    }
}

impl fmt::Display for DispatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.severity,
            self.component,
            self.description
        )?;
        if self.magnitude != 0 {
            write!(f, " (code: {})", self.magnitude)?;
        }
        Ok(())
    }
}

/// Destination a handler emits records to
pub trait RecordSink: Send + Sync {
    /// Emit one record; failures are reported back to the chain, which records
    /// them in the dispatch outcome rather than aborting traversal
    fn emit(&self, record: &DispatchRecord) -> Result<(), SinkError>;

    /// Short sink kind tag used in logs
    fn kind(&self) -> &'static str;
}

#[derive(Debug, Error)]
pub enum SinkRegistryError {
    #[error("sink not found: {0}")]
    NotFound(String),
}

/// Registry mapping sink names to sink instances
///
/// Chain builders resolve handler specs against this registry; referencing an
/// unregistered name is a configuration error at build time, not at dispatch
/// time.
#[derive(Clone, Default)]
pub struct SinkRegistry {
    sinks: BTreeMap<String, Arc<dyn RecordSink>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self {
            sinks: BTreeMap::new(),
        }
    }

    /// Create a registry with the console sink pre-registered under "console"
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("console", Arc::new(ConsoleSink::new()));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, sink: Arc<dyn RecordSink>) {
        self.sinks.insert(name.into(), sink);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn RecordSink>, SinkRegistryError> {
        self.sinks
            .get(name)
            .cloned()
            .ok_or_else(|| SinkRegistryError::NotFound(name.to_string()))
    }

    pub fn has_sink(&self, name: &str) -> bool {
        self.sinks.contains_key(name)
    }
}
