use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use super::{DispatchRecord, RecordSink, SinkError};

/// Simulated notification transport
///
/// Stands in for an email/pager integration: the "send" is a structured log
/// line. An unavailability toggle lets tests exercise how chains react when
/// the otherwise-matching handler's action fails.
#[derive(Debug)]
pub struct NotifySink {
    recipient: String,
    unavailable: AtomicBool,
}

impl NotifySink {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }
}

impl RecordSink for NotifySink {
    fn emit(&self, record: &DispatchRecord) -> Result<(), SinkError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(SinkError::Unavailable(format!(
                "notification transport down for {}",
                self.recipient
            )));
        }

        info!(
            recipient = %self.recipient,
            severity = %record.severity,
            component = %record.component,
            trace_id = %record.trace_id,
            "Sending notification: {}",
            record.description
        );
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "notify"
    }
}
