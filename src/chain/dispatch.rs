use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::handler::Handler;
use crate::request::Request;

/// Continuation policy, fixed per chain at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainMode {
    /// Every eligible handler acts; traversal never stops early
    Broadcast,
    /// Traversal stops at the first handler that is eligible and whose
    /// action succeeded
    FirstMatch,
}

/// One recorded action failure: which handler, and what its sink reported
#[derive(Debug, Clone, Serialize)]
pub struct ActionFailure {
    pub handler_id: String,
    pub error: String,
}

/// Result of one traversal
///
/// Dispatch never returns an error: sink failures are recorded here per
/// handler, and an unhandled first-match request is a normal outcome value,
/// not a failure.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub handled: bool,
    /// Ids of handlers that acted successfully, in traversal order
    pub actions_taken: Vec<String>,
    pub failures: Vec<ActionFailure>,
}

/// Immutable ordered sequence of handlers traversed once per request
///
/// Traversal order equals construction order. Duplicates are allowed: a
/// handler listed twice is offered the request twice and acts twice. The
/// chain holds no per-request state, so a shared chain may be dispatched
/// from several threads as long as its sinks serialize their own resources.
#[derive(Debug)]
pub struct HandlerChain {
    handlers: Vec<Handler>,
    mode: ChainMode,
}

impl HandlerChain {
    pub fn new(handlers: Vec<Handler>, mode: ChainMode) -> Self {
        Self { handlers, mode }
    }

    pub fn mode(&self) -> ChainMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Offer the request to each handler in order
    ///
    /// Broadcast mode: every eligible handler acts and traversal always runs
    /// to the end. First-match mode: traversal stops after the first handler
    /// that is eligible and whose action succeeded; a failed action on the
    /// matching handler falls through to the next handler instead of
    /// reporting success.
    pub fn dispatch(&self, request: &Request) -> DispatchOutcome {
        let mut actions_taken = Vec::new();
        let mut failures = Vec::new();

        for handler in &self.handlers {
            if !handler.is_eligible(request) {
                debug!(
                    handler = handler.id(),
                    trace_id = %request.trace_id,
                    "Handler not eligible, skipping"
                );
                continue;
            }

            match handler.act(request) {
                Ok(()) => {
                    debug!(
                        handler = handler.id(),
                        sink = handler.sink_kind(),
                        trace_id = %request.trace_id,
                        "Handler acted"
                    );
                    actions_taken.push(handler.id().to_string());
                    if self.mode == ChainMode::FirstMatch {
                        break;
                    }
                }
                Err(err) => {
                    warn!(
                        handler = handler.id(),
                        sink = handler.sink_kind(),
                        trace_id = %request.trace_id,
                        error = %err,
                        "Handler action failed"
                    );
                    failures.push(ActionFailure {
                        handler_id: handler.id().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        let handled = !actions_taken.is_empty();
        if !handled {
            debug!(
                mode = ?self.mode,
                trace_id = %request.trace_id,
                "No handler acted on request"
            );
        }

        DispatchOutcome {
            handled,
            actions_taken,
            failures,
        }
    }
}
