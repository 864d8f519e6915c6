use std::sync::Arc;

use crate::request::{Request, Severity};
use crate::sinks::{DispatchRecord, RecordSink, SinkError};

/// Pure eligibility predicate over a request
///
/// All clauses that are present must hold; a clause left as `None` is not
/// checked. Comparisons are inclusive on both sides: `severity >=
/// min_severity` and `magnitude <= max_magnitude`, so boundary values stay
/// with the earliest handler whose threshold covers them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    pub min_severity: Option<Severity>,
    pub max_magnitude: Option<i64>,
    pub magnitude_equals: Option<i64>,
}

impl Eligibility {
    /// Matches every request
    pub fn any() -> Self {
        Self::default()
    }

    /// Severity floor: eligible when `request.severity >= floor`
    pub fn severity_at_least(floor: Severity) -> Self {
        Self {
            min_severity: Some(floor),
            ..Self::default()
        }
    }

    /// Approval limit: eligible when `request.magnitude <= limit`
    pub fn amount_within(limit: i64) -> Self {
        Self {
            max_magnitude: Some(limit),
            ..Self::default()
        }
    }

    /// Exact-match refinement on top of an existing predicate, as used by
    /// retry-style handlers keyed on one specific error code
    pub fn with_magnitude_equals(mut self, magnitude: i64) -> Self {
        self.magnitude_equals = Some(magnitude);
        self
    }

    pub fn matches(&self, request: &Request) -> bool {
        if let Some(floor) = self.min_severity
            && request.severity < floor
        {
            return false;
        }
        if let Some(limit) = self.max_magnitude
            && request.magnitude > limit
        {
            return false;
        }
        if let Some(exact) = self.magnitude_equals
            && request.magnitude != exact
        {
            return false;
        }
        true
    }
}

/// One node in a chain: an id, a predicate, and a sink-backed action
///
/// Handlers hold no reference to any other handler; ordering lives entirely
/// in the chain. There is one handler type for every kind of destination,
/// selected by the sink it was wired to.
#[derive(Clone)]
pub struct Handler {
    id: String,
    eligibility: Eligibility,
    sink: Arc<dyn RecordSink>,
}

impl Handler {
    pub fn new(
        id: impl Into<String>,
        eligibility: Eligibility,
        sink: Arc<dyn RecordSink>,
    ) -> Self {
        Self {
            id: id.into(),
            eligibility,
            sink,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn eligibility(&self) -> &Eligibility {
        &self.eligibility
    }

    pub fn sink_kind(&self) -> &'static str {
        self.sink.kind()
    }

    /// Pure predicate; no side effects
    pub fn is_eligible(&self, request: &Request) -> bool {
        self.eligibility.matches(request)
    }

    /// Render the request and emit it through this handler's sink
    pub fn act(&self, request: &Request) -> Result<(), SinkError> {
        let record = DispatchRecord::render(&self.id, request);
        self.sink.emit(&record)
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("id", &self.id)
            .field("eligibility", &self.eligibility)
            .field("sink", &self.sink.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    fn request(severity: Severity, magnitude: i64) -> Request {
        Request::new(severity, magnitude, "Test", "test request")
    }

    #[test]
    fn test_severity_floor_is_inclusive() {
        let eligibility = Eligibility::severity_at_least(Severity::Warning);
        assert!(!eligibility.matches(&request(Severity::Info, 0)));
        assert!(eligibility.matches(&request(Severity::Warning, 0)));
        assert!(eligibility.matches(&request(Severity::Critical, 0)));
    }

    #[test]
    fn test_amount_limit_is_inclusive() {
        let eligibility = Eligibility::amount_within(1000);
        assert!(eligibility.matches(&request(Severity::Info, 999)));
        assert!(eligibility.matches(&request(Severity::Info, 1000)));
        assert!(!eligibility.matches(&request(Severity::Info, 1001)));
    }

    #[test]
    fn test_exact_match_refines_severity_floor() {
        let eligibility =
            Eligibility::severity_at_least(Severity::Error).with_magnitude_equals(503);
        assert!(eligibility.matches(&request(Severity::Error, 503)));
        assert!(eligibility.matches(&request(Severity::Critical, 503)));
        assert!(!eligibility.matches(&request(Severity::Error, 500)));
        assert!(!eligibility.matches(&request(Severity::Warning, 503)));
    }

    #[test]
    fn test_empty_eligibility_matches_everything() {
        let eligibility = Eligibility::any();
        assert!(eligibility.matches(&request(Severity::Info, 0)));
        assert!(eligibility.matches(&request(Severity::Critical, i64::MAX)));
    }

    #[test]
    fn test_handler_act_emits_through_sink() {
        let sink = Arc::new(MemorySink::new());
        let handler = Handler::new("console", Eligibility::any(), sink.clone());

        handler.act(&request(Severity::Info, 0)).unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[console]"));
    }
}
