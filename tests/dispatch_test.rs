use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use relaybox::chain::{ChainBuilder, ChainMode, Eligibility, Handler, HandlerChain};
use relaybox::config::Config;
use relaybox::observability::Metrics;
use relaybox::request::{Request, Severity};
use relaybox::sinks::{MemorySink, NotifySink, SinkRegistry};

/// Builds the expense-approval chain: Manager (1000) -> Director (5000) -> VP (10000)
fn approval_chain(sink: Arc<MemorySink>) -> HandlerChain {
    ChainBuilder::new(ChainMode::FirstMatch)
        .handler(Handler::new(
            "manager",
            Eligibility::amount_within(1000),
            sink.clone(),
        ))
        .handler(Handler::new(
            "director",
            Eligibility::amount_within(5000),
            sink.clone(),
        ))
        .handler(Handler::new(
            "vp",
            Eligibility::amount_within(10000),
            sink,
        ))
        .build()
}

fn expense(amount: i64, description: &str) -> Request {
    Request::new(Severity::Info, amount, "Expenses", description)
}

#[test]
fn approval_chain_routes_by_limit() {
    let sink = Arc::new(MemorySink::new());
    let chain = approval_chain(sink.clone());

    let outcome = chain.dispatch(&expense(800, "Office Supplies"));
    assert!(outcome.handled);
    assert_eq!(outcome.actions_taken, vec!["manager"]);

    let outcome = chain.dispatch(&expense(3000, "Conference Expenses"));
    assert!(outcome.handled);
    assert_eq!(outcome.actions_taken, vec!["director"]);

    let outcome = chain.dispatch(&expense(12000, "New Equipment"));
    assert!(!outcome.handled);
    assert!(outcome.actions_taken.is_empty());

    // Only the two approved reports produced side effects
    assert_eq!(sink.lines().len(), 2);
}

#[test]
fn approval_chain_boundary_amounts_are_inclusive() {
    let sink = Arc::new(MemorySink::new());
    let chain = approval_chain(sink);

    assert_eq!(chain.dispatch(&expense(1000, "at limit")).actions_taken, vec!["manager"]);
    assert_eq!(chain.dispatch(&expense(1001, "just over")).actions_taken, vec!["director"]);
    assert_eq!(chain.dispatch(&expense(10000, "vp limit")).actions_taken, vec!["vp"]);
}

#[test]
fn severity_broadcast_fires_every_eligible_handler_in_order() {
    let sink = Arc::new(MemorySink::new());
    let chain = ChainBuilder::new(ChainMode::Broadcast)
        .handler(Handler::new(
            "console",
            Eligibility::severity_at_least(Severity::Info),
            sink.clone(),
        ))
        .handler(Handler::new(
            "file",
            Eligibility::severity_at_least(Severity::Warning),
            sink.clone(),
        ))
        .handler(Handler::new(
            "email",
            Eligibility::severity_at_least(Severity::Error),
            sink.clone(),
        ))
        .handler(Handler::new(
            "database",
            Eligibility::severity_at_least(Severity::Critical),
            sink.clone(),
        ))
        .build();

    let request = Request::new(Severity::Error, 0, "WebService", "service unavailable");
    let outcome = chain.dispatch(&request);

    assert!(outcome.handled);
    assert_eq!(outcome.actions_taken, vec!["console", "file", "email"]);
    assert_eq!(sink.lines().len(), 3);

    // A critical request reaches all four
    let request = Request::new(Severity::Critical, 500, "DatabaseService", "data corruption");
    let outcome = chain.dispatch(&request);
    assert_eq!(
        outcome.actions_taken,
        vec!["console", "file", "email", "database"]
    );
}

#[test]
fn retry_handler_fires_only_on_matching_code() {
    let sink = Arc::new(MemorySink::new());
    let chain = ChainBuilder::new(ChainMode::Broadcast)
        .handler(Handler::new(
            "console",
            Eligibility::severity_at_least(Severity::Info),
            sink.clone(),
        ))
        .handler(Handler::new(
            "retry",
            Eligibility::severity_at_least(Severity::Error).with_magnitude_equals(503),
            sink.clone(),
        ))
        .build();

    let retryable = Request::new(Severity::Error, 503, "PaymentService", "gateway timeout");
    assert_eq!(
        chain.dispatch(&retryable).actions_taken,
        vec!["console", "retry"]
    );

    let other = Request::new(Severity::Error, 500, "PaymentService", "internal error");
    assert_eq!(chain.dispatch(&other).actions_taken, vec!["console"]);
}

#[test]
fn first_match_failure_falls_through_to_next_approver() {
    let broken = Arc::new(NotifySink::new("manager@example.com"));
    broken.set_unavailable(true);
    let sink = Arc::new(MemorySink::new());

    let chain = ChainBuilder::new(ChainMode::FirstMatch)
        .handler(Handler::new("manager", Eligibility::amount_within(1000), broken))
        .handler(Handler::new("director", Eligibility::amount_within(5000), sink))
        .build();

    let outcome = chain.dispatch(&expense(400, "Team Lunch"));
    assert!(outcome.handled);
    assert_eq!(outcome.actions_taken, vec!["director"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].handler_id, "manager");
}

#[test]
fn repeat_dispatch_is_deterministic() {
    let sink = Arc::new(MemorySink::new());
    let chain = approval_chain(sink);
    let request = expense(3000, "Conference Expenses");

    let first = chain.dispatch(&request);
    let second = chain.dispatch(&request);

    assert_eq!(first.handled, second.handled);
    assert_eq!(first.actions_taken, second.actions_taken);
    assert!(first.failures.is_empty() && second.failures.is_empty());
}

#[test]
fn chain_built_from_toml_config_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("relaybox.toml");
    let log_path = temp_dir.path().join("relaybox.log");

    let toml_content = format!(
        r#"
[chain]
mode = "broadcast"

[[chain.handlers]]
id = "console"
min_severity = "info"

[[chain.handlers]]
id = "file"
sink = "file"
min_severity = "warning"

[sinks.file]
path = "{}"
        "#,
        log_path.display()
    );
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = Config::load_from_path(config_path).expect("Failed to load config");
    let chain = config.build_chain().expect("Failed to build chain");
    let metrics = Metrics::new();

    let info = Request::new(Severity::Info, 0, "App", "started");
    let outcome = chain.dispatch(&info);
    metrics.record_dispatch(&outcome);
    assert_eq!(outcome.actions_taken, vec!["console"]);

    let warning = Request::new(Severity::Warning, 101, "WebService", "high memory usage");
    let outcome = chain.dispatch(&warning);
    metrics.record_dispatch(&outcome);
    assert_eq!(outcome.actions_taken, vec!["console", "file"]);

    // Only the warning reached the log file
    let contents = fs::read_to_string(&log_path).expect("Log file missing");
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("high memory usage"));

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.dispatches, 2);
    assert_eq!(snapshot.actions, 3);
    assert_eq!(snapshot.unhandled, 0);
}

#[test]
fn registry_backed_chain_shares_sinks_across_handlers() {
    let capture = Arc::new(MemorySink::new());
    let mut registry = SinkRegistry::with_defaults();
    registry.register("memory", capture.clone());

    let chain = ChainBuilder::new(ChainMode::Broadcast)
        .handler(Handler::new(
            "first",
            Eligibility::any(),
            registry.get("memory").expect("memory sink registered"),
        ))
        .handler(Handler::new(
            "second",
            Eligibility::any(),
            registry.get("memory").expect("memory sink registered"),
        ))
        .build();

    let request = Request::new(Severity::Info, 0, "App", "shared sink");
    let outcome = chain.dispatch(&request);

    assert_eq!(outcome.actions_taken, vec!["first", "second"]);
    let lines = capture.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[first]"));
    assert!(lines[1].starts_with("[second]"));
}
