mod cli;

use clap::Parser;
use cli::{Cli, Commands, DispatchArgs};

use relaybox::config::Config;
use relaybox::observability::Metrics;
use relaybox::request::Request;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path.clone())?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Dispatch(args) => dispatch(&config, args),
        Commands::Check => check(&config),
    }
}

fn dispatch(
    config: &Config,
    args: DispatchArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let chain = config.build_chain()?;
    let metrics = Metrics::new();

    let request = Request::new(args.severity, args.magnitude, args.component, args.message);
    let outcome = chain.dispatch(&request);
    metrics.record_dispatch(&outcome);

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn check(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let chain = config.build_chain()?;

    if chain.is_empty() {
        tracing::warn!("Chain is valid but has no handlers; every dispatch will be unhandled");
    }

    println!("mode: {:?}", chain.mode());
    for handler in chain.handlers() {
        let eligibility = handler.eligibility();
        println!(
            "  {} -> {} (min_severity: {:?}, max_magnitude: {:?}, magnitude_equals: {:?})",
            handler.id(),
            handler.sink_kind(),
            eligibility.min_severity,
            eligibility.max_magnitude,
            eligibility.magnitude_equals,
        );
    }
    Ok(())
}
