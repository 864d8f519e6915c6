pub mod chain;
pub mod config;
pub mod observability;
pub mod request;
pub mod sinks;
