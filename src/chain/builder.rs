use thiserror::Error;
use tracing::debug;

use super::dispatch::{ChainMode, HandlerChain};
use super::handler::{Eligibility, Handler};
use crate::config::{ChainConfig, HandlerSpec};
use crate::sinks::SinkRegistry;

/// Build-time errors: a chain is never constructed from an invalid spec
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("handler at position {index} has an empty id")]
    EmptyHandlerId { index: usize },

    #[error("handler '{handler}' references unknown sink '{sink}'")]
    UnknownSink { handler: String, sink: String },

    #[error("handler '{handler}' has negative {field}: {value}")]
    NegativeThreshold {
        handler: String,
        field: &'static str,
        value: i64,
    },
}

/// Builder assembling an immutable chain, either programmatically or from
/// configuration specs resolved against a sink registry
pub struct ChainBuilder {
    mode: ChainMode,
    handlers: Vec<Handler>,
}

impl ChainBuilder {
    pub fn new(mode: ChainMode) -> Self {
        Self {
            mode,
            handlers: Vec::new(),
        }
    }

    /// Append a handler; chain order is append order
    pub fn handler(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn build(self) -> HandlerChain {
        HandlerChain::new(self.handlers, self.mode)
    }

    /// Resolve an ordered list of handler specs into a chain
    ///
    /// Duplicate ids are allowed (a duplicated handler acts twice); empty ids,
    /// unknown sink references, and negative thresholds are rejected here so
    /// dispatch never has to deal with a half-valid chain.
    pub fn from_config(
        config: &ChainConfig,
        sinks: &SinkRegistry,
    ) -> Result<HandlerChain, ConfigurationError> {
        let mut builder = ChainBuilder::new(config.mode);

        for (index, spec) in config.handlers.iter().enumerate() {
            builder = builder.handler(resolve_spec(index, spec, sinks)?);
        }

        let chain = builder.build();
        debug!(
            mode = ?chain.mode(),
            handlers = chain.len(),
            "Handler chain constructed"
        );
        Ok(chain)
    }
}

fn resolve_spec(
    index: usize,
    spec: &HandlerSpec,
    sinks: &SinkRegistry,
) -> Result<Handler, ConfigurationError> {
    if spec.id.trim().is_empty() {
        return Err(ConfigurationError::EmptyHandlerId { index });
    }

    for (field, value) in [
        ("max_magnitude", spec.max_magnitude),
        ("magnitude_equals", spec.magnitude_equals),
    ] {
        if let Some(value) = value
            && value < 0
        {
            return Err(ConfigurationError::NegativeThreshold {
                handler: spec.id.clone(),
                field,
                value,
            });
        }
    }

    let sink = sinks
        .get(&spec.sink)
        .map_err(|_| ConfigurationError::UnknownSink {
            handler: spec.id.clone(),
            sink: spec.sink.clone(),
        })?;

    let eligibility = Eligibility {
        min_severity: spec.min_severity,
        max_magnitude: spec.max_magnitude,
        magnitude_equals: spec.magnitude_equals,
    };

    Ok(Handler::new(spec.id.clone(), eligibility, sink))
}
