use super::models::Config;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Handler at position {index} has an empty id")]
    EmptyHandlerId { index: usize },

    #[error("Handler '{handler}' references unregistered sink '{sink}' (available: {available})")]
    UnknownSinkReference {
        handler: String,
        sink: String,
        available: String,
    },

    #[error("Handler '{handler}' has negative {field}: {value}")]
    NegativeThreshold {
        handler: String,
        field: String,
        value: i64,
    },

    #[error("Notify sink configured with empty recipient")]
    EmptyNotifyRecipient,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_sinks(config)?;
    validate_handlers(config)?;
    Ok(())
}

/// Names the sink registry will contain for this configuration
pub fn configured_sink_names(config: &Config) -> BTreeSet<String> {
    let mut names = BTreeSet::from(["console".to_string()]);
    if config.sinks.file.is_some() {
        names.insert("file".to_string());
    }
    if config.sinks.notify.is_some() {
        names.insert("notify".to_string());
    }
    names
}

fn validate_sinks(config: &Config) -> Result<(), ValidationError> {
    if let Some(notify) = &config.sinks.notify
        && notify.recipient.trim().is_empty()
    {
        return Err(ValidationError::EmptyNotifyRecipient);
    }
    Ok(())
}

/// Ensure every handler spec is structurally sound and references a sink that
/// the registry will actually contain. Duplicate ids are deliberately allowed:
/// a duplicated handler is offered the request twice and acts twice.
fn validate_handlers(config: &Config) -> Result<(), ValidationError> {
    let known_sinks = configured_sink_names(config);

    for (index, spec) in config.chain.handlers.iter().enumerate() {
        if spec.id.trim().is_empty() {
            return Err(ValidationError::EmptyHandlerId { index });
        }

        if !known_sinks.contains(&spec.sink) {
            return Err(ValidationError::UnknownSinkReference {
                handler: spec.id.clone(),
                sink: spec.sink.clone(),
                available: known_sinks.iter().cloned().collect::<Vec<_>>().join(", "),
            });
        }

        for (field, value) in [
            ("max_magnitude", spec.max_magnitude),
            ("magnitude_equals", spec.magnitude_equals),
        ] {
            if let Some(value) = value
                && value < 0
            {
                return Err(ValidationError::NegativeThreshold {
                    handler: spec.id.clone(),
                    field: field.to_string(),
                    value,
                });
            }
        }
    }

    Ok(())
}
