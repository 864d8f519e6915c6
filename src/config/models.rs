use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::chain::ChainMode;
use crate::request::Severity;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub sinks: SinksConfig,
}

/// Chain configuration: continuation mode plus the ordered handler list
///
/// Handlers are a list, not a map: position in the list is traversal order,
/// which is part of the chain contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainConfig {
    #[serde(default = "default_mode")]
    pub mode: ChainMode,
    #[serde(default)]
    pub handlers: Vec<HandlerSpec>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            handlers: Vec::new(),
        }
    }
}

fn default_mode() -> ChainMode {
    ChainMode::Broadcast
}

/// One handler specification
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerSpec {
    pub id: String,
    /// Sink name resolved against the sink registry at build time
    #[serde(default = "default_sink")]
    pub sink: String,
    /// Inclusive severity floor (`severity >= min_severity`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_severity: Option<Severity>,
    /// Inclusive magnitude cap (`magnitude <= max_magnitude`), the
    /// approval-limit clause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_magnitude: Option<i64>,
    /// Exact-match refinement (retry-style handlers keyed on one error code)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude_equals: Option<i64>,
}

fn default_sink() -> String {
    "console".to_string()
}

/// Sink settings; a section that is absent means that sink is not registered
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SinksConfig {
    pub file: Option<FileSinkConfig>,
    pub notify: Option<NotifySinkConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileSinkConfig {
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs/relaybox.log")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifySinkConfig {
    pub recipient: String,
}
