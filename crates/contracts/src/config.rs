//! TransmissionConfig - Config Loader output
//!
//! Describes which senders to build and how their response streams behave.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete transmission configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransmissionConfig {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Delegate senders, in fan-out order
    #[validate(nested)]
    pub senders: Vec<SenderConfig>,
}

/// Sender configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SenderConfig {
    /// Sender name
    #[validate(length(min = 1, message = "sender name cannot be empty"))]
    pub name: String,

    /// Sender type
    pub sender_type: SenderType,

    /// Capacity of the response stream
    #[serde(default = "default_response_queue_size")]
    #[validate(range(min = 1, message = "response_queue_size must be >= 1"))]
    pub response_queue_size: usize,

    /// Block instead of dropping when the response stream is full
    #[serde(default)]
    pub block_on_responses: bool,

    /// Type specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_response_queue_size() -> usize {
    1000
}

impl SenderConfig {
    /// Config with default queue settings and no params
    pub fn new(name: impl Into<String>, sender_type: SenderType) -> Self {
        Self {
            name: name.into(),
            sender_type,
            response_queue_size: default_response_queue_size(),
            block_on_responses: false,
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Sender type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    /// JSON lines to stderr / stdout / a file
    Writer,
    /// Accepts and acknowledges everything, writes nothing
    Discard,
}

/// Output of a writer sender, parsed from `params`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterTarget {
    Stderr,
    Stdout,
    File(std::path::PathBuf),
}

impl WriterTarget {
    /// Parse `target` (default `stderr`) and, for files, `path`
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        match params.get("target").map(String::as_str) {
            Some("stderr") | None => Ok(Self::Stderr),
            Some("stdout") => Ok(Self::Stdout),
            Some("file") => params
                .get("path")
                .filter(|p| !p.is_empty())
                .map(|p| Self::File(p.into()))
                .ok_or_else(|| "missing 'path' parameter for file target".to_string()),
            Some(other) => Err(format!("unknown target '{}'", other)),
        }
    }
}
