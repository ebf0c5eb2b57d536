//! Event - the unit of telemetry handed to a Sender

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One telemetry event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Collector host the event is addressed to
    #[serde(default)]
    pub api_host: String,

    /// Write key for the collector
    #[serde(default)]
    pub api_key: String,

    /// Destination dataset
    #[serde(default)]
    pub dataset: String,

    /// Sample rate (1 in N); 0 means unset
    #[serde(default)]
    pub sample_rate: u32,

    /// Event time; `None` lets the receiving side stamp it
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Opaque caller data echoed back on the response
    #[serde(default)]
    pub metadata: Option<Value>,

    /// Event fields
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Event {
    /// Create an empty event for the given dataset
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Self::default()
        }
    }

    /// Add a field, replacing any previous value under the same key
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_metadata(mut self, metadata: impl Into<Value>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }
}
