//! Response - outcome of one transmission attempt

use std::time::Duration;

use bytes::Bytes;
use serde_json::Value;

/// Delivery report published on a sender's response stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Status reported by the backend (0 when nothing was delivered)
    pub status_code: u16,
    /// Raw body returned by the backend
    pub body: Bytes,
    /// Time spent on the attempt
    pub duration: Duration,
    /// Metadata copied from the originating event
    pub metadata: Option<Value>,
    /// Delivery error, if any
    pub error: Option<String>,
}

impl Response {
    /// Successful response for an event carrying `metadata`
    pub fn ok(status_code: u16, metadata: Option<Value>) -> Self {
        Self {
            status_code,
            metadata,
            ..Self::default()
        }
    }

    /// Failed response for an event carrying `metadata`
    pub fn failed(error: impl Into<String>, metadata: Option<Value>) -> Self {
        Self {
            error: Some(error.into()),
            metadata,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// No error and a 2xx status
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status_code)
    }
}
