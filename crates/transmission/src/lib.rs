//! # Transmission
//!
//! Telemetry sender composition.
//!
//! Responsibilities:
//! - Fan-out of every `Event` to an ordered set of delegate senders
//! - Lifecycle of the delegates (start / stop, errors aggregated)
//! - Exposing a single response stream (the first delegate's)
//! - Local senders: JSON lines writer and a recording mock

pub mod error;
pub mod factory;
pub mod metrics;
pub mod multi;
pub mod senders;

pub use contracts::{Event, Response, ResponseStream, Sender};
pub use error::TransmissionError;
pub use factory::{create_multi_sender, create_sender, MultiSenderBuilder};
pub use metrics::{MetricsSnapshot, SenderMetrics};
pub use multi::MultiSender;
pub use senders::{MockSender, WriterSender, WriterSenderConfig};
