//! Sender trait - transmission interface
//!
//! Defines the capability every telemetry backend implements, and which the
//! fan-out sender both implements and composes over.

use std::sync::Arc;

use crate::{ContractError, Event, Response};

/// Receiving end of a sender's response stream
pub type ResponseStream = async_channel::Receiver<Response>;

/// Telemetry transmission trait
///
/// All sender implementations must implement this trait. Calls are
/// synchronous; implementations own whatever queuing or concurrency they need
/// and must be safe to call from several threads.
pub trait Sender: Send + Sync {
    /// Sender name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Prepare the sender for transmission
    ///
    /// # Errors
    /// Returns start error (should include sender name)
    fn start(&self) -> Result<(), ContractError>;

    /// Flush pending work and release resources
    fn stop(&self) -> Result<(), ContractError>;

    /// Queue one event for transmission
    fn add(&self, event: Arc<Event>);

    /// Response stream of this sender
    ///
    /// Every call returns a handle to the same underlying channel.
    fn tx_responses(&self) -> ResponseStream;

    /// Publish a response on this sender's stream
    ///
    /// Returns `true` when the response was dropped.
    fn send_response(&self, response: Response) -> bool;
}
