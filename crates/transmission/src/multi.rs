//! MultiSender - fan-out of one Sender interface over many delegates

use std::sync::Arc;

use contracts::{ContractError, Event, Response, ResponseStream, Sender, SenderErrors};
use tracing::{debug, error, info, instrument, warn};

/// Sender that forwards every call to an ordered list of delegate senders
///
/// - `start` / `stop` reach every delegate; failures are collected, not short-circuited
/// - `add` hands the same `Arc<Event>` to each delegate in order
/// - `tx_responses` / `send_response` only reach the first delegate. Responses
///   of later delegates are not reachable through this sender; callers that
///   need them must keep their own handle to the delegate.
#[derive(Default)]
pub struct MultiSender {
    senders: Vec<Arc<dyn Sender>>,
}

impl MultiSender {
    /// Create a MultiSender over the given delegates
    pub fn new(senders: Vec<Arc<dyn Sender>>) -> Self {
        Self { senders }
    }

    /// Append a delegate
    pub fn push(&mut self, sender: Arc<dyn Sender>) {
        debug!(sender = %sender.name(), position = self.senders.len(), "Delegate added");
        self.senders.push(sender);
    }

    /// Delegates, in fan-out order
    pub fn senders(&self) -> &[Arc<dyn Sender>] {
        &self.senders
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    fn first(&self) -> Option<&Arc<dyn Sender>> {
        self.senders.first()
    }
}

impl Sender for MultiSender {
    fn name(&self) -> &str {
        "multi"
    }

    #[instrument(name = "multi_sender_start", skip(self), fields(senders = self.senders.len()))]
    fn start(&self) -> Result<(), ContractError> {
        if self.senders.is_empty() {
            warn!("MultiSender started without delegates");
            return Err(ContractError::NoSenders);
        }

        let mut errors = SenderErrors::new();
        for sender in &self.senders {
            if let Err(e) = sender.start() {
                error!(sender = %sender.name(), error = %e, "Delegate failed to start");
                errors.push(e);
            }
        }

        info!(
            senders = self.senders.len(),
            failed = errors.len(),
            "MultiSender started"
        );
        errors.into_result()
    }

    #[instrument(name = "multi_sender_stop", skip(self), fields(senders = self.senders.len()))]
    fn stop(&self) -> Result<(), ContractError> {
        let mut errors = SenderErrors::new();
        for sender in &self.senders {
            if let Err(e) = sender.stop() {
                error!(sender = %sender.name(), error = %e, "Delegate failed to stop");
                errors.push(e);
            }
        }

        info!(
            senders = self.senders.len(),
            failed = errors.len(),
            "MultiSender stopped"
        );
        errors.into_result()
    }

    fn add(&self, event: Arc<Event>) {
        for sender in &self.senders {
            sender.add(Arc::clone(&event));
        }
    }

    fn tx_responses(&self) -> ResponseStream {
        match self.first() {
            Some(sender) => sender.tx_responses(),
            None => {
                // Nothing can ever be published: hand out a closed, empty stream.
                let (_, rx) = async_channel::bounded(1);
                rx
            }
        }
    }

    fn send_response(&self, response: Response) -> bool {
        match self.first() {
            Some(sender) => sender.send_response(response),
            None => {
                warn!("Response dropped, MultiSender has no delegates");
                true
            }
        }
    }
}
