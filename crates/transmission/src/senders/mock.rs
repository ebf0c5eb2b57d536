//! MockSender - records every call for tests and dry runs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use contracts::{ContractError, Event, Response, ResponseStream, Sender};
use tracing::trace;

/// Sender that records lifecycle calls, events and responses
pub struct MockSender {
    name: String,
    started: AtomicUsize,
    stopped: AtomicUsize,
    events: Mutex<Vec<Arc<Event>>>,
    responses: Mutex<Vec<Response>>,
    start_error: Option<String>,
    stop_error: Option<String>,
    responses_tx: async_channel::Sender<Response>,
    responses_rx: ResponseStream,
}

impl MockSender {
    pub fn new(name: impl Into<String>) -> Self {
        let (responses_tx, responses_rx) = async_channel::unbounded();
        Self {
            name: name.into(),
            started: AtomicUsize::new(0),
            stopped: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
            responses: Mutex::new(Vec::new()),
            start_error: None,
            stop_error: None,
            responses_tx,
            responses_rx,
        }
    }

    /// Make every `start` call fail with `message`
    pub fn with_start_error(mut self, message: impl Into<String>) -> Self {
        self.start_error = Some(message.into());
        self
    }

    /// Make every `stop` call fail with `message`
    pub fn with_stop_error(mut self, message: impl Into<String>) -> Self {
        self.stop_error = Some(message.into());
        self
    }

    /// Number of `start` calls
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of `stop` calls
    pub fn stopped(&self) -> usize {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Events received so far, in arrival order
    pub fn events(&self) -> Vec<Arc<Event>> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Responses passed to `send_response` so far
    pub fn sent_responses(&self) -> Vec<Response> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Sender for MockSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self) -> Result<(), ContractError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        match &self.start_error {
            Some(message) => Err(ContractError::sender_start(&self.name, message)),
            None => Ok(()),
        }
    }

    fn stop(&self) -> Result<(), ContractError> {
        self.stopped.fetch_add(1, Ordering::SeqCst);
        match &self.stop_error {
            Some(message) => Err(ContractError::sender_stop(&self.name, message)),
            None => Ok(()),
        }
    }

    fn add(&self, event: Arc<Event>) {
        trace!(sender = %self.name, dataset = %event.dataset, "MockSender recorded event");
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn tx_responses(&self) -> ResponseStream {
        self.responses_rx.clone()
    }

    fn send_response(&self, response: Response) -> bool {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(response.clone());
        // Unbounded and the receiver is owned by self, so this never fails.
        let _ = self.responses_tx.try_send(response);
        false
    }
}
