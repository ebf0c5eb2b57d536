//! WriterSender - writes events as JSON lines

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_channel::TrySendError;
use chrono::{DateTime, Utc};
use contracts::{
    ContractError, Event, Response, ResponseStream, Sender, SenderConfig, SenderType,
    WriterTarget,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument, warn};

use crate::metrics::SenderMetrics;

/// Status reported for an event that reached the writer
const WRITTEN_STATUS: u16 = 200;

/// Response stream behavior
#[derive(Debug, Clone, Copy)]
pub struct WriterSenderConfig {
    /// Capacity of the response stream
    pub response_queue_size: usize,
    /// Block when the stream is full instead of dropping
    pub block_on_responses: bool,
}

impl Default for WriterSenderConfig {
    fn default() -> Self {
        Self {
            response_queue_size: 1000,
            block_on_responses: false,
        }
    }
}

impl From<&SenderConfig> for WriterSenderConfig {
    fn from(config: &SenderConfig) -> Self {
        Self {
            response_queue_size: config.response_queue_size,
            block_on_responses: config.block_on_responses,
        }
    }
}

/// Wire form of one event line
#[derive(Serialize)]
struct EventLine<'a> {
    data: &'a Map<String, Value>,
    #[serde(rename = "samplerate", skip_serializing_if = "is_zero")]
    sample_rate: u32,
    #[serde(rename = "time", skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_empty")]
    dataset: &'a str,
}

impl<'a> From<&'a Event> for EventLine<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            data: &event.data,
            sample_rate: event.sample_rate,
            timestamp: event.timestamp.as_ref(),
            dataset: &event.dataset,
        }
    }
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

fn is_empty(s: &&str) -> bool {
    s.is_empty()
}

/// Sender that writes every event as one JSON line and acknowledges it
/// on its response stream
pub struct WriterSender {
    name: String,
    writer: Mutex<Box<dyn Write + Send>>,
    config: WriterSenderConfig,
    responses_tx: async_channel::Sender<Response>,
    responses_rx: ResponseStream,
    started: AtomicBool,
    metrics: Arc<SenderMetrics>,
}

impl WriterSender {
    /// Create a new WriterSender over any writer
    pub fn new(
        name: impl Into<String>,
        writer: impl Write + Send + 'static,
        config: WriterSenderConfig,
    ) -> Self {
        let (responses_tx, responses_rx) = async_channel::bounded(config.response_queue_size.max(1));
        Self {
            name: name.into(),
            writer: Mutex::new(Box::new(writer)),
            config,
            responses_tx,
            responses_rx,
            started: AtomicBool::new(false),
            metrics: Arc::new(SenderMetrics::new()),
        }
    }

    /// Writer to the process stderr
    pub fn stderr(name: impl Into<String>) -> Self {
        Self::new(name, io::stderr(), WriterSenderConfig::default())
    }

    /// Writer to the process stdout
    pub fn stdout(name: impl Into<String>) -> Self {
        Self::new(name, io::stdout(), WriterSenderConfig::default())
    }

    /// Writer that discards every line but still acknowledges each event
    pub fn discard(name: impl Into<String>) -> Self {
        Self::new(name, io::sink(), WriterSenderConfig::default())
    }

    /// Create from sender configuration (for factory)
    #[instrument(name = "writer_sender_from_config", skip(config), fields(sender = %config.name))]
    pub fn from_config(config: &SenderConfig) -> Result<Self, ContractError> {
        let options = WriterSenderConfig::from(config);
        let name = config.name.clone();

        let sender = match config.sender_type {
            SenderType::Discard => Self::new(name, io::sink(), options),
            SenderType::Writer => match WriterTarget::from_params(&config.params)
                .map_err(|e| ContractError::config_validation(format!("senders[{name}].params"), e))?
            {
                WriterTarget::Stderr => Self::new(name, io::stderr(), options),
                WriterTarget::Stdout => Self::new(name, io::stdout(), options),
                WriterTarget::File(path) => {
                    let file = OpenOptions::new().create(true).append(true).open(&path)?;
                    debug!(sender = %name, path = %path.display(), "Opened output file");
                    Self::new(name, file, options)
                }
            },
        };

        Ok(sender)
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<SenderMetrics> {
        &self.metrics
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    fn write_event(&self, event: &Event) -> io::Result<()> {
        let mut line = serde_json::to_vec(&EventLine::from(event))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        line.push(b'\n');

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&line)
    }
}

impl Sender for WriterSender {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "writer_sender_start", skip(self), fields(sender = %self.name))]
    fn start(&self) -> Result<(), ContractError> {
        if self.started.swap(true, Ordering::AcqRel) {
            debug!(sender = %self.name, "WriterSender already started");
        } else {
            info!(sender = %self.name, "WriterSender started");
        }
        observability::record_lifecycle(&self.name, "start", true);
        Ok(())
    }

    #[instrument(name = "writer_sender_stop", skip(self), fields(sender = %self.name))]
    fn stop(&self) -> Result<(), ContractError> {
        self.started.store(false, Ordering::Release);

        let flushed = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
        observability::record_lifecycle(&self.name, "stop", flushed.is_ok());

        match flushed {
            Ok(()) => {
                info!(sender = %self.name, metrics = ?self.metrics.snapshot(), "WriterSender stopped");
                Ok(())
            }
            Err(e) => {
                error!(sender = %self.name, error = %e, "Flush failed on stop");
                Err(ContractError::sender_stop(&self.name, e.to_string()))
            }
        }
    }

    fn add(&self, event: Arc<Event>) {
        let begin = Instant::now();
        observability::record_event_added(&self.name);

        let response = match self.write_event(&event) {
            Ok(()) => {
                self.metrics.inc_write_count();
                Response::ok(WRITTEN_STATUS, event.metadata.clone())
            }
            Err(e) => {
                self.metrics.inc_failure_count();
                error!(sender = %self.name, dataset = %event.dataset, error = %e, "Write failed");
                Response::failed(e.to_string(), event.metadata.clone())
            }
        };

        self.send_response(response.with_duration(begin.elapsed()));
    }

    fn tx_responses(&self) -> ResponseStream {
        self.responses_rx.clone()
    }

    fn send_response(&self, response: Response) -> bool {
        let success = response.is_success();

        let dropped = if self.config.block_on_responses {
            self.responses_tx.send_blocking(response).is_err()
        } else {
            match self.responses_tx.try_send(response) {
                Ok(()) => false,
                Err(TrySendError::Full(_)) => {
                    warn!(sender = %self.name, "Response queue full, response dropped");
                    true
                }
                Err(TrySendError::Closed(_)) => {
                    warn!(sender = %self.name, "Response stream closed");
                    true
                }
            }
        };

        if dropped {
            self.metrics.inc_dropped_responses();
            observability::record_response_dropped(&self.name);
        } else {
            self.metrics.inc_response_count();
            observability::record_response(&self.name, success);
        }
        dropped
    }
}
