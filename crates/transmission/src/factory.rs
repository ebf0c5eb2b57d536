//! Sender construction from configuration

use std::sync::Arc;

use contracts::{Sender, SenderConfig};
use tracing::{info, instrument};

use crate::error::TransmissionError;
use crate::multi::MultiSender;
use crate::senders::WriterSender;

/// Create a Sender from configuration
#[instrument(
    name = "transmission_create_sender",
    skip(config),
    fields(sender = %config.name, sender_type = ?config.sender_type)
)]
pub fn create_sender(config: &SenderConfig) -> Result<Arc<dyn Sender>, TransmissionError> {
    let sender = WriterSender::from_config(config)
        .map_err(|e| TransmissionError::sender_creation(&config.name, e.to_string()))?;
    Ok(Arc::new(sender))
}

/// Builder for creating a MultiSender
#[derive(Default)]
pub struct MultiSenderBuilder {
    senders: Vec<Arc<dyn Sender>>,
}

impl MultiSenderBuilder {
    /// Create a new MultiSenderBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already constructed delegate
    pub fn sender(mut self, sender: Arc<dyn Sender>) -> Self {
        self.senders.push(sender);
        self
    }

    /// Append a delegate built from configuration
    pub fn config(mut self, config: &SenderConfig) -> Result<Self, TransmissionError> {
        self.senders.push(create_sender(config)?);
        Ok(self)
    }

    /// Append delegates built from configuration, in order
    pub fn configs(self, configs: &[SenderConfig]) -> Result<Self, TransmissionError> {
        configs.iter().try_fold(self, |builder, config| builder.config(config))
    }

    /// Build the MultiSender (not started)
    pub fn build(self) -> MultiSender {
        info!(senders = self.senders.len(), "MultiSender built");
        MultiSender::new(self.senders)
    }
}

/// Convenience function to create a MultiSender from sender configs
#[instrument(name = "transmission_create_multi_sender", skip(configs), fields(senders = configs.len()))]
pub fn create_multi_sender(configs: &[SenderConfig]) -> Result<MultiSender, TransmissionError> {
    Ok(MultiSenderBuilder::new().configs(configs)?.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::senders::MockSender;
    use contracts::{Event, SenderType};

    #[test]
    fn test_create_multi_sender_from_config() {
        let configs = vec![
            SenderConfig::new("stderr", SenderType::Writer),
            SenderConfig::new("discard", SenderType::Discard),
        ];

        let sender = create_multi_sender(&configs).unwrap();
        let names: Vec<_> = sender.senders().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["stderr", "discard"]);

        sender.start().unwrap();
        sender.add(Arc::new(Event::new("ds").with_field("k", 1)));
        assert!(sender.tx_responses().try_recv().unwrap().is_success());
        sender.stop().unwrap();
    }

    #[test]
    fn test_create_sender_invalid_target() {
        let config = SenderConfig::new("bad", SenderType::Writer).with_param("target", "file");
        let err = create_sender(&config).err().unwrap();
        assert!(matches!(err, TransmissionError::SenderCreation { .. }));
        assert!(err.to_string().contains("'bad'"));
    }

    #[test]
    fn test_builder_mixes_explicit_and_configured() {
        let mock = Arc::new(MockSender::new("mock"));
        let sender = MultiSenderBuilder::new()
            .sender(mock.clone())
            .config(&SenderConfig::new("discard", SenderType::Discard))
            .unwrap()
            .build();

        assert_eq!(sender.len(), 2);
        assert!(sender.tx_responses().same_channel(&mock.tx_responses()));
    }
}
