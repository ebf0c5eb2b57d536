//! Configuration validation
//!
//! Rules:
//! - field rules declared on the config types (name non-empty, queue size >= 1)
//! - sender names unique
//! - writer params resolve to a target (file target needs a path)

use std::collections::HashSet;

use contracts::{ContractError, SenderType, TransmissionConfig, WriterTarget};
use ::validator::Validate;

/// Validate a TransmissionConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &TransmissionConfig) -> Result<(), ContractError> {
    validate_fields(config)?;
    validate_sender_names(config)?;
    validate_writer_params(config)?;
    Ok(())
}

/// Declarative field rules
fn validate_fields(config: &TransmissionConfig) -> Result<(), ContractError> {
    config
        .validate()
        .map_err(|e| ContractError::config_validation("senders", e.to_string()))
}

/// Sender names must be unique
fn validate_sender_names(config: &TransmissionConfig) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for sender in &config.senders {
        if !seen.insert(&sender.name) {
            return Err(ContractError::config_validation(
                format!("senders[name={}]", sender.name),
                "duplicate sender name",
            ));
        }
    }
    Ok(())
}

/// Writer senders must name a usable target
fn validate_writer_params(config: &TransmissionConfig) -> Result<(), ContractError> {
    for (idx, sender) in config.senders.iter().enumerate() {
        if sender.sender_type != SenderType::Writer {
            continue;
        }
        WriterTarget::from_params(&sender.params).map_err(|message| {
            ContractError::config_validation(format!("senders[{}].params", idx), message)
        })?;
    }
    Ok(())
}
