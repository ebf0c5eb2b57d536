//! Layered error definitions
//!
//! Categorized by source: config / sender lifecycle / io

use std::fmt;

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Sender Lifecycle Errors =====
    /// A fan-out sender was started without any delegates
    #[error("no senders configured")]
    NoSenders,

    /// Sender failed to start
    #[error("sender '{sender_name}' start error: {message}")]
    SenderStart { sender_name: String, message: String },

    /// Sender failed to stop
    #[error("sender '{sender_name}' stop error: {message}")]
    SenderStop { sender_name: String, message: String },

    /// Several delegates failed during one lifecycle call
    #[error("{0}")]
    Aggregate(SenderErrors),

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create sender start error
    pub fn sender_start(sender_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SenderStart {
            sender_name: sender_name.into(),
            message: message.into(),
        }
    }

    /// Create sender stop error
    pub fn sender_stop(sender_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SenderStop {
            sender_name: sender_name.into(),
            message: message.into(),
        }
    }
}

/// Errors collected from the delegates of a fan-out sender, in delegate order
#[derive(Debug, Default)]
pub struct SenderErrors {
    errors: Vec<ContractError>,
}

impl SenderErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ContractError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ContractError] {
        &self.errors
    }

    /// `Ok(())` when nothing was collected, otherwise [`ContractError::Aggregate`]
    pub fn into_result(self) -> Result<(), ContractError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ContractError::Aggregate(self))
        }
    }
}

impl fmt::Display for SenderErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sender(s) failed", self.errors.len())?;
        for (idx, error) in self.errors.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

impl From<Vec<ContractError>> for SenderErrors {
    fn from(errors: Vec<ContractError>) -> Self {
        Self { errors }
    }
}
