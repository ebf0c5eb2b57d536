//! Configuration parsing
//!
//! Supports TOML (primary) and JSON.

use contracts::{ContractError, TransmissionConfig};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<TransmissionConfig, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<TransmissionConfig, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<TransmissionConfig, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::SenderType;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[[senders]]
name = "stderr"
sender_type = "writer"

[[senders]]
name = "audit"
sender_type = "writer"
response_queue_size = 16
block_on_responses = true
[senders.params]
target = "file"
path = "/var/log/events.jsonl"
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.senders.len(), 2);
        assert_eq!(config.senders[0].response_queue_size, 1000);
        assert!(!config.senders[0].block_on_responses);
        assert_eq!(config.senders[1].response_queue_size, 16);
        assert!(config.senders[1].block_on_responses);
        assert_eq!(config.senders[1].params["target"], "file");
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "senders": [
                { "name": "stderr", "sender_type": "writer" },
                { "name": "null", "sender_type": "discard" }
            ]
        }"#;
        let config = parse_json(content).unwrap();
        assert_eq!(config.senders[1].sender_type, SenderType::Discard);
    }

    #[test]
    fn test_parse_unknown_sender_type() {
        let content = r#"
[[senders]]
name = "x"
sender_type = "carrier_pigeon"
"#;
        assert!(matches!(
            parse_toml(content),
            Err(ContractError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let result = parse_toml("invalid toml [[[");
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
