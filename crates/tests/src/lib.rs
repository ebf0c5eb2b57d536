//! # Integration Tests
//!
//! Cross-crate tests.
//!
//! Covers:
//! - contract smoke tests
//! - config file -> MultiSender -> delegates, end to end
//! - response stream draining into statistics

#[cfg(test)]
mod contract_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ConfigVersion, SenderConfig, SenderType, TransmissionConfig};

    #[test]
    fn test_transmission_config_survives_json_round_trip() {
        let config = TransmissionConfig {
            version: ConfigVersion::V1,
            senders: vec![
                SenderConfig::new("audit", SenderType::Writer)
                    .with_param("target", "file")
                    .with_param("path", "/tmp/audit.jsonl"),
                SenderConfig::new("null", SenderType::Discard),
            ],
        };

        let json = ConfigLoader::to_json(&config).unwrap();
        let loaded = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();

        assert_eq!(loaded.version, ConfigVersion::V1);
        assert_eq!(loaded.senders.len(), 2);
        assert_eq!(loaded.senders[0].sender_type, SenderType::Writer);
        assert_eq!(loaded.senders[0].params, config.senders[0].params);
        assert_eq!(loaded.senders[1].response_queue_size, 1000);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ContractError, Event, Response, Sender};
    use observability::ResponseStatsAggregator;
    use serde_json::{json, Value};
    use transmission::{create_multi_sender, MockSender, MultiSenderBuilder};

    /// End-to-end: config file -> MultiSender (file writer + discard) -> file contents
    #[tokio::test]
    async fn test_e2e_config_to_file_and_responses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let content = format!(
            r#"
[[senders]]
name = "file"
sender_type = "writer"
[senders.params]
target = "file"
path = "{}"

[[senders]]
name = "null"
sender_type = "discard"
"#,
            path.display()
        );

        let config = ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap();
        let sender = create_multi_sender(&config.senders).unwrap();
        sender.start().unwrap();

        let responses = sender.tx_responses();
        let target_events = 5u64;
        for i in 0..target_events {
            sender.add(Arc::new(
                Event::new("e2e")
                    .with_field("seq", i)
                    .with_metadata(json!({"seq": i})),
            ));
        }

        let mut stats = ResponseStatsAggregator::new();
        for i in 0..target_events {
            let response = responses.recv().await.unwrap();
            assert_eq!(response.metadata, Some(json!({"seq": i})));
            stats.update(&response);
        }
        assert_eq!(stats.summary().succeeded, target_events);

        sender.stop().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> = written
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), target_events as usize);
        assert_eq!(lines[3]["data"]["seq"], json!(3));
        assert_eq!(lines[3]["dataset"], json!("e2e"));
    }

    /// Only the first delegate's responses are reachable through the fan-out sender
    #[tokio::test]
    async fn test_e2e_second_delegate_responses_need_own_handle() {
        let first = Arc::new(MockSender::new("first"));
        let config = contracts::SenderConfig::new("null", contracts::SenderType::Discard);
        let sender = MultiSenderBuilder::new()
            .sender(first.clone())
            .config(&config)
            .unwrap()
            .build();
        let discard = Arc::clone(&sender.senders()[1]);

        sender.start().unwrap();
        sender.add(Arc::new(Event::new("ds")));

        // The mock acknowledges nothing on add; the discard writer does.
        assert!(sender.tx_responses().try_recv().is_err());
        let response = discard.tx_responses().recv().await.unwrap();
        assert!(response.is_success());

        assert!(!sender.send_response(Response::ok(200, None)));
        assert_eq!(first.sent_responses().len(), 1);
        sender.stop().unwrap();
    }

    #[test]
    fn test_e2e_empty_config_fails_to_start() {
        let config = ConfigLoader::load_from_str(r#"{"senders": []}"#, ConfigFormat::Json).unwrap();
        let sender = create_multi_sender(&config.senders).unwrap();
        assert!(matches!(sender.start(), Err(ContractError::NoSenders)));
    }

    #[test]
    fn test_e2e_partial_start_failure_reported() {
        let ok = Arc::new(MockSender::new("ok"));
        let broken = Arc::new(MockSender::new("broken").with_start_error("connection refused"));
        let sender = MultiSenderBuilder::new()
            .sender(broken.clone())
            .sender(ok.clone())
            .build();

        let err = sender.start().unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(ok.started(), 1);

        // Failed delegates are not removed: events still reach both.
        sender.add(Arc::new(Event::new("ds")));
        assert_eq!(ok.events().len(), 1);
        assert_eq!(broken.events().len(), 1);
    }
}
