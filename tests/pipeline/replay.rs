//! Recorded request files replayed end to end

use crate::common::{delivered_events, read_batches, CollectingSink};
use reqevents::app::replay::replay;
use reqevents::config::SenderCredentials;
use reqevents::hooks::EventHooks;
use reqevents::sender::{JsonLinesDelivery, OutboundSender, SenderOptions};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::BufReader;

const RECORDED: &str = r#"{"events":[{"collection":"purchases","payload":{"item":"book","price":12}}]}
{"events":[{"collection":"views","payload":{"page":"home"}},{"collection":"views","payload":{"page":"cart"}}]}
{"events":[{"collection":"purchases"},{"payload":{"orphan":true}}]}
{"events":
"#;

#[tokio::test]
async fn test_replay_file_into_batch_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("requests.jsonl");
    let output = temp_dir.path().join("batches.jsonl");
    std::fs::write(&input, RECORDED).unwrap();

    let credentials = SenderCredentials::new("shop", "secret").unwrap();
    let delivery = Arc::new(JsonLinesDelivery::append_to(&output).await.unwrap());
    let sender = Arc::new(
        OutboundSender::spawn(&credentials, delivery, SenderOptions::default()).unwrap(),
    );
    let hooks = EventHooks::new(sender.clone());

    let file = tokio::fs::File::open(&input).await.unwrap();
    let summary = replay(BufReader::new(file), Some(&hooks)).await.unwrap();
    let stats = sender.shutdown().await;

    assert_eq!(summary.requests, 3);
    assert_eq!(summary.events_recorded, 5);
    assert_eq!(summary.lines_skipped, 1);
    assert_eq!(stats.events_delivered, 3);

    let batches = read_batches(&output);
    assert_eq!(
        delivered_events(&batches, "purchases"),
        vec![json!({"item": "book", "price": 12})]
    );
    assert_eq!(
        delivered_events(&batches, "views"),
        vec![json!({"page": "home"}), json!({"page": "cart"})]
    );
}

#[tokio::test]
async fn test_replay_preserves_per_request_order() {
    let sink = Arc::new(CollectingSink::default());
    let hooks = EventHooks::new(sink.clone());
    let input = (0..20)
        .map(|n| {
            format!(
                r#"{{"events":[{{"collection":"steps","payload":{}}},{{"collection":"steps","payload":{}}}]}}"#,
                n * 2,
                n * 2 + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let summary = replay(input.as_bytes(), Some(&hooks)).await.unwrap();

    assert_eq!(summary.requests, 20);
    let payloads: Vec<_> = sink.received().into_iter().map(|(_, p)| p).collect();
    assert_eq!(payloads, (0..40).map(|n| json!(n)).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_empty_input_replays_nothing() {
    let sink = Arc::new(CollectingSink::default());
    let hooks = EventHooks::new(sink.clone());

    let summary = replay(&b"\n\n   \n"[..], Some(&hooks)).await.unwrap();

    assert_eq!(summary.requests, 0);
    assert_eq!(summary.lines_skipped, 0);
    assert!(sink.received().is_empty());
}
