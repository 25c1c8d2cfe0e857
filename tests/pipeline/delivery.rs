//! Hooks, sender and JSON-lines delivery working together

use crate::common::{delivered_events, read_batches, CollectingSink};
use reqevents::config::SenderCredentials;
use reqevents::hooks::{record_event, EventHooks};
use reqevents::request::{handle_request, RequestContext, RequestHook};
use reqevents::sender::{JsonLinesDelivery, OutboundSender, SenderOptions};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_request_events_reach_batch_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("batches.jsonl");

    let credentials = SenderCredentials::new("proj", "key").unwrap();
    let delivery = Arc::new(JsonLinesDelivery::append_to(&output).await.unwrap());
    let sender = Arc::new(
        OutboundSender::spawn(&credentials, delivery, SenderOptions::default()).unwrap(),
    );
    let hooks = EventHooks::new(sender.clone());
    let pipeline: [&dyn RequestHook; 1] = [&hooks];

    let mut ctx = RequestContext::new();
    handle_request(&pipeline, &mut ctx, |ctx| {
        assert!(record_event(ctx, "purchases", json!({"item": "book"})));
        assert!(record_event(ctx, "views", json!({"page": "home"})));
        assert!(record_event(ctx, "purchases", json!({"item": "pen"})));
        record_event(ctx, "", json!({"ignored": true}));
    });

    let stats = sender.shutdown().await;
    assert_eq!(stats.events_delivered, 3);
    assert_eq!(stats.events_failed, 0);

    let batches = read_batches(&output);
    assert!(!batches.is_empty());
    assert!(batches.iter().all(|batch| batch["project_id"] == "proj"));
    assert_eq!(
        delivered_events(&batches, "purchases"),
        vec![json!({"item": "book"}), json!({"item": "pen"})]
    );
    assert_eq!(
        delivered_events(&batches, "views"),
        vec![json!({"page": "home"})]
    );
}

#[tokio::test]
async fn test_small_batch_size_splits_output() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("batches.jsonl");

    let credentials = SenderCredentials::new("proj", "key").unwrap();
    let delivery = Arc::new(JsonLinesDelivery::append_to(&output).await.unwrap());
    let sender = Arc::new(
        OutboundSender::spawn(&credentials, delivery, SenderOptions { max_batch_size: 2 })
            .unwrap(),
    );
    let hooks = EventHooks::new(sender.clone());
    let pipeline: [&dyn RequestHook; 1] = [&hooks];

    for n in 0..5 {
        let mut ctx = RequestContext::new();
        handle_request(&pipeline, &mut ctx, |ctx| {
            record_event(ctx, "ticks", json!(n));
        });
    }

    let stats = sender.shutdown().await;
    assert_eq!(stats.events_delivered, 5);

    let batches = read_batches(&output);
    assert!(batches.len() >= 3);
    assert!(batches
        .iter()
        .all(|batch| batch["events"]["ticks"].as_array().unwrap().len() <= 2));
    assert_eq!(
        delivered_events(&batches, "ticks"),
        (0..5).map(|n| json!(n)).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_events_after_shutdown_are_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("batches.jsonl");

    let credentials = SenderCredentials::new("proj", "key").unwrap();
    let delivery = Arc::new(JsonLinesDelivery::append_to(&output).await.unwrap());
    let sender = Arc::new(
        OutboundSender::spawn(&credentials, delivery, SenderOptions::default()).unwrap(),
    );
    let hooks = EventHooks::new(sender.clone());
    sender.shutdown().await;

    let mut ctx = RequestContext::new();
    hooks.on_request_start(&mut ctx);
    record_event(&ctx, "late", json!(1));
    let report = hooks.on_request_end(&ctx);

    // The hooks still drain; the closed sender discards the event
    assert_eq!(report.forwarded, 1);
    assert!(sender.is_closed());
}

#[tokio::test]
async fn test_spawned_tasks_record_into_the_request_queue() {
    let sink = Arc::new(CollectingSink::default());
    let hooks = EventHooks::new(sink.clone());

    let mut ctx = RequestContext::new();
    hooks.on_request_start(&mut ctx);
    let queue = reqevents::hooks::event_queue(&ctx).unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|n| {
            let queue = queue.clone();
            tokio::spawn(async move { queue.push("jobs", json!(n)) })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let report = hooks.on_request_end(&ctx);
    assert_eq!(report.forwarded, 8);

    let mut values: Vec<i64> = sink
        .received()
        .into_iter()
        .map(|(_, payload)| payload.as_i64().unwrap())
        .collect();
    values.sort_unstable();
    assert_eq!(values, (0..8).collect::<Vec<_>>());
}
