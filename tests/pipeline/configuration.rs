//! Configuration files driving the hooks

use crate::common::CollectingSink;
use reqevents::config::{load_config_file, AnalyticsConfig, ConfigError};
use reqevents::hooks::{record_event, EventHooks};
use reqevents::request::RequestContext;
use reqevents::sender::EventSink;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

async fn analytics_from(contents: &str) -> AnalyticsConfig {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("reqevents.toml");
    std::fs::write(&path, contents).unwrap();

    let table = load_config_file(Some(&path)).await.unwrap().unwrap();
    AnalyticsConfig::from_toml(&table).unwrap()
}

#[tokio::test]
async fn test_configured_file_enables_hooks() {
    let analytics = analytics_from(
        r#"
        [analytics]
        project-id = " shop "
        write-key = "ab cd\nef"
        max-batch-size = 10
        "#,
    )
    .await;

    let sink = Arc::new(CollectingSink::default());
    let mut seen_credentials = None;
    let hooks = EventHooks::from_config(&analytics, |credentials| {
        seen_credentials = Some(credentials.clone());
        Ok(sink.clone() as Arc<dyn EventSink>)
    })
    .expect("hooks should be enabled");

    let credentials = seen_credentials.unwrap();
    assert_eq!(credentials.project_id(), "shop");
    assert_eq!(credentials.write_key(), "abcdef");
    assert_eq!(analytics.sender_options().max_batch_size, 10);

    let mut ctx = RequestContext::new();
    hooks.on_request_start(&mut ctx);
    record_event(&ctx, "signups", json!({"plan": "free"}));
    hooks.on_request_end(&ctx);

    assert_eq!(
        sink.received(),
        vec![("signups".to_string(), json!({"plan": "free"}))]
    );
}

#[tokio::test]
async fn test_legacy_keys_enable_hooks() {
    let analytics = analytics_from(
        r#"
        KeenioProjectId = "legacy"
        KeenioWriteKey = "legacy-key"
        "#,
    )
    .await;

    let hooks = EventHooks::from_config(&analytics, |_| {
        Ok(Arc::new(CollectingSink::default()) as Arc<dyn EventSink>)
    });

    assert!(hooks.is_some());
}

#[tokio::test]
async fn test_missing_write_key_disables_hooks() {
    let analytics = analytics_from(
        r#"
        [analytics]
        project-id = "shop"
        "#,
    )
    .await;

    let mut sink_started = false;
    let hooks = EventHooks::from_config(&analytics, |_| {
        sink_started = true;
        Ok(Arc::new(CollectingSink::default()) as Arc<dyn EventSink>)
    });

    assert!(hooks.is_none());
    assert!(!sink_started);
    assert!(matches!(
        analytics.credentials(),
        Err(ConfigError::MissingWriteKey)
    ));
}

#[tokio::test]
async fn test_missing_explicit_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    assert!(matches!(
        load_config_file(Some(&path)).await,
        Err(ConfigError::NotFound { .. })
    ));
}
