//! Shared helpers for the integration tests

use reqevents::sender::EventSink;
use serde_json::Value;
use std::path::Path;
use std::sync::Mutex;

/// Sink that keeps every forwarded event in memory
#[derive(Default)]
pub struct CollectingSink {
    received: Mutex<Vec<(String, Value)>>,
}

impl CollectingSink {
    pub fn received(&self) -> Vec<(String, Value)> {
        self.received.lock().unwrap().clone()
    }
}

impl EventSink for CollectingSink {
    fn enqueue(&self, collection: String, payload: Value) {
        self.received.lock().unwrap().push((collection, payload));
    }
}

/// Parse every line of a JSON-lines batch file
pub fn read_batches(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Total events across all batches, in delivery order per collection
pub fn delivered_events(batches: &[Value], collection: &str) -> Vec<Value> {
    batches
        .iter()
        .filter_map(|batch| batch["events"][collection].as_array())
        .flatten()
        .cloned()
        .collect()
}
