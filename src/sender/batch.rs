//! Batch of events grouped by collection

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Events handed to a `BatchDelivery` in one call
///
/// Collections are kept in sorted order; events inside a collection keep the
/// order in which they were enqueued.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch {
    pub project_id: String,
    pub events: BTreeMap<String, Vec<Value>>,
}

impl Batch {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            events: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, collection: String, payload: Value) {
        self.events.entry(collection).or_default().push(payload);
    }

    /// Total number of events across all collections
    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_groups_by_collection() {
        let mut batch = Batch::new("proj");
        batch.add("views".to_string(), json!(1));
        batch.add("purchases".to_string(), json!(2));
        batch.add("views".to_string(), json!(3));

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.events["views"], vec![json!(1), json!(3)]);
        assert_eq!(batch.events["purchases"], vec![json!(2)]);
    }

    #[test]
    fn test_batch_serializes_collections_in_order() {
        let mut batch = Batch::new("proj");
        batch.add("views".to_string(), json!({"page": "home"}));
        batch.add("purchases".to_string(), json!({"item": "book"}));

        let rendered = serde_json::to_string(&batch).unwrap();
        assert_eq!(
            rendered,
            r#"{"project_id":"proj","events":{"purchases":[{"item":"book"}],"views":[{"page":"home"}]}}"#
        );
    }
}
