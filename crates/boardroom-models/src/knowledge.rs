use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An agent's accumulated key-value context.
///
/// Updates merge key-by-key (last write wins per key) and never clear
/// unrelated keys. Owned exclusively by an agent's mailbox task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeBase(Map<String, Value>);

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a partial update. Only object values contribute; anything else
    /// is ignored since the knowledge base is a flat key-value map.
    pub fn merge(&mut self, partial: Value) {
        if let Value::Object(map) = partial {
            for (key, value) in map {
                self.0.insert(key, value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
