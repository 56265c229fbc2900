use std::collections::VecDeque;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// How many interactions are kept. Older ones are dropped.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub model: String,
    pub prompt: String,
    pub response: String,
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn new(model: &str, prompt: &str, response: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            response: response.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Most-recent-first list of past interactions capped at
/// `HISTORY_LIMIT`.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct History(VecDeque<HistoryEntry>);

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.0.push_front(entry);
        self.0.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.0.iter()
    }
}
