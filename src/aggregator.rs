//! Per-name accumulation of admitted scores.
//!
//! Append-only and single pass: every admitted message adds one snapshot to
//! each name it scored and bumps that name's total. Nothing is ever revised.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::{ChannelMessage, Score, ScoreSet};

/// One admitted message as seen by a name's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSnapshot {
    /// Platform message identifier.
    pub id: i64,
    /// When the message was posted.
    pub timestamp: DateTime<Utc>,
    /// Raw message text.
    pub text: String,
    /// Every score extracted from this message.
    pub scores: ScoreSet,
}

/// Accumulated state for one tracked name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRecord {
    /// Admitted messages that scored this name, in admission order.
    pub messages: Vec<MessageSnapshot>,
    /// Sum of this name's scores across `messages`.
    pub total: Score,
}

impl NameRecord {
    /// Number of admitted messages that scored this name.
    pub fn appearances(&self) -> usize {
        self.messages.len()
    }
}

/// Folds admitted messages into per-name records.
#[derive(Debug, Clone)]
pub struct Aggregator {
    tracked_names: Vec<String>,
    records: HashMap<String, NameRecord>,
}

impl Aggregator {
    /// Create an empty aggregator reporting in `tracked_names` order.
    pub fn new<S: AsRef<str>>(tracked_names: &[S]) -> Self {
        Self {
            tracked_names: tracked_names.iter().map(|n| n.as_ref().to_owned()).collect(),
            records: HashMap::new(),
        }
    }

    /// Fold one admitted message into the records.
    ///
    /// The caller is responsible for gating; every pair in `scores` is added.
    pub fn ingest(&mut self, message: &ChannelMessage, scores: &ScoreSet) {
        let text = message.text().unwrap_or_default();
        for (name, score) in scores.iter() {
            let record = self.records.entry(name.to_owned()).or_default();
            record.messages.push(MessageSnapshot {
                id: message.id,
                timestamp: message.timestamp,
                text: text.to_owned(),
                scores: scores.clone(),
            });
            record.total.accumulate(score);
        }
    }

    /// Record for `name` accumulated so far.
    pub fn record(&self, name: &str) -> Option<&NameRecord> {
        self.records.get(name)
    }

    /// Freeze the accumulated records.
    pub fn finish(self) -> RunResult {
        RunResult {
            tracked_names: self.tracked_names,
            records: self.records,
        }
    }
}

/// Final per-name records of a run. Sole input to reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    tracked_names: Vec<String>,
    records: HashMap<String, NameRecord>,
}

impl RunResult {
    /// Record for `name`, if any admitted message scored it.
    pub fn record(&self, name: &str) -> Option<&NameRecord> {
        self.records.get(name)
    }

    /// Tracked names in configured order.
    pub fn tracked_names(&self) -> &[String] {
        &self.tracked_names
    }

    /// Names with a non-empty history, in configured order, with their records.
    ///
    /// A name listed twice in the configuration is yielded twice.
    pub fn scored(&self) -> impl Iterator<Item = (&str, &NameRecord)> {
        self.tracked_names.iter().filter_map(move |name| {
            self.records
                .get(name)
                .filter(|r| !r.messages.is_empty())
                .map(|r| (name.as_str(), r))
        })
    }

    /// Whether no tracked name was scored.
    pub fn is_empty(&self) -> bool {
        self.scored().next().is_none()
    }
}
