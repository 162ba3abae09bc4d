//! Shared value types: channel messages, scores, and per-message score sets.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod score;

pub use score::Score;

/// A single post delivered by a message source.
///
/// Owned by the source; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Platform message identifier.
    pub id: i64,
    /// When the message was posted.
    pub timestamp: DateTime<Utc>,
    /// Raw message text, absent for media-only or service posts.
    pub text: Option<String>,
}

impl ChannelMessage {
    /// Create a message carrying text.
    pub fn new(id: i64, timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            id,
            timestamp,
            text: Some(text.into()),
        }
    }

    /// Create a message with no text (photo, sticker, service post).
    pub fn without_text(id: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp,
            text: None,
        }
    }

    /// Returns the text if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Scores extracted from one message, keyed by tracked name.
///
/// Keeps first-insertion order. Inserting a name that is already present
/// overwrites its score without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSet {
    entries: Vec<(String, Score)>,
}

impl ScoreSet {
    /// Create an empty score set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `score` for `name`, replacing any earlier value.
    pub fn insert(&mut self, name: &str, score: Score) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((name.to_owned(), score)),
        }
    }

    /// Score recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Score> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, score)| score)
    }

    /// Whether `name` has a score in this set.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of scored names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no name was scored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, score)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Score)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }
}

impl<S: Into<String>> FromIterator<(S, Score)> for ScoreSet {
    fn from_iter<I: IntoIterator<Item = (S, Score)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, score) in iter {
            let name: String = name.into();
            set.insert(&name, score);
        }
        set
    }
}

impl fmt::Display for ScoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, score)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {score}")?;
        }
        f.write_str("}")
    }
}
