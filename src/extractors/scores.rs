//! Score extractor for `Name: 42` style posts.
//!
//! Scans for every non-overlapping `label: digits` pair, where the label is a
//! maximal run of ASCII letters and whitespace directly before the colon and
//! the score is a run of ASCII digits `0-9`. Digits from other decimal
//! scripts never form a score. Each label is attributed to the first tracked name it contains
//! (case-insensitive). When a tracked name is scored twice in one message the
//! later pair wins.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::Extractor;
use crate::types::{Score, ScoreSet};

/// `label: digits`, leftmost-first, non-overlapping.
static SCORE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z\s]+):\s*([0-9]+)").expect("score pattern compiles"));

/// Extractor bound to an ordered tracked-name list.
#[derive(Debug, Clone)]
pub struct ScoreExtractor {
    tracked: Vec<TrackedName>,
}

#[derive(Debug, Clone)]
struct TrackedName {
    name: String,
    lowered: String,
}

impl ScoreExtractor {
    /// Create an extractor for `tracked_names`, checked in the given order.
    pub fn new<S: AsRef<str>>(tracked_names: &[S]) -> Self {
        let tracked = tracked_names
            .iter()
            .map(|n| TrackedName {
                name: n.as_ref().to_owned(),
                lowered: n.as_ref().to_lowercase(),
            })
            .collect();
        Self { tracked }
    }

    /// Tracked names in configured order.
    pub fn tracked_names(&self) -> impl Iterator<Item = &str> {
        self.tracked.iter().map(|t| t.name.as_str())
    }

    /// First tracked name contained in `label`, ignoring case.
    fn attribute(&self, label: &str) -> Option<&str> {
        let lowered = label.to_lowercase();
        self.tracked
            .iter()
            .find(|t| lowered.contains(&t.lowered))
            .map(|t| t.name.as_str())
    }
}

impl Extractor for ScoreExtractor {
    fn name(&self) -> &str {
        "extractor:scores"
    }

    fn extract(&self, text: &str) -> ScoreSet {
        let mut scores = ScoreSet::new();

        for caps in SCORE_PAIR.captures_iter(text) {
            let (Some(label), Some(digits)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let label = label.as_str().trim();
            let Some(name) = self.attribute(label) else {
                trace!(label, "label matches no tracked name");
                continue;
            };
            let Some(score) = Score::from_digits(digits.as_str()) else {
                continue;
            };
            scores.insert(name, score);
        }

        scores
    }
}

/// Extract scores from `text` for `tracked_names`.
///
/// Convenience wrapper over [`ScoreExtractor`] for one-off calls.
pub fn extract_scores<S: AsRef<str>>(text: &str, tracked_names: &[S]) -> ScoreSet {
    ScoreExtractor::new(tracked_names).extract(text)
}
