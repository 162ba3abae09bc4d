//! Deterministic extractors turning raw message text into typed scores.
//!
//! - [`scores`]: `Label: 123` pairs matched against the tracked-name list.

pub mod scores;

use crate::types::ScoreSet;

pub use scores::{extract_scores, ScoreExtractor};

/// A pure text-to-scores parser.
pub trait Extractor {
    /// Stable identifier used in log fields.
    fn name(&self) -> &str;

    /// Parse `text` into a score set. Never fails: anything that does not
    /// match simply leaves the corresponding name out.
    fn extract(&self, text: &str) -> ScoreSet;
}
