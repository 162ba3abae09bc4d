//! Admission gate: decides which messages may be aggregated.
//!
//! A message is admitted only when it names both gate identities, checked
//! twice: once as literal substrings of the raw text before extraction, and
//! once as keys of the extracted score set afterwards. A post can mention
//! both names yet fail to score one of them, and is then rejected.

use crate::types::ScoreSet;

/// Identities every admitted message must score.
pub const DEFAULT_GATE_NAMES: [&str; 2] = ["Paul Biya", "Issa Tchiroma"];

/// Why a message was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Raw text lacks one of the gate names.
    MissingName,
    /// Both names are present but at least one carries no score.
    Unscored,
}

/// Two-identity admission gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionGate {
    names: [String; 2],
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::new(DEFAULT_GATE_NAMES[0], DEFAULT_GATE_NAMES[1])
    }
}

impl AdmissionGate {
    /// Gate on an explicit pair of identities.
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            names: [first.to_owned(), second.to_owned()],
        }
    }

    /// The two gate identities.
    pub fn names(&self) -> [&str; 2] {
        [self.names[0].as_str(), self.names[1].as_str()]
    }

    /// Cheap pre-extraction check: both names appear verbatim (exact case).
    pub fn admits_text(&self, text: &str) -> bool {
        all_required_names_present(text, &self.names)
    }

    /// Post-extraction check: both names were scored.
    pub fn admits_scores(&self, scores: &ScoreSet) -> bool {
        self.names.iter().all(|n| scores.contains(n))
    }

    /// Run both checks, reporting which one failed.
    pub fn check(&self, text: &str, scores: &ScoreSet) -> Result<(), Rejection> {
        if !self.admits_text(text) {
            return Err(Rejection::MissingName);
        }
        if !self.admits_scores(scores) {
            return Err(Rejection::Unscored);
        }
        Ok(())
    }
}

/// True iff every entry of `required_names` is a literal substring of `text`.
///
/// Vacuously true for an empty list. Not used by the pipeline gate.
pub fn all_required_names_present<S: AsRef<str>>(text: &str, required_names: &[S]) -> bool {
    required_names.iter().all(|n| text.contains(n.as_ref()))
}
