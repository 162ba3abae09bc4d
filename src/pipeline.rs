//! Extraction-and-aggregation pipeline.
//!
//! Pulls messages one at a time from a [`MessageSource`] and runs each
//! through: text check → literal gate → extraction → scored gate →
//! aggregation. A source failure ends the run early but never discards what
//! was already aggregated.

use tracing::{debug, info, warn};

use crate::aggregator::{Aggregator, RunResult};
use crate::extractors::{Extractor, ScoreExtractor};
use crate::gate::{AdmissionGate, Rejection};
use crate::sources::{MessageSource, SourceError};
use crate::types::ChannelMessage;

/// What happened to a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Message had no text and was skipped before reaching the core.
    NoText,
    /// Message was turned away by the gate.
    Rejected(Rejection),
    /// Message was folded into the records.
    Admitted,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Messages carrying text.
    pub scanned: usize,
    /// Messages naming both gate identities verbatim.
    pub matching: usize,
    /// Messages that scored both gate identities and were aggregated.
    pub admitted: usize,
}

/// Result of driving a source to completion.
#[derive(Debug)]
pub struct RunOutcome {
    /// Aggregated records, possibly partial.
    pub result: RunResult,
    /// Message counters.
    pub stats: RunStats,
    /// Set when the source failed before the stream ended.
    pub interrupted: Option<SourceError>,
}

impl RunOutcome {
    /// Whether every message the source had to offer was processed.
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

/// Sequential gate → extract → aggregate driver.
#[derive(Debug, Clone)]
pub struct Pipeline {
    extractor: ScoreExtractor,
    gate: AdmissionGate,
    aggregator: Aggregator,
    stats: RunStats,
}

impl Pipeline {
    /// Pipeline for `tracked_names` with the default two-identity gate.
    pub fn new<S: AsRef<str>>(tracked_names: &[S]) -> Self {
        Self::with_gate(tracked_names, AdmissionGate::default())
    }

    /// Pipeline for `tracked_names` with an explicit gate.
    pub fn with_gate<S: AsRef<str>>(tracked_names: &[S], gate: AdmissionGate) -> Self {
        Self {
            extractor: ScoreExtractor::new(tracked_names),
            gate,
            aggregator: Aggregator::new(tracked_names),
            stats: RunStats::default(),
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Process one message.
    pub fn process(&mut self, message: &ChannelMessage) -> Admission {
        let Some(text) = message.text() else {
            return Admission::NoText;
        };
        self.stats.scanned = self.stats.scanned.saturating_add(1);

        if !self.gate.admits_text(text) {
            return Admission::Rejected(Rejection::MissingName);
        }
        self.stats.matching = self.stats.matching.saturating_add(1);

        let scores = self.extractor.extract(text);
        if !self.gate.admits_scores(&scores) {
            debug!(
                id = message.id,
                extractor = self.extractor.name(),
                scored = scores.len(),
                "gate names present but not both scored"
            );
            return Admission::Rejected(Rejection::Unscored);
        }

        self.aggregator.ingest(message, &scores);
        self.stats.admitted = self.stats.admitted.saturating_add(1);
        debug!(id = message.id, %scores, "message admitted");
        Admission::Admitted
    }

    /// Drain `source`, processing every message in order.
    ///
    /// A source error stops the run; the records gathered so far are kept
    /// and the error is returned in [`RunOutcome::interrupted`].
    pub async fn run(mut self, source: &mut dyn MessageSource) -> RunOutcome {
        let label = source.describe();
        info!(source = %label, "reading messages");

        let interrupted = loop {
            match source.next_message().await {
                Ok(Some(message)) => {
                    self.process(&message);
                }
                Ok(None) => break None,
                Err(e) => {
                    warn!(source = %label, error = %e, "message source failed, keeping partial results");
                    break Some(e);
                }
            }
        };

        info!(
            scanned = self.stats.scanned,
            matching = self.stats.matching,
            admitted = self.stats.admitted,
            "finished reading messages"
        );

        RunOutcome {
            interrupted,
            ..self.finish()
        }
    }

    /// Stop ingesting and freeze the records.
    pub fn finish(self) -> RunOutcome {
        RunOutcome {
            result: self.aggregator.finish(),
            stats: self.stats,
            interrupted: None,
        }
    }
}
