//! Console summary and persisted plain-text report.
//!
//! Both views read a [`RunResult`] in tracked-name order and skip names that
//! were never scored. The full report lists every admitted message under
//! each name in admission order.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, TimeZone};
use tracing::info;

use crate::aggregator::RunResult;
use crate::types::Score;

const HEAVY_RULE: &str = "============================================================";
const LIGHT_RULE: &str = "------------------------------------------------------------";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// One line of the summary: a scored name with its total and count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Tracked name.
    pub name: String,
    /// Sum of the name's scores.
    pub total: Score,
    /// Number of admitted messages that scored the name.
    pub appearances: usize,
}

/// Summary lines for every scored name, in configured order.
pub fn summary(result: &RunResult) -> Vec<SummaryLine> {
    result
        .scored()
        .map(|(name, record)| SummaryLine {
            name: name.to_owned(),
            total: record.total.clone(),
            appearances: record.appearances(),
        })
        .collect()
}

/// Operator-facing summary block.
pub struct ConsoleSummary<'a> {
    result: &'a RunResult,
}

impl<'a> ConsoleSummary<'a> {
    /// Wrap a run result for display.
    pub fn new(result: &'a RunResult) -> Self {
        Self { result }
    }
}

impl fmt::Display for ConsoleSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f, "RESULTS")?;
        writeln!(f, "{HEAVY_RULE}")?;
        for line in summary(self.result) {
            writeln!(f)?;
            writeln!(f, "{}", line.name)?;
            writeln!(f, "   Appearances: {}", line.appearances)?;
            writeln!(f, "   Total score: {}", line.total)?;
        }
        writeln!(f)?;
        write!(f, "{HEAVY_RULE}")
    }
}

/// The persisted report: summary section followed by per-name details.
pub struct FullReport<'a, Tz: TimeZone> {
    result: &'a RunResult,
    exported_at: DateTime<Tz>,
}

impl<'a, Tz: TimeZone> FullReport<'a, Tz> {
    /// Build a report stamped with `exported_at`.
    pub fn new(result: &'a RunResult, exported_at: DateTime<Tz>) -> Self {
        Self {
            result,
            exported_at,
        }
    }
}

impl<Tz: TimeZone> fmt::Display for FullReport<'_, Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CHANNEL TALLY RESULTS")?;
        writeln!(f, "Exported at: {}", self.exported_at.format(DATE_FORMAT))?;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f)?;

        writeln!(f, "SUMMARY")?;
        writeln!(f, "{LIGHT_RULE}")?;
        for line in summary(self.result) {
            writeln!(
                f,
                "{}: {} (appearances: {})",
                line.name, line.total, line.appearances
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f)?;

        writeln!(f, "MESSAGE DETAILS")?;
        writeln!(f, "{LIGHT_RULE}")?;
        writeln!(f)?;
        for (name, record) in self.result.scored() {
            writeln!(f)?;
            writeln!(f, "{name} - Total: {}", record.total)?;
            writeln!(f, "{LIGHT_RULE}")?;
            for message in &record.messages {
                writeln!(f, "Message ID: {}", message.id)?;
                writeln!(f, "Date: {}", message.timestamp.format(DATE_FORMAT))?;
                writeln!(f, "Scores: {}", message.scores)?;
                writeln!(f, "Text:")?;
                writeln!(f, "{}", message.text)?;
                writeln!(f, "{LIGHT_RULE}")?;
            }
        }
        Ok(())
    }
}

/// Write the full report for `result` to `path`, stamped with the local time.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_report(path: &Path, result: &RunResult) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let report = FullReport::new(result, chrono::Local::now()).to_string();
    std::fs::write(path, report)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!(path = %path.display(), "report saved");
    Ok(())
}
