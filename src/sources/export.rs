//! Telegram Desktop export reader.
//!
//! Reads the `result.json` produced by "Export chat history" in machine
//! readable (JSON) mode. Formatted text is stored by Telegram as an array of
//! plain strings and `{type, text}` entities; they are concatenated back into
//! the raw text.
//!
//! Exports list entries oldest first; the source yields them newest first so
//! the message limit keeps the most recent posts.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use super::{MessageSource, SourceError};
use crate::types::ChannelMessage;

#[derive(Debug, Deserialize)]
struct ExportFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    messages: Vec<ExportMessage>,
}

#[derive(Debug, Deserialize)]
struct ExportMessage {
    id: i64,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    date_unixtime: Option<String>,
    #[serde(default)]
    text: Option<ExportText>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExportText {
    Plain(String),
    Rich(Vec<TextPart>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextPart {
    Plain(String),
    Entity { text: String },
}

impl ExportText {
    fn flatten(self) -> String {
        match self {
            Self::Plain(text) => text,
            Self::Rich(parts) => parts
                .into_iter()
                .map(|p| match p {
                    TextPart::Plain(text) | TextPart::Entity { text } => text,
                })
                .collect(),
        }
    }
}

impl ExportMessage {
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        if let Some(secs) = self
            .date_unixtime
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
        {
            return DateTime::from_timestamp(secs, 0);
        }
        self.date
            .as_deref()
            .and_then(|d| NaiveDateTime::parse_from_str(d, "%Y-%m-%dT%H:%M:%S").ok())
            .map(|naive| naive.and_utc())
    }
}

/// Source over a Telegram Desktop JSON export.
pub struct ExportSource {
    path: String,
    messages: std::iter::Rev<std::vec::IntoIter<ExportMessage>>,
    remaining: usize,
}

impl ExportSource {
    /// Parse an export held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ExportParse`] if `json` is not an export.
    pub fn from_json(label: &str, json: &str, limit: usize) -> Result<Self, SourceError> {
        let export: ExportFile =
            serde_json::from_str(json).map_err(|source| SourceError::ExportParse {
                path: label.to_owned(),
                source,
            })?;
        info!(
            export = label,
            channel = export.name.as_deref().unwrap_or("unknown"),
            entries = export.messages.len(),
            "loaded channel export"
        );
        Ok(Self {
            path: label.to_owned(),
            messages: export.messages.into_iter().rev(),
            remaining: limit,
        })
    }

    /// Read and parse the export at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ExportRead`] if the file cannot be read, or
    /// [`SourceError::ExportParse`] if it is not an export.
    pub async fn open(path: &Path, limit: usize) -> Result<Self, SourceError> {
        let label = path.display().to_string();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::ExportRead {
                path: label.clone(),
                source,
            })?;
        Self::from_json(&label, &json, limit)
    }
}

#[async_trait]
impl MessageSource for ExportSource {
    fn describe(&self) -> String {
        format!("export:{}", self.path)
    }

    async fn next_message(&mut self) -> Result<Option<ChannelMessage>, SourceError> {
        while self.remaining > 0 {
            let Some(entry) = self.messages.next() else {
                return Ok(None);
            };
            self.remaining = self.remaining.saturating_sub(1);

            if entry.kind != "message" {
                continue;
            }
            let Some(timestamp) = entry.timestamp() else {
                warn!(id = entry.id, "export entry has no usable date, skipping");
                continue;
            };
            let text = entry
                .text
                .map(ExportText::flatten)
                .filter(|t| !t.is_empty());
            return Ok(Some(ChannelMessage {
                id: entry.id,
                timestamp,
                text,
            }));
        }
        Ok(None)
    }
}
