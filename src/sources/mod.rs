//! Message sources feeding the pipeline.
//!
//! A [`MessageSource`] is a pull-based, lazily fetched stream of channel
//! messages. The pipeline asks for one message at a time, so a source only
//! buffers what it needs for its own batching.
//!
//! Implementations:
//! - [`telegram::TelegramSource`]: Bot API long polling for channel posts
//! - [`export::ExportSource`]: Telegram Desktop JSON export
//! - [`VecSource`]: in-memory, for tests and replays

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::types::ChannelMessage;

pub mod export;
pub mod telegram;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures raised by a message source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Telegram API call failed (network, auth, rate limit).
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
    /// Export file could not be read.
    #[error("failed to read export {path}: {source}")]
    ExportRead {
        /// Path of the export file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Export file is not a valid Telegram Desktop export.
    #[error("failed to parse export {path}: {source}")]
    ExportParse {
        /// Path of the export file.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Source gave up for another reason.
    #[error("message source unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Lazy, ordered stream of channel messages.
///
/// Messages are yielded once each, in historical order, with no reordering.
/// `Ok(None)` ends the stream. After an `Err` the caller stops pulling.
#[async_trait]
pub trait MessageSource: Send {
    /// Short label for log fields.
    fn describe(&self) -> String;

    /// Fetch the next message.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the underlying platform or file fails.
    async fn next_message(&mut self) -> Result<Option<ChannelMessage>, SourceError>;
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// Source replaying a fixed list of items, optionally ending in an error.
#[derive(Debug, Default)]
pub struct VecSource {
    items: VecDeque<Result<ChannelMessage, String>>,
}

impl VecSource {
    /// Replay `messages` in order.
    pub fn new(messages: impl IntoIterator<Item = ChannelMessage>) -> Self {
        Self {
            items: messages.into_iter().map(Ok).collect(),
        }
    }

    /// Fail with [`SourceError::Unavailable`] once the queued messages run out.
    #[must_use]
    pub fn then_fail(mut self, reason: impl Into<String>) -> Self {
        self.items.push_back(Err(reason.into()));
        self
    }
}

#[async_trait]
impl MessageSource for VecSource {
    fn describe(&self) -> String {
        "memory".to_owned()
    }

    async fn next_message(&mut self) -> Result<Option<ChannelMessage>, SourceError> {
        match self.items.pop_front() {
            Some(Ok(message)) => Ok(Some(message)),
            Some(Err(reason)) => Err(SourceError::Unavailable(reason)),
            None => Ok(None),
        }
    }
}
