//! Telegram Bot API source for channel posts.
//!
//! The bot must be an administrator of the channel so Telegram delivers
//! `channel_post` updates to it. Updates are long-polled with `getUpdates`
//! and acknowledged by advancing the offset. The stream ends when the limit
//! is reached or a poll comes back empty.

use std::collections::VecDeque;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, UpdateKind};
use tracing::{debug, info};

use super::{MessageSource, SourceError};
use crate::types::ChannelMessage;

/// Identifies the tracked channel among incoming posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelMatcher {
    /// Numeric chat id (e.g. `-1001234567890`).
    Id(i64),
    /// Public username, without the leading `@`, compared case-insensitively.
    Username(String),
}

impl ChannelMatcher {
    /// Parse a channel identifier: `@name`, `name`, or a numeric chat id.
    pub fn parse(identifier: &str) -> Self {
        let trimmed = identifier.trim();
        match trimmed.parse::<i64>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Username(trimmed.trim_start_matches('@').to_owned()),
        }
    }

    /// Whether a chat with this id and username is the tracked channel.
    pub fn matches(&self, chat_id: i64, username: Option<&str>) -> bool {
        match self {
            Self::Id(id) => *id == chat_id,
            Self::Username(name) => username.is_some_and(|u| u.eq_ignore_ascii_case(name)),
        }
    }
}

/// Long-polling source of posts from one channel.
pub struct TelegramSource {
    bot: Bot,
    channel: ChannelMatcher,
    limit: usize,
    delivered: usize,
    offset: i32,
    poll_timeout_secs: u32,
    buffer: VecDeque<ChannelMessage>,
    drained: bool,
}

impl TelegramSource {
    /// Create a source for `channel` using the given bot token.
    pub fn new(bot_token: &str, channel: &str, limit: usize, poll_timeout_secs: u32) -> Self {
        Self {
            bot: Bot::new(bot_token),
            channel: ChannelMatcher::parse(channel),
            limit,
            delivered: 0,
            offset: 0,
            poll_timeout_secs,
            buffer: VecDeque::new(),
            drained: false,
        }
    }

    /// Fetch one batch of updates into the buffer.
    async fn poll(&mut self) -> Result<(), SourceError> {
        let updates = self
            .bot
            .get_updates()
            .offset(self.offset)
            .timeout(self.poll_timeout_secs)
            .allowed_updates(vec![AllowedUpdate::ChannelPost])
            .await?;

        if updates.is_empty() {
            info!(delivered = self.delivered, "no more channel posts pending");
            self.drained = true;
            return Ok(());
        }

        debug!(count = updates.len(), offset = self.offset, "received updates");

        for update in updates {
            self.offset = update.id.as_offset();
            let UpdateKind::ChannelPost(post) = update.kind else {
                continue;
            };
            if !self.channel.matches(post.chat.id.0, post.chat.username()) {
                debug!(chat_id = post.chat.id.0, "ignoring post from another chat");
                continue;
            }
            self.buffer.push_back(ChannelMessage {
                id: i64::from(post.id.0),
                timestamp: post.date,
                text: post.text().map(str::to_owned),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl MessageSource for TelegramSource {
    fn describe(&self) -> String {
        match &self.channel {
            ChannelMatcher::Id(id) => format!("telegram:{id}"),
            ChannelMatcher::Username(name) => format!("telegram:@{name}"),
        }
    }

    async fn next_message(&mut self) -> Result<Option<ChannelMessage>, SourceError> {
        loop {
            if self.delivered >= self.limit {
                return Ok(None);
            }
            if let Some(message) = self.buffer.pop_front() {
                self.delivered = self.delivered.saturating_add(1);
                return Ok(Some(message));
            }
            if self.drained {
                return Ok(None);
            }
            self.poll().await?;
        }
    }
}
