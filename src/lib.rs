//! channel-tally — score tallies from Telegram channel posts.
//!
//! Reads posts from a channel (live via the Bot API or from a Telegram
//! Desktop export), extracts `Name: 42` scores for a configured list of
//! names, keeps only posts that score both gate identities, and reports
//! per-name totals and histories.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod types;

pub mod extractors;
pub mod gate;

pub mod aggregator;
pub mod pipeline;
pub mod report;

pub mod sources;
