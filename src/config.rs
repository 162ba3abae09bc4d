//! Configuration loading and validation.
//!
//! Sources, lowest to highest precedence: built-in defaults, a TOML file,
//! environment variables (a `.env` file is loaded into the environment by the
//! binary), and CLI flags applied by the caller.
//!
//! Config file path: `--config`, else `$CHANNEL_TALLY_CONFIG`, else
//! `./channel-tally.toml`. A missing default file is not an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "CHANNEL_TALLY_CONFIG";

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "channel-tally.toml";

/// Configuration errors. All of them are fatal and raised before any fetch.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid TOML for this schema.
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// Tracked-name list is empty after trimming.
    #[error("no names to track: set NAMES_TO_TRACK or [tracking].tracked_names")]
    NoTrackedNames,
    /// Channel identifier is empty.
    #[error("no channel configured: set CHANNEL_USERNAME or [channel].identifier")]
    MissingChannel,
    /// Message limit is zero.
    #[error("message limit must be a positive integer")]
    ZeroLimit,
    /// A credential the selected source needs is not set.
    #[error("missing required credential: {0}")]
    MissingCredential(String),
}

// ── Top-level config ────────────────────────────────────────────

/// Immutable run parameters, built once at startup and passed by reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which names are scored and which must be present.
    pub tracking: TrackingConfig,
    /// Channel to read and how much of it.
    pub channel: ChannelConfig,
    /// Report destination and logging.
    pub output: OutputConfig,
    /// Telegram Bot API settings.
    pub telegram: TelegramConfig,
}

/// Name lists driving extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Names whose scores are accumulated, in report order.
    pub tracked_names: Vec<String>,
    /// Names that must all appear verbatim for the required-names check.
    pub required_names: Vec<String>,
}

/// Channel selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// `@username`, username, or numeric chat id.
    pub identifier: String,
    /// Maximum number of messages requested from the source.
    pub message_limit: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            identifier: "nzuimanto".to_owned(),
            message_limit: 10_000,
        }
    }
}

/// Output destinations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the full report is written.
    pub report_path: PathBuf,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory for JSON log files; console only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from("resultats_scraping.txt"),
            log_level: "info".to_owned(),
            log_dir: None,
        }
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Environment variable holding the bot token.
    pub bot_token_env: String,
    /// Long-poll timeout for `getUpdates`, in seconds.
    pub poll_timeout_secs: u32,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token_env: "TELEGRAM_BOT_TOKEN".to_owned(),
            poll_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from the file and process environment.
    ///
    /// Does not validate; call [`Config::validate`] before use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] when the file
    /// cannot be used. An explicitly named file must exist.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit_path, |key| std::env::var(key).ok())
    }

    /// Load with a custom environment resolver.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_with(
        explicit_path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let (path, required) = match explicit_path {
            Some(p) => (p.to_path_buf(), true),
            None => match env(CONFIG_PATH_ENV) {
                Some(p) => (PathBuf::from(p), true),
                None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config from file");
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!("no config file found, using defaults");
                Config::default()
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        config.apply_env_overrides(env);
        config.normalize();
        Ok(config)
    }

    /// Parse a TOML string into config (no environment overrides).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the string is not valid config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(toml_str).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.normalize();
        Ok(config)
    }

    /// Apply environment variable overrides (env > file > defaults).
    ///
    /// Takes a resolver so tests need not touch the process environment.
    pub fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("NAMES_TO_TRACK") {
            self.tracking.tracked_names = parse_name_list(&v);
        }
        if let Some(v) = env("REQUIRED_NAMES") {
            self.tracking.required_names = parse_name_list(&v);
        }
        if let Some(v) = env("CHANNEL_USERNAME") {
            self.channel.identifier = v;
        }
        if let Some(v) = env("MESSAGE_LIMIT") {
            match v.trim().parse() {
                Ok(n) => self.channel.message_limit = n,
                Err(_) => tracing::warn!(
                    var = "MESSAGE_LIMIT",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("OUTPUT_FILE") {
            self.output.report_path = PathBuf::from(v);
        }
        if let Some(v) = env("LOG_LEVEL") {
            self.output.log_level = v;
        }
        if let Some(v) = env("LOG_DIR") {
            self.output.log_dir = Some(PathBuf::from(v));
        }
    }

    /// Trim names and drop empty entries.
    fn normalize(&mut self) {
        self.tracking.tracked_names = clean_names(&self.tracking.tracked_names);
        self.tracking.required_names = clean_names(&self.tracking.required_names);
        self.channel.identifier = self.channel.identifier.trim().to_owned();
    }

    /// Check the invariants a run depends on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tracking.tracked_names.iter().all(|n| n.trim().is_empty()) {
            return Err(ConfigError::NoTrackedNames);
        }
        if self.channel.identifier.trim().is_empty() {
            return Err(ConfigError::MissingChannel);
        }
        if self.channel.message_limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        Ok(())
    }

    /// Resolve the Telegram bot token from the configured variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] when unset or blank.
    pub fn bot_token(&self, env: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
        env(&self.telegram.bot_token_env)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingCredential(self.telegram.bot_token_env.clone()))
    }
}

/// Split a comma-separated name list, trimming entries and dropping blanks.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .collect()
}

fn clean_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .collect()
}
