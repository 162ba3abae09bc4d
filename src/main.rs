//! channel-tally CLI entry point.
//!
//! Provides `run`, `import`, and `check` subcommands for tallying a live
//! channel, tallying a Telegram Desktop export, or validating configuration.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use channel_tally::config::Config;
use channel_tally::gate::DEFAULT_GATE_NAMES;
use channel_tally::logging::{self, LoggingGuard};
use channel_tally::pipeline::Pipeline;
use channel_tally::report::{save_report, ConsoleSummary};
use channel_tally::sources::export::ExportSource;
use channel_tally::sources::telegram::TelegramSource;
use channel_tally::sources::MessageSource;

/// Tally named scores posted in a Telegram channel.
#[derive(Parser)]
#[command(name = "channel-tally", version, about)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Read pending channel posts through the Bot API and write the report.
    Run {
        /// Per-run overrides.
        #[command(flatten)]
        overrides: RunOverrides,
    },
    /// Tally a Telegram Desktop JSON export (result.json).
    Import {
        /// Path to the export file.
        export: PathBuf,
        /// Per-run overrides.
        #[command(flatten)]
        overrides: RunOverrides,
    },
    /// Validate configuration and print it.
    Check,
}

/// Flags overriding file and environment configuration.
#[derive(Args, Default)]
struct RunOverrides {
    /// Maximum number of messages to read.
    #[arg(long)]
    limit: Option<usize>,
    /// Where to write the report.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl RunOverrides {
    fn apply(self, config: &mut Config) {
        if let Some(limit) = self.limit {
            config.channel.message_limit = limit;
        }
        if let Some(output) = self.output {
            config.output.report_path = output;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();
    let dotenv = dotenvy::dotenv();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let overrides = match &mut cli.command {
        Command::Run { overrides } | Command::Import { overrides, .. } => std::mem::take(overrides),
        Command::Check => RunOverrides::default(),
    };
    overrides.apply(&mut config);

    let _logging_guard = init_logging(&config)?;
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "failed to load .env"),
    }

    config.validate().context("invalid configuration")?;

    match cli.command {
        Command::Check => handle_check(&config),
        Command::Run { .. } => handle_run(&config).await,
        Command::Import { export, .. } => handle_import(&config, &export).await,
    }
}

fn init_logging(config: &Config) -> anyhow::Result<Option<LoggingGuard>> {
    match &config.output.log_dir {
        Some(dir) => Ok(Some(logging::init_with_file(dir, &config.output.log_level)?)),
        None => {
            logging::init_cli(&config.output.log_level);
            Ok(None)
        }
    }
}

/// Print the effective configuration.
fn handle_check(config: &Config) -> anyhow::Result<()> {
    print_banner(config);
    let token = if config.bot_token(|k| std::env::var(k).ok()).is_ok() {
        "set"
    } else {
        "not set (required for `run`)"
    };
    println!("   Report: {}", config.output.report_path.display());
    println!("   Bot token ({}): {token}", config.telegram.bot_token_env);
    println!("Configuration OK");
    Ok(())
}

/// Tally pending posts of the configured channel.
async fn handle_run(config: &Config) -> anyhow::Result<()> {
    let token = config
        .bot_token(|k| std::env::var(k).ok())
        .context("invalid configuration")?;
    let mut source = TelegramSource::new(
        &token,
        &config.channel.identifier,
        config.channel.message_limit,
        config.telegram.poll_timeout_secs,
    );
    tally(config, &mut source).await
}

/// Tally a Telegram Desktop export.
async fn handle_import(config: &Config, export: &Path) -> anyhow::Result<()> {
    let mut source = ExportSource::open(export, config.channel.message_limit)
        .await
        .context("failed to open export")?;
    tally(config, &mut source).await
}

fn print_banner(config: &Config) {
    println!();
    println!("Configuration:");
    println!("   Channel: {}", config.channel.identifier);
    println!("   Limit: {} messages", config.channel.message_limit);
    println!(
        "   Tracked names: {}",
        config.tracking.tracked_names.join(", ")
    );
    println!(
        "   Required names: {}",
        config.tracking.required_names.join(", ")
    );
    println!();
}

async fn tally(config: &Config, source: &mut dyn MessageSource) -> anyhow::Result<()> {
    print_banner(config);

    let outcome = Pipeline::new(&config.tracking.tracked_names)
        .run(source)
        .await;

    if let Some(e) = &outcome.interrupted {
        println!("Source error: {e}");
        println!("Reporting the messages read before the failure.");
    }

    let [first, second] = DEFAULT_GATE_NAMES;
    println!();
    println!("{} messages scanned", outcome.stats.scanned);
    println!(
        "{} messages naming both {first} and {second}",
        outcome.stats.matching
    );
    println!();
    println!("{}", ConsoleSummary::new(&outcome.result));

    save_report(&config.output.report_path, &outcome.result)?;
    println!(
        "Results saved to: {}",
        config.output.report_path.display()
    );
    Ok(())
}
