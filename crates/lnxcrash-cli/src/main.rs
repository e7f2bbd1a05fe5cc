//! LNXCrash CLI - Command-line interface for LNXCrash
//!
//! Provides commands for:
//! - Listing unsubmitted crash reports
//! - Submitting pending reports to the ingestion server
//! - Attaching user comments to pending reports
//! - Polling deferred-submission feedback
//! - Viewing and managing configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lnxcrash_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    comment::CommentCommand, config::ConfigCommand, feedback::FeedbackCommand, scan::ScanCommand,
    send::SendCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "lnxcrash", version, about = "Crash report submission pipeline for Linux")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List unsubmitted crash reports
    Scan(ScanCommand),
    /// Submit pending crash reports to the server
    Send(SendCommand),
    /// Attach a comment to a pending crash report
    Comment(CommentCommand),
    /// Poll the server verdict for a deferred submission
    Feedback(FeedbackCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    // Setup tracing; flags win over the logging config section
    let filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    if cli.json || config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Scan(cmd) => cmd.execute(format, &config_path).await,
        Commands::Send(cmd) => cmd.execute(format, &config_path).await,
        Commands::Comment(cmd) => cmd.execute(format, &config_path).await,
        Commands::Feedback(cmd) => cmd.execute(format, &config_path).await,
        Commands::Config(cmd) => cmd.execute(format, &config_path).await,
    }
}
