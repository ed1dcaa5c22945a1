//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `page_audit` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use page_audit::config::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_PROBE_CONCURRENCY, DEFAULT_PROBE_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use page_audit::initialization::init_logger_with;
use page_audit::{analyze_page, Config, LogFormat, LogLevel};

/// Analyze a web page: HTML version, title, headings, link health, and
/// login-form signal.
#[derive(Parser, Debug)]
#[command(name = "page_audit", version, about)]
struct Cli {
    /// Address of the page to analyze (scheme and host required)
    url: String,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    /// Timeout for the document fetch, in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    timeout_seconds: u64,

    /// Timeout for each link reachability probe, in seconds
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    probe_timeout_seconds: u64,

    /// Maximum concurrent reachability probes
    #[arg(long, default_value_t = DEFAULT_PROBE_CONCURRENCY)]
    probe_concurrency: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = Config {
        url: cli.url,
        log_level: cli.log_level,
        log_format: cli.log_format,
        timeout_seconds: cli.timeout_seconds,
        probe_timeout_seconds: cli.probe_timeout_seconds,
        probe_concurrency: cli.probe_concurrency,
        user_agent: cli.user_agent,
    };

    match analyze_page(config).await {
        Ok(report) => {
            if cli.json {
                let rendered = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize report")?;
                println!("{rendered}");
            } else {
                print!("{}", report.render_text());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("page_audit error: {e}");
            process::exit(1);
        }
    }
}
