//! Configuration types and operational constants.
//!
//! This module defines the library configuration struct, the logging enums
//! shared with the CLI, and the constants that bound network operations.

use clap::ValueEnum;

/// Maximum address length (2048 characters) accepted by the validator.
/// This matches common browser and server limits (e.g., IE, Apache, Nginx default limits).
pub const MAX_ADDRESS_LENGTH: usize = 2048;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag or the
/// `user_agent` field of [`Config`].
pub const DEFAULT_USER_AGENT: &str = concat!("page_audit/", env!("CARGO_PKG_VERSION"));

/// Default timeout for the primary document fetch, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default timeout for a single reachability probe, in seconds.
/// Probes are existence checks; one slow host must not stall the report.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Default cap on concurrent reachability probes.
pub const DEFAULT_PROBE_CONCURRENCY: usize = 16;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use page_audit::Config;
///
/// let config = Config {
///     url: "https://example.com".to_string(),
///     probe_concurrency: 8,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Address of the page to analyze
    pub url: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Timeout for the primary document fetch, in seconds
    pub timeout_seconds: u64,

    /// Timeout for a single reachability probe, in seconds
    pub probe_timeout_seconds: u64,

    /// Maximum number of concurrent reachability probes
    pub probe_concurrency: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECS,
            probe_timeout_seconds: DEFAULT_PROBE_TIMEOUT_SECS,
            probe_concurrency: DEFAULT_PROBE_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
