//! Error types and analysis statistics.
//!
//! User-facing failures are the variants of [`AnalyzeError`]; everything else
//! that goes wrong during an analysis is folded into the report (broken-link
//! counts) or tracked as a diagnostic counter in [`AnalysisStats`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failures that abort an analysis before a report can be built.
///
/// Probe failures never appear here; they fold into the broken-link count.
/// Malformed markup cannot abort a scan either (the parser is
/// error-tolerant), so a best-effort report is produced whenever the primary
/// document was fetched.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The input address is malformed or lacks a scheme or host.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The primary address failed its reachability check.
    #[error("address not reachable: {0}")]
    Unreachable(String),

    /// Transport failure fetching the primary document.
    #[error("failed to fetch document: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The primary document fetch returned a non-success status.
    #[error("document fetch returned HTTP status {0}")]
    FetchStatus(reqwest::StatusCode),

    /// Logger or HTTP client setup failed.
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

/// Types of errors that can occur while fetching the primary document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum ErrorType {
    /// Fetch timed out.
    FetchTimeoutError,
    /// Connection could not be established.
    FetchConnectError,
    /// Fetch returned a non-success status.
    FetchStatusError,
    /// The response body could not be read.
    FetchBodyError,
    /// Any other transport failure.
    FetchOtherError,
}

/// Types of warnings that can occur during an analysis.
///
/// Warnings indicate missing or degraded data that does not prevent a report
/// from being produced but is worth tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// No title text was captured.
    MissingTitle,
    /// No known doctype marker was found in the document prefix.
    MissingDoctype,
    /// A relative link could not be resolved against the page address.
    UnresolvableLink,
}

/// Types of informational metrics tracked during an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// An anchor repeated an already-seen target.
    DuplicateLink,
    /// An anchor pointed at the bare "#" fragment.
    FragmentOnlyAnchor,
    /// A reachability probe failed or timed out.
    ProbeFailure,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::FetchTimeoutError => "Fetch timeout",
            ErrorType::FetchConnectError => "Fetch connect error",
            ErrorType::FetchStatusError => "Fetch status error",
            ErrorType::FetchBodyError => "Fetch body error",
            ErrorType::FetchOtherError => "Fetch other error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingTitle => "Missing title",
            WarningType::MissingDoctype => "Missing doctype",
            WarningType::UnresolvableLink => "Unresolvable link",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::DuplicateLink => "Duplicate link",
            InfoType::FragmentOnlyAnchor => "Fragment-only anchor",
            InfoType::ProbeFailure => "Probe failure",
        }
    }
}

/// Thread-safe diagnostic counters for one analysis.
///
/// Tracks errors, warnings, and informational metrics using atomic counters,
/// allowing concurrent access from the probe fan-out. All types are
/// initialized to zero on creation. These counters are observability only;
/// they never change control flow.
pub struct AnalysisStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl AnalysisStats {
    /// Creates a tracker with every counter present and zeroed.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut warnings = HashMap::new();
        for warning in WarningType::iter() {
            warnings.insert(warning, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        AnalysisStats {
            errors,
            warnings,
            info,
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!("error counter for {error:?} missing from stats map");
        }
    }

    /// Increment a warning counter.
    pub fn increment_warning(&self, warning: WarningType) {
        if let Some(counter) = self.warnings.get(&warning) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!("warning counter for {warning:?} missing from stats map");
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!("info counter for {info_type:?} missing from stats map");
        }
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for a warning type.
    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an info type.
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    /// Get total warning count across all warning types.
    pub fn total_warnings(&self) -> usize {
        WarningType::iter().map(|w| self.get_warning_count(w)).sum()
    }

    /// Get total info count across all info types.
    pub fn total_info(&self) -> usize {
        InfoType::iter().map(|i| self.get_info_count(i)).sum()
    }
}

impl Default for AnalysisStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs nonzero error, warning, and info counters at the end of an analysis.
pub fn print_statistics(stats: &AnalysisStats) {
    let total_errors = stats.total_errors();
    let total_warnings = stats.total_warnings();
    let total_info = stats.total_info();

    if total_errors > 0 {
        log::info!("Error counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                log::info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        log::info!("Warning counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = stats.get_warning_count(warning_type);
            if count > 0 {
                log::info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        log::info!("Info counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                log::info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_error_types_have_string_representation() {
        for error_type in ErrorType::iter() {
            assert!(
                !error_type.as_str().is_empty(),
                "{:?} should have non-empty string",
                error_type
            );
        }
    }

    #[test]
    fn test_all_warning_types_have_string_representation() {
        for warning_type in WarningType::iter() {
            assert!(
                !warning_type.as_str().is_empty(),
                "{:?} should have non-empty string",
                warning_type
            );
        }
    }

    #[test]
    fn test_all_info_types_have_string_representation() {
        for info_type in InfoType::iter() {
            assert!(
                !info_type.as_str().is_empty(),
                "{:?} should have non-empty string",
                info_type
            );
        }
    }

    #[test]
    fn test_stats_start_at_zero() {
        let stats = AnalysisStats::new();
        assert_eq!(stats.total_errors(), 0);
        assert_eq!(stats.total_warnings(), 0);
        assert_eq!(stats.total_info(), 0);
    }

    #[test]
    fn test_stats_increment() {
        let stats = AnalysisStats::new();
        stats.increment_error(ErrorType::FetchTimeoutError);
        stats.increment_error(ErrorType::FetchTimeoutError);
        stats.increment_warning(WarningType::MissingTitle);
        stats.increment_info(InfoType::ProbeFailure);

        assert_eq!(stats.get_error_count(ErrorType::FetchTimeoutError), 2);
        assert_eq!(stats.get_error_count(ErrorType::FetchConnectError), 0);
        assert_eq!(stats.get_warning_count(WarningType::MissingTitle), 1);
        assert_eq!(stats.get_info_count(InfoType::ProbeFailure), 1);
        assert_eq!(stats.total_errors(), 2);
    }

    #[test]
    fn test_stats_shared_across_threads() {
        use std::sync::Arc;

        let stats = Arc::new(AnalysisStats::new());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    stats.increment_info(InfoType::ProbeFailure);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.get_info_count(InfoType::ProbeFailure), 400);
    }

    #[test]
    fn test_print_statistics_does_not_panic() {
        let stats = AnalysisStats::new();
        print_statistics(&stats);

        stats.increment_error(ErrorType::FetchOtherError);
        stats.increment_warning(WarningType::MissingDoctype);
        stats.increment_info(InfoType::DuplicateLink);
        print_statistics(&stats);
    }

    #[test]
    fn test_analyze_error_display() {
        let err = AnalyzeError::InvalidAddress("not-a-url".to_string());
        assert_eq!(err.to_string(), "invalid address: not-a-url");

        let err = AnalyzeError::Unreachable("https://example.com/".to_string());
        assert_eq!(err.to_string(), "address not reachable: https://example.com/");

        let err = AnalyzeError::FetchStatus(reqwest::StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("404"));
    }
}
