//! page_audit library: single-page structural analysis.
//!
//! This library fetches one web page and produces a structured report: the
//! declared HTML version, the page title, heading counts per level, counts
//! of internal/external/broken hyperlinks, and a heuristic login-form
//! signal.
//!
//! # Example
//!
//! ```no_run
//! use page_audit::{analyze_page, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     url: "https://example.com".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = analyze_page(config).await?;
//! println!("{} headings, {} broken links",
//!          report.headings.total(), report.broken_links);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod address;
pub mod config;
pub mod doctype;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod links;
pub mod probe;
pub mod report;
pub mod scan;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::AnalyzeError;
pub use report::{HeadingCounts, HeadingLevel, LoginSignal, PageReport};
pub use run::{analyze_page, analyze_page_with_cancel};

// Internal run module (contains the analysis pipeline)
mod run {
    use std::sync::Arc;
    use std::time::Duration;

    use log::{debug, info};
    use tokio_util::sync::CancellationToken;

    use crate::address::validate_address;
    use crate::config::Config;
    use crate::doctype::{classify_doctype, VERSION_UNKNOWN};
    use crate::error_handling::{print_statistics, AnalysisStats, AnalyzeError, WarningType};
    use crate::fetch::fetch_document;
    use crate::initialization::{init_client, init_probe_client};
    use crate::links::classify_links;
    use crate::probe::probe_reachability;
    use crate::report::{PageReport, TITLE_NOT_FOUND};
    use crate::scan::scan_document;

    /// Analyzes the page at `config.url` and assembles its report.
    ///
    /// This is the main entry point for the library. The pipeline: validate
    /// the address, check it is reachable, fetch the document, scan its
    /// token stream and classify its doctype (two independent reads of the
    /// same buffer), then classify and probe every discovered link.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, the page is unreachable,
    /// or the document fetch fails. Link-level failures never error; they
    /// fold into the broken-link count.
    pub async fn analyze_page(config: Config) -> Result<PageReport, AnalyzeError> {
        analyze_page_with_cancel(config, CancellationToken::new()).await
    }

    /// [`analyze_page`] with an externally owned cancellation token.
    ///
    /// Cancelling the token makes in-flight reachability probes resolve as
    /// unreachable instead of blocking; callers that abandon the request
    /// can also simply drop the returned future.
    ///
    /// # Errors
    ///
    /// As [`analyze_page`].
    pub async fn analyze_page_with_cancel(
        config: Config,
        cancel: CancellationToken,
    ) -> Result<PageReport, AnalyzeError> {
        let address = validate_address(&config.url)?;
        let client = init_client(&config)?;
        let probe_client = init_probe_client(&config)?;
        let stats = Arc::new(AnalysisStats::new());

        debug!("checking reachability of {address}");
        if !probe_reachability(&probe_client, &address).await {
            return Err(AnalyzeError::Unreachable(address.to_string()));
        }

        let document = fetch_document(&client, &address, &stats).await?;

        // the scanner and the doctype classifier read the buffer independently
        let outcome = scan_document(&document.body, &stats);
        let html_version = classify_doctype(&document.body);
        if html_version == VERSION_UNKNOWN {
            stats.increment_warning(WarningType::MissingDoctype);
        }

        let totals = classify_links(
            &probe_client,
            &address,
            outcome.links,
            Duration::from_secs(config.probe_timeout_seconds),
            config.probe_concurrency,
            &stats,
            &cancel,
        )
        .await;

        let report = PageReport {
            address: address.to_string(),
            html_version: html_version.to_string(),
            title: outcome
                .title
                .unwrap_or_else(|| TITLE_NOT_FOUND.to_string()),
            headings: outcome.headings,
            internal_links: totals.internal,
            external_links: totals.external,
            broken_links: totals.broken,
            login_form: outcome.login,
        };

        print_statistics(&stats);
        info!(
            "analysis of {} complete: {} internal, {} external, {} broken",
            report.address, report.internal_links, report.external_links, report.broken_links
        );

        Ok(report)
    }
}
