//! Link classification and reachability fan-out.
//!
//! Classification is sequential and deterministic; only the reachability
//! probes run concurrently. Probe results affect aggregate counts alone, so
//! they are collected without ordering guarantees and folded at a single
//! collection point.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use log::debug;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::address::parse_absolute;
use crate::error_handling::{AnalysisStats, InfoType, WarningType};
use crate::probe::probe_reachability;

/// Aggregate link totals for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkTotals {
    /// Links resolved to the analyzed site.
    pub internal: u32,
    /// Links pointing at other sites.
    pub external: u32,
    /// Links that failed resolution or the reachability probe; counted
    /// regardless of the internal/external classification.
    pub broken: u32,
}

/// Classifies each raw link against the page address and probes
/// reachability.
///
/// A link is external when it is independently a valid absolute address and
/// does not contain the page address as a substring; everything else is
/// internal and resolved against the page address as base. An internal link
/// that fails resolution is counted broken without a probe rather than
/// aborting the stage.
///
/// Probes are dispatched onto a bounded pool (`probe_concurrency` at a
/// time), each under its own `probe_timeout` deadline, and cancel
/// cooperatively through `cancel`: a probe observed after cancellation
/// reports unreachable immediately instead of touching the network.
pub async fn classify_links(
    client: &Client,
    page_address: &Url,
    raw_links: Vec<String>,
    probe_timeout: Duration,
    probe_concurrency: usize,
    stats: &AnalysisStats,
    cancel: &CancellationToken,
) -> LinkTotals {
    let mut totals = LinkTotals::default();
    let mut targets: Vec<Url> = Vec::with_capacity(raw_links.len());
    let page_str = page_address.as_str();

    for raw in &raw_links {
        match parse_absolute(raw) {
            Some(absolute) if !raw.contains(page_str) => {
                totals.external += 1;
                targets.push(absolute);
            }
            _ => {
                totals.internal += 1;
                match page_address.join(raw) {
                    Ok(resolved) => targets.push(resolved),
                    Err(e) => {
                        debug!("cannot resolve {raw} against {page_address}: {e}");
                        stats.increment_warning(WarningType::UnresolvableLink);
                        totals.broken += 1;
                    }
                }
            }
        }
    }

    debug!(
        "classified {} links ({} internal, {} external), probing {}",
        raw_links.len(),
        totals.internal,
        totals.external,
        targets.len()
    );

    let results: Vec<bool> = stream::iter(targets.into_iter().map(|target| {
        let client = client.clone();
        let cancel = cancel.clone();
        async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("probe of {target} cancelled");
                    false
                }
                reachable = async {
                    match tokio::time::timeout(probe_timeout, probe_reachability(&client, &target))
                        .await
                    {
                        Ok(reachable) => reachable,
                        Err(_) => {
                            debug!("probe of {target} timed out");
                            false
                        }
                    }
                } => reachable,
            }
        }
    }))
    .buffer_unordered(probe_concurrency.max(1))
    .collect()
    .await;

    for reachable in results {
        if !reachable {
            totals.broken += 1;
            stats.increment_info(InfoType::ProbeFailure);
        }
    }

    totals
}
