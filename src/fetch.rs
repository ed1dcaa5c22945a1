//! Document fetching.

use log::debug;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error_handling::{AnalysisStats, AnalyzeError, ErrorType};

/// A fully buffered fetch result.
///
/// The body is held as one `String` rather than a stream: the token scanner
/// and the doctype classifier each need an independent read of the same
/// bytes.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// The address the document was fetched from.
    pub address: Url,
    /// Status of the successful response.
    pub status: StatusCode,
    /// The complete response body.
    pub body: String,
    /// Whether the fetch observed a success status.
    pub reachable: bool,
}

/// Retrieves the document at `address` in full.
///
/// No retries: a transport failure or non-success status surfaces
/// immediately as an error carrying the underlying cause.
///
/// # Errors
///
/// Returns `AnalyzeError::Fetch` on transport failures and
/// `AnalyzeError::FetchStatus` when the response status is not a success.
pub async fn fetch_document(
    client: &Client,
    address: &Url,
    stats: &AnalysisStats,
) -> Result<FetchedDocument, AnalyzeError> {
    let response = match client.get(address.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            stats.increment_error(classify_fetch_error(&e));
            return Err(AnalyzeError::Fetch(e));
        }
    };

    let status = response.status();
    if !status.is_success() {
        stats.increment_error(ErrorType::FetchStatusError);
        return Err(AnalyzeError::FetchStatus(status));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            stats.increment_error(ErrorType::FetchBodyError);
            return Err(AnalyzeError::Fetch(e));
        }
    };

    debug!("fetched {address} ({status}, {} bytes)", body.len());

    Ok(FetchedDocument {
        address: address.clone(),
        status,
        body,
        reachable: status.is_success(),
    })
}

fn classify_fetch_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::FetchTimeoutError
    } else if error.is_connect() {
        ErrorType::FetchConnectError
    } else {
        ErrorType::FetchOtherError
    }
}
