//! Reachability probing.

use log::debug;
use reqwest::Client;
use url::Url;

/// Issues a lightweight existence check against a single address.
///
/// One HEAD request, no body transfer. Returns `true` only when the request
/// completes without a transport error and reports a success status. Any
/// transport error or non-success status is reported as unreachable; the
/// distinction is not surfaced to callers.
pub async fn probe_reachability(client: &Client, address: &Url) -> bool {
    match client.head(address.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                debug!("probe {address} returned {status}");
            }
            status.is_success()
        }
        Err(e) => {
            debug!("probe {address} failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_probe_success_status_is_reachable() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = Client::new();
        let address = Url::parse(&format!("{}/ok", server.uri())).unwrap();
        assert!(probe_reachability(&client, &address).await);
    }

    #[tokio::test]
    async fn test_probe_not_found_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        let address = Url::parse(&format!("{}/gone", server.uri())).unwrap();
        assert!(!probe_reachability(&client, &address).await);
    }

    #[tokio::test]
    async fn test_probe_connection_refused_is_unreachable() {
        // Port 1 on loopback is not listening; the connect fails fast
        let client = Client::new();
        let address = Url::parse("http://127.0.0.1:1/").unwrap();
        assert!(!probe_reachability(&client, &address).await);
    }
}
