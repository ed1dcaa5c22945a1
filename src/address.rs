//! Address validation.

use log::warn;
use url::Url;

use crate::config::MAX_ADDRESS_LENGTH;
use crate::error_handling::AnalyzeError;

/// Validates the requested page address.
///
/// Valid means: parseable as a URI, with a non-empty scheme and a non-empty
/// host, and no longer than [`MAX_ADDRESS_LENGTH`]. No network access.
///
/// # Arguments
///
/// * `address` - The address string to validate
///
/// # Errors
///
/// Returns `AnalyzeError::InvalidAddress` if the address is malformed, too
/// long, or lacks a host.
pub fn validate_address(address: &str) -> Result<Url, AnalyzeError> {
    if address.len() > MAX_ADDRESS_LENGTH {
        warn!(
            "rejecting address exceeding maximum length ({} > {}): {}...",
            address.len(),
            MAX_ADDRESS_LENGTH,
            &address[..50.min(address.len())]
        );
        return Err(AnalyzeError::InvalidAddress(truncated(address)));
    }

    match Url::parse(address) {
        Ok(parsed) if parsed.has_host() => Ok(parsed),
        Ok(_) => {
            warn!("rejecting address without a host: {address}");
            Err(AnalyzeError::InvalidAddress(address.to_string()))
        }
        Err(_) => {
            warn!("rejecting unparseable address: {address}");
            Err(AnalyzeError::InvalidAddress(address.to_string()))
        }
    }
}

/// Parses a candidate as an independently valid absolute address.
///
/// Returns `Some` only when the candidate carries its own scheme and host.
/// Relative references, fragments, and scheme-only values (e.g. `mailto:`)
/// all return `None` and are left for base-relative resolution.
pub fn parse_absolute(candidate: &str) -> Option<Url> {
    Url::parse(candidate).ok().filter(Url::has_host)
}

fn truncated(address: &str) -> String {
    address.chars().take(50).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_absolute_http_address() {
        let parsed = validate_address("http://example.com/page").unwrap();
        assert_eq!(parsed.host_str(), Some("example.com"));
        assert_eq!(parsed.scheme(), "http");
    }

    #[test]
    fn test_accepts_https_with_port_and_query() {
        let parsed = validate_address("https://example.com:8080/a?b=c").unwrap();
        assert_eq!(parsed.port(), Some(8080));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(matches!(
            validate_address("example.com/page"),
            Err(AnalyzeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_rejects_missing_host() {
        // mailto: parses but carries no host
        assert!(matches!(
            validate_address("mailto:someone@example.com"),
            Err(AnalyzeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(validate_address("not a url at all!!!").is_err());
        assert!(validate_address("").is_err());
        assert!(validate_address("://example.com").is_err());
    }

    #[test]
    fn test_rejects_too_long_address() {
        let long = format!("https://example.com/{}", "a".repeat(2100));
        assert!(validate_address(&long).is_err());
    }

    #[test]
    fn test_accepts_address_at_limit() {
        // "https://example.com/" is 20 chars; pad the path to land on the limit
        let at_limit = format!("https://example.com/{}", "a".repeat(2028));
        assert_eq!(at_limit.len(), 2048);
        assert!(validate_address(&at_limit).is_ok());
    }

    #[test]
    fn test_parse_absolute_requires_scheme_and_host() {
        assert!(parse_absolute("http://other.org/page").is_some());
        assert!(parse_absolute("https://example.com").is_some());
        assert!(parse_absolute("/relative/path").is_none());
        assert!(parse_absolute("page.html").is_none());
        assert!(parse_absolute("#section").is_none());
        assert!(parse_absolute("mailto:x@y.z").is_none());
        assert!(parse_absolute("").is_none());
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_validation_never_panics(address in ".{0,300}") {
            let _ = validate_address(&address);
            let _ = parse_absolute(&address);
        }

        #[test]
        fn test_wellformed_absolute_addresses_accepted(
            domain in "[a-z]{3,20}\\.[a-z]{2,5}",
            path in prop::collection::vec("[a-z]{1,10}", 0..5)
        ) {
            let address = format!("https://{}/{}", domain, path.join("/"));
            prop_assert!(validate_address(&address).is_ok());
        }

        #[test]
        fn test_schemeless_addresses_rejected(domain in "[a-z]{3,20}\\.[a-z]{2,5}") {
            prop_assert!(validate_address(&domain).is_err());
        }
    }
}
