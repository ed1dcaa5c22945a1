//! Single-pass token scanner.
//!
//! Consumes the fetched document buffer as an ordered token stream and
//! extracts, in one pass: the page title, per-level heading counts, the
//! ordered deduplicated list of raw link targets, and the login-form
//! signal. All tracking state is scan-local (`ScanState`); two scans never
//! share anything, so the output is deterministic for a given buffer.
//!
//! Malformed markup cannot abort the scan: the html5ever parse recovers
//! from tokenizer-level errors, and the scanner reports whatever structure
//! was recovered.

mod state;
mod tokens;

use log::debug;
use scraper::Html;

use crate::error_handling::{AnalysisStats, InfoType, WarningType};
use crate::report::{HeadingCounts, HeadingLevel, LoginSignal};
use state::{LinkAdmission, ScanState};
use tokens::{token_stream, ScanToken};

/// Everything the scanner extracts in one pass.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Captured page title, if any text followed a `<title>` start tag.
    pub title: Option<String>,
    /// Heading occurrence counts, all levels present.
    pub headings: HeadingCounts,
    /// Unique raw link targets in first-occurrence order, exactly as they
    /// appeared in anchor href attributes (whitespace stripped).
    pub links: Vec<String>,
    /// Login-form signal.
    pub login: LoginSignal,
}

/// Scans the document buffer.
///
/// Tag-name comparisons rely on the parser lower-casing element names;
/// attribute value comparisons are exact.
pub fn scan_document(body: &str, stats: &AnalysisStats) -> ScanOutcome {
    let document = Html::parse_document(body);
    let mut state = ScanState::new();

    let mut title: Option<String> = None;
    let mut headings = HeadingCounts::new();
    let mut links: Vec<String> = Vec::new();
    let mut login_evidence = false;

    for token in token_stream(&document) {
        match token {
            ScanToken::Start(element) => {
                let name = element.name();
                match name {
                    "title" => state.arm_title_capture(),
                    "a" => {
                        if let Some(href) = element.attr("href") {
                            let normalized: String =
                                href.chars().filter(|c| !c.is_whitespace()).collect();
                            if normalized == "#" {
                                state.note_fragment();
                                stats.increment_info(InfoType::FragmentOnlyAnchor);
                            } else {
                                match state.admit_link(&normalized) {
                                    LinkAdmission::Added => links.push(normalized),
                                    LinkAdmission::Duplicate => {
                                        stats.increment_info(InfoType::DuplicateLink)
                                    }
                                }
                            }
                        }
                    }
                    "form" => state.mark_form_seen(),
                    "input" if state.form_seen() => {
                        if element.attr("type") == Some("password") {
                            login_evidence = true;
                        }
                    }
                    "button" if state.form_seen() => {
                        if element.attr("name") == Some("login") {
                            login_evidence = true;
                        }
                        state.arm_button_context();
                    }
                    _ => {}
                }
                if let Some(level) = HeadingLevel::from_tag_name(name) {
                    headings.increment(level);
                }
            }
            ScanToken::Text(text) => {
                if state.take_title_capture() {
                    title = Some(text.trim().to_string());
                }
                if state.button_context() && text.to_lowercase().contains("log in") {
                    login_evidence = true;
                }
            }
        }
    }

    let title = title.filter(|t| !t.is_empty());
    if title.is_none() {
        stats.increment_warning(WarningType::MissingTitle);
    }

    let login = if login_evidence {
        LoginSignal::Present
    } else if state.form_seen() {
        LoginSignal::Indeterminate
    } else {
        LoginSignal::Absent
    };

    debug!(
        "scan complete: {} unique links, {} headings, login signal {}",
        links.len(),
        headings.total(),
        login.as_str()
    );

    ScanOutcome {
        title,
        headings,
        links,
        login,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::AnalysisStats;

    fn scan(body: &str) -> ScanOutcome {
        scan_document(body, &AnalysisStats::new())
    }

    #[test]
    fn test_title_captured() {
        let outcome = scan("<html><head><title>Sample</title></head><body></body></html>");
        assert_eq!(outcome.title.as_deref(), Some("Sample"));
    }

    #[test]
    fn test_title_missing_yields_none_and_warning() {
        let stats = AnalysisStats::new();
        let outcome = scan_document("<html><head></head><body><p>x</p></body></html>", &stats);
        assert_eq!(outcome.title, None);
        assert_eq!(stats.get_warning_count(WarningType::MissingTitle), 1);
    }

    #[test]
    fn test_title_whitespace_trimmed() {
        let outcome = scan("<html><head><title>  Sample  </title></head><body></body></html>");
        assert_eq!(outcome.title.as_deref(), Some("Sample"));
    }

    #[test]
    fn test_heading_counts_exact() {
        let outcome = scan(
            "<html><body>\
             <h1>a</h1><h2>b</h2><h2>c</h2><h3>d</h3>\
             <h7>legacy</h7>\
             </body></html>",
        );
        assert_eq!(outcome.headings.get(HeadingLevel::H1), 1);
        assert_eq!(outcome.headings.get(HeadingLevel::H2), 2);
        assert_eq!(outcome.headings.get(HeadingLevel::H3), 1);
        assert_eq!(outcome.headings.get(HeadingLevel::H7), 1);
        assert_eq!(outcome.headings.get(HeadingLevel::H4), 0);
    }

    #[test]
    fn test_closing_tags_never_increment() {
        let outcome = scan("<html><body><h2>once</h2></body></html>");
        assert_eq!(outcome.headings.get(HeadingLevel::H2), 1);
    }

    #[test]
    fn test_links_deduplicated_in_first_occurrence_order() {
        let outcome = scan(
            r#"<html><body>
               <a href="/b">b</a>
               <a href="/a">a</a>
               <a href="/b">b again</a>
               </body></html>"#,
        );
        assert_eq!(outcome.links, vec!["/b", "/a"]);
    }

    #[test]
    fn test_link_whitespace_stripped_before_dedup() {
        let outcome = scan(
            r#"<html><body>
               <a href="/some page">one</a>
               <a href="/somepage">two</a>
               </body></html>"#,
        );
        assert_eq!(outcome.links, vec!["/somepage"]);
    }

    #[test]
    fn test_fragment_anchor_suppressed() {
        let stats = AnalysisStats::new();
        let outcome = scan_document(
            r##"<html><body><a href="#">top</a></body></html>"##,
            &stats,
        );
        assert!(outcome.links.is_empty());
        assert_eq!(stats.get_info_count(InfoType::FragmentOnlyAnchor), 1);
    }

    #[test]
    fn test_fragment_then_new_link_still_added() {
        let outcome = scan(
            r##"<html><body>
                <a href="#">top</a>
                <a href="/next">next</a>
                </body></html>"##,
        );
        assert_eq!(outcome.links, vec!["/next"]);
    }

    #[test]
    fn test_fragment_then_seen_link_still_deduplicated() {
        let outcome = scan(
            r##"<html><body>
                <a href="/a">a</a>
                <a href="#">top</a>
                <a href="/a">a again</a>
                </body></html>"##,
        );
        assert_eq!(outcome.links, vec!["/a"]);
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let outcome = scan(r#"<html><body><a name="here">no target</a></body></html>"#);
        assert!(outcome.links.is_empty());
    }

    #[test]
    fn test_password_input_inside_form_is_present() {
        let outcome = scan(
            r#"<html><body>
               <form action="/session">
               <input type="text" name="user">
               <input type="password" name="pass">
               </form>
               </body></html>"#,
        );
        assert_eq!(outcome.login, LoginSignal::Present);
    }

    #[test]
    fn test_password_input_without_form_is_not_evidence() {
        let outcome = scan(r#"<html><body><input type="password"></body></html>"#);
        assert_ne!(outcome.login, LoginSignal::Present);
    }

    #[test]
    fn test_button_named_login_inside_form_is_present() {
        let outcome = scan(
            r#"<html><body>
               <form><button name="login">Go</button></form>
               </body></html>"#,
        );
        assert_eq!(outcome.login, LoginSignal::Present);
    }

    #[test]
    fn test_log_in_text_is_present_even_without_form() {
        // the text heuristic is armed from the start of the scan
        let outcome = scan("<html><body><p>Please Log In to continue</p></body></html>");
        assert_eq!(outcome.login, LoginSignal::Present);
    }

    #[test]
    fn test_form_context_sticky_after_form_closes() {
        let outcome = scan(
            r#"<html><body>
               <form action="/search"></form>
               <input type="password">
               </body></html>"#,
        );
        assert_eq!(outcome.login, LoginSignal::Present);
    }

    #[test]
    fn test_form_without_evidence_is_indeterminate() {
        let outcome = scan(
            r#"<html><body>
               <form action="/search"><input type="text" name="q"></form>
               </body></html>"#,
        );
        assert_eq!(outcome.login, LoginSignal::Indeterminate);
    }

    #[test]
    fn test_no_form_no_wording_is_absent() {
        let outcome = scan("<html><body><p>nothing here</p></body></html>");
        assert_eq!(outcome.login, LoginSignal::Absent);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let body = r##"<html><head><title>t</title></head><body>
            <h1>x</h1><a href="/a">a</a><a href="#">f</a><form></form>
            </body></html>"##;
        let first = scan(body);
        let second = scan(body);
        assert_eq!(first.title, second.title);
        assert_eq!(first.headings, second.headings);
        assert_eq!(first.links, second.links);
        assert_eq!(first.login, second.login);
    }

    #[test]
    fn test_malformed_markup_still_scans() {
        let outcome = scan("<html><body><h2>ok<a href='/x'><h2></body>");
        assert_eq!(outcome.headings.get(HeadingLevel::H2), 2);
        assert_eq!(outcome.links, vec!["/x"]);
    }
}
