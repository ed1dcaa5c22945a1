//! Document-order token stream.
//!
//! The scanner consumes the fetched buffer as a flat sequence of lexical
//! events. The parse itself is delegated to html5ever (via `scraper`); this
//! module walks the resulting tree edge by edge and flattens it back into
//! the event order the scanner cares about.

use ego_tree::iter::Edge;
use scraper::node::{Element, Node};
use scraper::Html;

/// One lexical unit of the scan: a start tag (self-closing tags included)
/// or a text run. Closing tags carry no information the scanner uses and
/// are filtered out here, which is what keeps them from ever incrementing
/// a heading count.
#[derive(Debug)]
pub enum ScanToken<'a> {
    /// A start or self-closing tag.
    Start(&'a Element),
    /// A text run.
    Text(&'a str),
}

/// Walks the parsed tree in document order, yielding start-tag and text
/// events. Comments, doctype nodes, and closing edges are skipped.
pub fn token_stream(document: &Html) -> impl Iterator<Item = ScanToken<'_>> {
    document.tree.root().traverse().filter_map(|edge| match edge {
        Edge::Open(node) => match node.value() {
            Node::Element(element) => Some(ScanToken::Start(element)),
            Node::Text(text) => Some(ScanToken::Text(&**text)),
            _ => None,
        },
        Edge::Close(_) => None,
    })
}
