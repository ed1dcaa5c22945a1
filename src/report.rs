//! Report types assembled from a completed analysis.

use std::fmt::Write as _;

use colored::*;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Sentinel title reported when no title text was captured during the scan.
pub const TITLE_NOT_FOUND: &str = "could not find title";

/// Heading levels h1 through h8.
///
/// h7 and h8 are not real HTML elements, but pages occasionally carry them
/// and they tokenize like any other unknown element, so they are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum HeadingLevel {
    /// `<h1>`
    H1,
    /// `<h2>`
    H2,
    /// `<h3>`
    H3,
    /// `<h4>`
    H4,
    /// `<h5>`
    H5,
    /// `<h6>`
    H6,
    /// `<h7>`
    H7,
    /// `<h8>`
    H8,
}

impl HeadingLevel {
    /// The lower-case tag name for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
            HeadingLevel::H7 => "h7",
            HeadingLevel::H8 => "h8",
        }
    }

    /// Maps a lower-cased tag name onto a heading level.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "h1" => Some(HeadingLevel::H1),
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            "h4" => Some(HeadingLevel::H4),
            "h5" => Some(HeadingLevel::H5),
            "h6" => Some(HeadingLevel::H6),
            "h7" => Some(HeadingLevel::H7),
            "h8" => Some(HeadingLevel::H8),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Occurrence counts per heading level.
///
/// Every level is always present, even at zero. Mutated only by the scanner
/// during its single pass; frozen once scanning ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingCounts {
    counts: [u32; 8],
}

impl HeadingCounts {
    /// Creates a zeroed set of counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for one level.
    pub fn increment(&mut self, level: HeadingLevel) {
        self.counts[level.index()] += 1;
    }

    /// Returns the count for one level.
    pub fn get(&self, level: HeadingLevel) -> u32 {
        self.counts[level.index()]
    }

    /// Total headings across all levels.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Iterates levels in order with their counts, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (HeadingLevel, u32)> + '_ {
        HeadingLevel::iter().map(move |level| (level, self.get(level)))
    }
}

impl Serialize for HeadingCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        for (level, count) in self.iter() {
            map.serialize_entry(level.as_str(), &count)?;
        }
        map.end()
    }
}

/// Tri-state indicator of whether the page structurally resembles a login
/// form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginSignal {
    /// Positive structural evidence of a login form was found.
    Present,
    /// No form element appeared at all.
    Absent,
    /// A form was seen but nothing identified it as a login form.
    Indeterminate,
}

impl LoginSignal {
    /// Returns a human-readable string representation of the signal.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginSignal::Present => "present",
            LoginSignal::Absent => "absent",
            LoginSignal::Indeterminate => "indeterminate",
        }
    }
}

/// The final aggregate for one analyzed page.
///
/// Created once per request and immutable after assembly; the CLI (or any
/// other caller) owns it for rendering. Two runs against an unchanged,
/// stable document compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    /// The analyzed page address.
    pub address: String,
    /// Declared document version, or the `"[blank]"` sentinel.
    pub html_version: String,
    /// Page title, or the [`TITLE_NOT_FOUND`] sentinel.
    pub title: String,
    /// Occurrence counts per heading level, all levels present.
    pub headings: HeadingCounts,
    /// Links resolved to the analyzed site.
    pub internal_links: u32,
    /// Links pointing at other sites.
    pub external_links: u32,
    /// Links whose reachability probe failed, regardless of classification.
    pub broken_links: u32,
    /// Login-form signal.
    pub login_form: LoginSignal,
}

impl PageReport {
    /// Renders the report as human-readable text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}", "Address:".bold(), self.address);
        let _ = writeln!(out, "{} {}", "HTML version:".bold(), self.html_version);
        let _ = writeln!(out, "{} {}", "Title:".bold(), self.title);

        let _ = writeln!(out, "{}", "Headings:".bold());
        if self.headings.total() == 0 {
            let _ = writeln!(out, "   none");
        } else {
            for (level, count) in self.headings.iter() {
                if count > 0 {
                    let _ = writeln!(out, "   {}: {}", level.as_str(), count);
                }
            }
        }

        let _ = writeln!(out, "{} {}", "Internal links:".bold(), self.internal_links);
        let _ = writeln!(out, "{} {}", "External links:".bold(), self.external_links);
        let _ = writeln!(out, "{} {}", "Broken links:".bold(), self.broken_links);
        let _ = writeln!(
            out,
            "{} {}",
            "Login form:".bold(),
            self.login_form.as_str()
        );
        out
    }
}
