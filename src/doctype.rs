//! Declared document-type classification.

/// Sentinel version reported when no known doctype marker is present.
pub const VERSION_UNKNOWN: &str = "[blank]";

/// Known doctype markers, tested in this order against the upper-cased
/// document prefix. The last marker that matches wins, so generic markers
/// precede the specific variants that embed them ("HTML 4.01" before
/// "HTML 4.01 TRANSITIONAL"); a prefix declaring a specific variant
/// therefore resolves to that variant, not the generic one.
const DOCTYPE_MARKERS: [(&str, &str); 8] = [
    ("HTML 4.01 Strict", "HTML 4.01"),
    ("HTML 4.01 Transitional", "HTML 4.01 TRANSITIONAL"),
    ("HTML 4.01 Frameset", "HTML 4.01 FRAMESET"),
    ("XHTML 1.0 Strict", "XHTML 1.0 STRICT"),
    ("XHTML 1.0 Transitional", "XHTML 1.0 TRANSITIONAL"),
    ("XHTML 1.0 Frameset", "XHTML 1.0 FRAMESET"),
    ("XHTML 1.1", "XHTML 1.1"),
    ("HTML 5", "<!DOCTYPE HTML>"),
];

/// Determines the declared document version from the raw document buffer.
///
/// Inspects only the portion preceding the first case-insensitive
/// occurrence of the root `<html` tag, upper-cased, and tests it for each
/// known doctype-identifying substring in table order. A prefix that
/// pathologically contains several unrelated markers resolves to the last
/// table entry that matched; callers must not rely on a precedence beyond
/// the table order. Returns [`VERSION_UNKNOWN`] when nothing matches.
pub fn classify_doctype(body: &str) -> &'static str {
    let upper = body.to_uppercase();
    let prefix = match upper.find("<HTML") {
        Some(root) => &upper[..root],
        None => upper.as_str(),
    };

    let mut version = VERSION_UNKNOWN;
    for (name, marker) in DOCTYPE_MARKERS {
        if prefix.contains(marker) {
            version = name;
        }
    }
    version
}
