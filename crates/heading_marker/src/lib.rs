// crates/heading_marker/src/lib.rs

//! Markdown heading markers shared by the note-refactoring crates.
//!
//! Only the leading `#` run of a single line is ever looked at; nothing here
//! parses Markdown.

use once_cell::sync::Lazy;
use regex::Regex;

/// Heading format used when the settings do not name one.
pub const DEFAULT_HEADING_FORMAT: &str = "#";

// One or more `#` followed by exactly one space, anchored at the start.
static HEADING_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+) ").unwrap());

/// Returns the level of the heading marker that opens `line`, if any.
///
/// `"## Title"` is level 2. A run of `#` that is not followed by a space
/// (`"#tag"`, `"##"`) is not a heading marker.
pub fn heading_level(line: &str) -> Option<usize> {
    HEADING_PREFIX_RE
        .captures(line)
        .map(|cap| cap[1].len())
}

/// Returns `true` if `line` opens with a heading marker.
pub fn is_heading(line: &str) -> bool {
    HEADING_PREFIX_RE.is_match(line)
}

/// Removes a leading heading marker and the single space after it.
///
/// Lines without a marker are returned as-is.
pub fn strip_heading_marker(line: &str) -> &str {
    match HEADING_PREFIX_RE.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Turns `line` into a heading using `format` as the marker.
///
/// An existing marker is replaced rather than doubled, so `"### Quick Start"`
/// with format `"#"` becomes `"# Quick Start"`.
pub fn to_heading(line: &str, format: &str) -> String {
    format!("{} {}", format, strip_heading_marker(line))
}
