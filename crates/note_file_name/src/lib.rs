// crates/note_file_name/src/lib.rs

use heading_marker::strip_heading_marker;
use once_cell::sync::Lazy;
use regex::Regex;

/// Name used when nothing usable is left of the first line.
pub const UNTITLED: &str = "Untitled";

/// Extension given to new note files.
pub const NOTE_EXTENSION: &str = ".md";

// Characters the vault cannot store in a file name, plus the ones that would
// break a `[[wikilink]]` to the note.
static ILLEGAL_CHARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\/:*?"<>|#^\[\]]"#).unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Derives the name of a new note from the first selected line.
///
/// A leading heading marker is dropped, illegal characters are removed and
/// whitespace runs collapse to a single space. `prefix` is prepended as-is.
/// If nothing is left the note is called [`UNTITLED`].
pub fn note_file_name(first_line: &str, prefix: &str) -> String {
    let stripped = strip_heading_marker(first_line.trim_start());
    let cleaned = ILLEGAL_CHARS_RE.replace_all(stripped, "");
    let collapsed = WHITESPACE_RE.replace_all(&cleaned, " ");
    let name = collapsed.trim();

    if name.is_empty() {
        format!("{}{}", prefix, UNTITLED)
    } else {
        format!("{}{}", prefix, name)
    }
}

/// Returns `name` with the note extension, unless it already ends with it.
pub fn note_file_path_name(name: &str) -> String {
    if name.ends_with(NOTE_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, NOTE_EXTENSION)
    }
}
