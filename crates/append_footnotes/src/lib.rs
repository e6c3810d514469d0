// crates/append_footnotes/src/lib.rs

//! Carries footnote definitions over into an extracted note.
//!
//! A reference is an inline `[^id]`; a definition is a single line starting
//! with `[^id]:`. Definitions that span several lines are not followed: only
//! the line that opens them is copied.

use once_cell::sync::Lazy;
use regex::Regex;

// `[^id]` where `id` has no whitespace and no closing bracket.
static FOOTNOTE_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\^([^\]\s]+)\]").unwrap());

/// Returns the footnote ids referenced in `text`, each once, in the order
/// they first appear.
pub fn footnote_references(text: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for cap in FOOTNOTE_REF_RE.captures_iter(text) {
        let id = &cap[1];
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

/// Finds the line defining footnote `id`.
///
/// The first line that, after leading whitespace, starts with `[^id]:` wins.
/// The line is returned untrimmed.
pub fn find_footnote_definition<'a, S: AsRef<str>>(id: &str, lines: &'a [S]) -> Option<&'a str> {
    let prefix = format!("[^{}]:", id);
    lines
        .iter()
        .map(|line| line.as_ref())
        .find(|line| line.trim_start().starts_with(&prefix))
}

/// Appends to `note_body` the definitions of every footnote referenced in
/// `extracted_text`, looked up in `full_original_lines`.
///
/// Definitions follow the order in which their references first appear,
/// each on its own line. A reference without a definition is skipped. When
/// nothing is found `note_body` comes back unchanged.
///
/// Running this twice over its own output appends the definitions again, so
/// call it once per assembled note.
///
/// # Arguments
///
/// * `extracted_text` - Text scanned for `[^id]` references.
/// * `note_body` - Text the definitions are appended to.
/// * `full_original_lines` - The whole source document, one element per line.
pub fn append_footnotes<S: AsRef<str>>(
    extracted_text: &str,
    note_body: &str,
    full_original_lines: &[S],
) -> String {
    let ids = footnote_references(extracted_text);
    if ids.is_empty() {
        return note_body.to_string();
    }

    let mut output = note_body.to_string();
    for id in &ids {
        match find_footnote_definition(id, full_original_lines) {
            Some(definition) => {
                output.push('\n');
                output.push_str(definition);
            }
            None => log::debug!("no definition found for footnote [^{}]", id),
        }
    }
    output
}
