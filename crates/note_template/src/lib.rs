// crates/note_template/src/lib.rs

//! Renders the template a refactored note is wrapped in.
//!
//! Supported placeholders:
//!
//! * `{{new_note_content}}` - the assembled note body
//! * `{{new_note_title}}`   - the new note's name
//! * `{{title}}`            - the name of the note the content came from
//!
//! Inner whitespace is allowed (`{{ title }}`). Anything else between
//! double braces is left alone.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").unwrap());

/// Values substituted into a refactored-note template.
#[derive(Clone, Debug, Default)]
pub struct TemplateValues<'a> {
    pub new_note_content: &'a str,
    pub new_note_title: &'a str,
    pub title: &'a str,
}

impl<'a> TemplateValues<'a> {
    fn lookup(&self, name: &str) -> Option<&'a str> {
        match name {
            "new_note_content" => Some(self.new_note_content),
            "new_note_title" => Some(self.new_note_title),
            "title" => Some(self.title),
            _ => None,
        }
    }
}

/// Renders `template` with `values`.
///
/// A blank template yields the new note content unchanged. Substitution is a
/// single pass, so placeholder text inside the inserted values stays literal.
pub fn render_note_template(template: &str, values: &TemplateValues) -> String {
    if template.trim().is_empty() {
        return values.new_note_content.to_string();
    }

    PLACEHOLDER_RE
        .replace_all(template, |cap: &Captures| match values.lookup(&cap[1]) {
            Some(value) => value.to_string(),
            None => cap[0].to_string(),
        })
        .into_owned()
}
