// crates/note_content/src/settings.rs

use heading_marker::DEFAULT_HEADING_FORMAT;
use serde::{Deserialize, Serialize};

/// Formatting options for a newly extracted note.
///
/// Field names serialize in camelCase so the persisted settings file of the
/// editor plugin can be read as-is. Missing keys fall back to the defaults
/// and unknown keys are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteRefactorSettings {
    /// Drop the first selected line from the new note.
    pub exclude_first_line_in_note: bool,
    /// Turn the first selected line into a heading.
    pub include_first_line_as_note_heading: bool,
    /// Marker used when the first line becomes a heading, e.g. `"#"` or `"##"`.
    pub heading_format: String,
    /// Prepended verbatim to every derived file name.
    pub file_name_prefix: String,
    /// Template wrapped around the new note content. Empty means no template.
    pub refactored_note_template: String,
}

impl Default for NoteRefactorSettings {
    fn default() -> Self {
        Self {
            exclude_first_line_in_note: false,
            include_first_line_as_note_heading: false,
            heading_format: DEFAULT_HEADING_FORMAT.to_string(),
            file_name_prefix: String::new(),
            refactored_note_template: String::new(),
        }
    }
}
