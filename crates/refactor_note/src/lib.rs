// crates/refactor_note/src/lib.rs

use anyhow::{bail, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

use append_footnotes::append_footnotes;
use note_content::{note_content, NoteRefactorSettings};
use note_file_name::{note_file_name, note_file_path_name};
use note_template::{render_note_template, TemplateValues};

/// A block of lines picked out of the source document.
///
/// Both ends are 1-based and inclusive, the way an editor numbers lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A selection covering a single line.
    pub fn line(line: usize) -> Self {
        Self::new(line, line)
    }

    /// Converts the selection into a 0-based, end-exclusive index range over a
    /// document of `line_count` lines.
    pub fn to_range(self, line_count: usize) -> Result<Range<usize>> {
        if self.start == 0 {
            bail!("Line numbers start at 1, got start line 0");
        }
        if self.start > self.end {
            bail!(
                "Start line {} is after end line {}",
                self.start,
                self.end
            );
        }
        if self.end > line_count {
            bail!(
                "End line {} is beyond the end of the document ({} lines)",
                self.end,
                line_count
            );
        }
        Ok(self.start - 1..self.end)
    }
}

/// Per-invocation switches that are not part of the persisted settings.
#[derive(Clone, Debug, Default)]
pub struct RefactorOptions {
    /// Keep the first line verbatim regardless of the settings.
    pub content_only: bool,
    /// Skip copying footnote definitions into the new note.
    pub skip_footnotes: bool,
    /// Explicit name for the new note instead of one derived from the first line.
    /// It is cleaned the same way a derived name is.
    pub name: Option<String>,
    /// Name of the note the selection comes from, used by `{{title}}`.
    pub source_title: String,
}

/// The result of refactoring a selection: what to call the new note and
/// what to put in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefactoredNote {
    pub name: String,
    pub content: String,
}

impl RefactoredNote {
    /// File name the note is written under.
    pub fn file_name(&self) -> String {
        note_file_path_name(&self.name)
    }
}

/// Splits a document into lines on `\n`, dropping a trailing `\r` from each.
///
/// Unlike [`str::lines`] a trailing newline yields a final empty line, so
/// line numbers match what an editor shows.
pub fn split_document(document: &str) -> Vec<&str> {
    document
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Builds a new note from `selection` of `document`.
///
/// The selected lines go through the note assembler, then the footnote
/// definitions they reference are copied from the whole document, and the
/// result is wrapped in the settings' template.
pub fn refactor_selection(
    document: &str,
    selection: Selection,
    settings: &NoteRefactorSettings,
    options: &RefactorOptions,
) -> Result<RefactoredNote> {
    let lines = split_document(document);
    let range = selection
        .to_range(lines.len())
        .context("Invalid selection")?;
    let selected = &lines[range];
    log::debug!(
        "selected lines {}..={} ({} line(s))",
        selection.start,
        selection.end,
        selected.len()
    );

    let (first_line, rest) = match selected.split_first() {
        Some((first, rest)) => (*first, rest),
        None => ("", &[][..]),
    };

    let name = match &options.name {
        Some(name) => note_file_name(name, ""),
        None => note_file_name(first_line, &settings.file_name_prefix),
    };
    log::info!("new note name: {}", name);

    let mut content = note_content(first_line, rest, settings, options.content_only);

    if !options.skip_footnotes {
        let extracted_text = selected.join("\n");
        content = append_footnotes(&extracted_text, &content, &lines);
    }

    let content = render_note_template(
        &settings.refactored_note_template,
        &TemplateValues {
            new_note_content: &content,
            new_note_title: &name,
            title: &options.source_title,
        },
    );

    Ok(RefactoredNote { name, content })
}

/// Reads persisted settings from a JSON file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<NoteRefactorSettings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Error reading settings file {}", path.display()))?;
    let settings = serde_json::from_str(&raw)
        .with_context(|| format!("Error parsing settings file {}", path.display()))?;
    Ok(settings)
}

/// Writes `note` into `dir`, refusing to overwrite an existing note.
///
/// Returns the path of the created file.
pub fn write_note<P: AsRef<Path>>(dir: P, note: &RefactoredNote) -> Result<PathBuf> {
    let dir = dir.as_ref();
    if note.name.contains(&['/', '\\'][..]) || note.name == "." || note.name == ".." {
        bail!("Note name {:?} is not a plain file name", note.name);
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Error creating directory {}", dir.display()))?;

    let path = dir.join(note.file_name());
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .with_context(|| format!("Error creating note {}", path.display()))?;
    file.write_all(note.content.as_bytes())
        .with_context(|| format!("Error writing note {}", path.display()))?;

    Ok(path)
}

/// Name of a note as shown in the vault: its file stem.
pub fn note_title<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DOCUMENT: &str = "# Inbox\n\nIdea one[^1]\nmore about it\n\n## Later\n[^1]: where it came from\n";

    #[test]
    fn test_selection_to_range() {
        assert_eq!(Selection::new(2, 4).to_range(5).unwrap(), 1..4);
        assert_eq!(Selection::line(5).to_range(5).unwrap(), 4..5);
    }

    #[test]
    fn test_selection_errors() {
        assert!(Selection::new(0, 1).to_range(5).is_err());
        assert!(Selection::new(3, 2).to_range(5).is_err());
        let err = Selection::new(1, 6).to_range(5).unwrap_err();
        assert!(err.to_string().contains("beyond the end of the document"));
    }

    #[test]
    fn test_split_document_keeps_trailing_line_and_strips_cr() {
        assert_eq!(split_document("a\r\nb\n"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_refactor_selection_default_settings() {
        let note = refactor_selection(
            DOCUMENT,
            Selection::new(3, 4),
            &NoteRefactorSettings::default(),
            &RefactorOptions::default(),
        )
        .unwrap();
        assert_eq!(note.name, "Idea one1");
        assert_eq!(note.content, "Idea one[^1]\nmore about it\n[^1]: where it came from");
        assert_eq!(note.file_name(), "Idea one1.md");
    }

    #[test]
    fn test_refactor_selection_heading_and_template() {
        let settings = NoteRefactorSettings {
            include_first_line_as_note_heading: true,
            heading_format: "##".to_string(),
            refactored_note_template: "from [[{{title}}]]\n{{new_note_content}}".to_string(),
            ..NoteRefactorSettings::default()
        };
        let options = RefactorOptions {
            name: Some("Idea".to_string()),
            source_title: "Inbox".to_string(),
            ..RefactorOptions::default()
        };
        let note = refactor_selection(DOCUMENT, Selection::new(3, 4), &settings, &options).unwrap();
        assert_eq!(note.name, "Idea");
        assert_eq!(
            note.content,
            "from [[Inbox]]\n## Idea one[^1]\nmore about it\n[^1]: where it came from"
        );
    }

    #[test]
    fn test_refactor_selection_skip_footnotes() {
        let options = RefactorOptions {
            skip_footnotes: true,
            ..RefactorOptions::default()
        };
        let note = refactor_selection(
            DOCUMENT,
            Selection::line(3),
            &NoteRefactorSettings::default(),
            &options,
        )
        .unwrap();
        assert_eq!(note.content, "Idea one[^1]");
    }

    #[test]
    fn test_refactor_selection_excluded_heading_keeps_footnote_scan() {
        // The reference sits on the dropped first line; its definition still travels.
        let settings = NoteRefactorSettings {
            exclude_first_line_in_note: true,
            ..NoteRefactorSettings::default()
        };
        let note = refactor_selection(
            DOCUMENT,
            Selection::new(3, 4),
            &settings,
            &RefactorOptions::default(),
        )
        .unwrap();
        assert_eq!(note.content, "more about it\n[^1]: where it came from");
    }

    #[test]
    fn test_load_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"excludeFirstLineInNote": true}"#).unwrap();
        let settings = load_settings(&path).unwrap();
        assert!(settings.exclude_first_line_in_note);
        assert_eq!(settings.heading_format, "#");
    }

    #[test]
    fn test_load_settings_errors() {
        let dir = tempdir().unwrap();
        let missing = load_settings(dir.path().join("missing.json")).unwrap_err();
        assert!(missing.to_string().contains("Error reading settings file"));

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let broken = load_settings(&path).unwrap_err();
        assert!(broken.to_string().contains("Error parsing settings file"));
    }

    #[test]
    fn test_write_note_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let note = RefactoredNote {
            name: "Idea".to_string(),
            content: "body".to_string(),
        };
        let path = write_note(dir.path(), &note).unwrap();
        assert_eq!(path, dir.path().join("Idea.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "body");
        assert!(write_note(dir.path(), &note).is_err());
    }

    #[test]
    fn test_explicit_name_is_cleaned() {
        let options = RefactorOptions {
            name: Some("../notes/escaped: idea?".to_string()),
            ..RefactorOptions::default()
        };
        let note = refactor_selection(
            DOCUMENT,
            Selection::line(3),
            &NoteRefactorSettings::default(),
            &options,
        )
        .unwrap();
        assert_eq!(note.name, "..notesescaped idea");

        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let path = write_note(&out, &note).unwrap();
        assert_eq!(path.parent(), Some(out.as_path()));
        assert!(!dir.path().join("escaped idea.md").exists());
    }

    #[test]
    fn test_write_note_rejects_path_names() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        for name in ["../escaped", "sub/note", "sub\\note", ".."] {
            let note = RefactoredNote {
                name: name.to_string(),
                content: "body".to_string(),
            };
            let err = write_note(&out, &note).unwrap_err();
            assert!(err.to_string().contains("is not a plain file name"));
        }
        assert!(!dir.path().join("escaped.md").exists());
    }

    #[test]
    fn test_note_title() {
        assert_eq!(note_title("vault/Inbox.md"), "Inbox");
    }
}
