// crates/note_content/src/lib.rs

mod settings;

pub use settings::NoteRefactorSettings;

use heading_marker::to_heading;

/// Assembles the text of a new note from the first selected line and the
/// lines that follow it.
///
/// The first line is treated according to `settings`, checked in this order:
///
/// 1. `content_only` keeps it verbatim and ignores the settings.
/// 2. `exclude_first_line_in_note` drops it.
/// 3. `include_first_line_as_note_heading` rewrites it as a heading using
///    `heading_format`, replacing any marker it already carries.
/// 4. Otherwise it is kept verbatim.
///
/// `rest` is joined with `\n` and never altered.
///
/// # Arguments
///
/// * `first_line` - The first line of the selection. May be empty.
/// * `rest` - The remaining selected lines, in order.
/// * `settings` - Formatting options for the new note.
/// * `content_only` - Keep the first line untouched regardless of settings.
pub fn note_content<S: AsRef<str>>(
    first_line: &str,
    rest: &[S],
    settings: &NoteRefactorSettings,
    content_only: bool,
) -> String {
    if content_only {
        return join_lines(first_line, rest);
    }

    if settings.exclude_first_line_in_note {
        log::debug!("excluding first line from note: {:?}", first_line);
        return join_rest(rest);
    }

    if settings.include_first_line_as_note_heading {
        let heading = to_heading(first_line, &settings.heading_format);
        log::debug!("first line rewritten as heading: {:?}", heading);
        return join_lines(&heading, rest);
    }

    join_lines(first_line, rest)
}

fn join_lines<S: AsRef<str>>(first_line: &str, rest: &[S]) -> String {
    let capacity = first_line.len() + rest.iter().map(|l| l.as_ref().len() + 1).sum::<usize>();
    let mut output = String::with_capacity(capacity);
    output.push_str(first_line);
    for line in rest {
        output.push('\n');
        output.push_str(line.as_ref());
    }
    output
}

fn join_rest<S: AsRef<str>>(rest: &[S]) -> String {
    rest.iter()
        .map(|l| l.as_ref())
        .collect::<Vec<&str>>()
        .join("\n")
}
