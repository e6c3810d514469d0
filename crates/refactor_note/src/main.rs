use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::fs;
use std::path::PathBuf;

use note_content::NoteRefactorSettings;
use refactor_note::{
    load_settings, note_title, refactor_selection, write_note, RefactorOptions, Selection,
};

fn main() -> Result<()> {
    let matches = Command::new("refactor_note")
        .version("0.1.0")
        .about("Extracts a block of lines from a Markdown note into a new note")
        .arg(
            Arg::new("file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Markdown note to extract from"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .required(true)
                .value_parser(clap::value_parser!(usize))
                .help("First line of the selection (1-based)"),
        )
        .arg(
            Arg::new("end")
                .long("end")
                .value_parser(clap::value_parser!(usize))
                .help("Last line of the selection, inclusive (defaults to --start)"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON settings file of the note refactor plugin"),
        )
        .arg(
            Arg::new("content_only")
                .long("content-only")
                .help("Keep the first line verbatim, ignoring heading and exclusion settings")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude_first_line")
                .long("exclude-first-line")
                .help("Leave the first line out of the new note")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("first_line_as_heading")
                .long("first-line-as-heading")
                .help("Turn the first line into a heading")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("heading_format")
                .long("heading-format")
                .num_args(1)
                .help("Heading marker used with --first-line-as-heading, e.g. \"##\""),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .num_args(1)
                .help("Name of the new note (defaults to one derived from the first line)"),
        )
        .arg(
            Arg::new("output_dir")
                .long("output-dir")
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write the new note into this directory instead of printing it"),
        )
        .arg(
            Arg::new("no_footnotes")
                .long("no-footnotes")
                .help("Do not copy referenced footnote definitions (use when the selection already holds them, otherwise they are copied again)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();

    // Required args are guaranteed by clap.
    let file = matches
        .get_one::<PathBuf>("file")
        .cloned()
        .context("Missing note file")?;
    let start = *matches.get_one::<usize>("start").context("Missing --start")?;
    let end = matches.get_one::<usize>("end").copied().unwrap_or(start);

    // 1. Settings: file first, then flag overrides.
    let mut settings = match matches.get_one::<PathBuf>("settings") {
        Some(path) => load_settings(path)?,
        None => NoteRefactorSettings::default(),
    };
    if matches.get_flag("exclude_first_line") {
        settings.exclude_first_line_in_note = true;
    }
    if matches.get_flag("first_line_as_heading") {
        settings.include_first_line_as_note_heading = true;
    }
    if let Some(format) = matches.get_one::<String>("heading_format") {
        settings.heading_format = format.clone();
    }
    log::debug!("settings: {:?}", settings);

    // 2. Read the source note.
    let document = fs::read_to_string(&file)
        .with_context(|| format!("Error reading note {}", file.display()))?;

    // 3. Build the new note.
    let options = RefactorOptions {
        content_only: matches.get_flag("content_only"),
        skip_footnotes: matches.get_flag("no_footnotes"),
        name: matches.get_one::<String>("name").cloned(),
        source_title: note_title(&file),
    };
    let note = refactor_selection(&document, Selection::new(start, end), &settings, &options)
        .with_context(|| format!("Failed to refactor {}", file.display()))?;

    // 4. Persist or print.
    match matches.get_one::<PathBuf>("output_dir") {
        Some(dir) => {
            let path = write_note(dir, &note)?;
            println!("Created note {}", path.display());
        }
        None => println!("{}", note.content),
    }

    Ok(())
}
