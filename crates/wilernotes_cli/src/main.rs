//! Command-line shell over the WilerNotes core.
//!
//! # Responsibility
//! - Drive the same `NoteStore` the desktop shell uses, one command per run.
//! - Keep output plain and line-oriented for scripting.

use chrono::Local;
use std::error::Error;
use std::process::ExitCode;
use wilernotes_core::{
    core_version, init_logging, list_items, note_detail, NoteField, NoteId, NoteStore,
    StoreConfig, WriteMode,
};

const USAGE: &str = "\
WilerNotes CLI
Usage:
  wilernotes list [query]            List notes, optionally filtered by text
  wilernotes new                     Create a blank note and print its id
  wilernotes show <id>               Print one note with its metadata
  wilernotes title <id> <text...>    Replace a note title
  wilernotes edit <id> <text...>     Replace a note body (markdown)
  wilernotes folder <id> <name>      Move a note to another folder
  wilernotes delete <id>             Delete a note
  wilernotes path                    Show the database path
  wilernotes version                 Show the core version
  wilernotes help                    Show this message

Environment:
  WILERNOTES_DB_PATH                 Database file (default: <tmp>/wilernotes.sqlite3)
  WILERNOTES_LOCALE                  en|fr
  WILERNOTES_LOG_DIR, WILERNOTES_LOG_LEVEL
                                     Enable rolling file logs
";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args, StoreConfig::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: Vec<String>, mut config: StoreConfig) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        print!("{USAGE}");
        return Ok(());
    }
    let command = args.remove(0);

    // One process per command: the write must land before exit.
    config.options.write_mode = WriteMode::Inline;
    if let (Some(log_dir), Some(level)) = (&config.log_dir, &config.log_level) {
        init_logging(level, log_dir)?;
    }

    match command.as_str() {
        "list" => list(&config.open_store(), &args.join(" ")),
        "new" => {
            let note = config.open_store().create();
            println!("Created note {} ({})", note.id, note.title);
            Ok(())
        }
        "show" => show(&config.open_store(), &args),
        "title" => edit(&mut config.open_store(), &args, NoteField::Title),
        "edit" => edit(&mut config.open_store(), &args, NoteField::Content),
        "folder" => edit(&mut config.open_store(), &args, NoteField::Folder),
        "delete" => delete(&mut config.open_store(), &args),
        "path" => {
            println!("{}", config.db_path.display());
            Ok(())
        }
        "version" => {
            println!("wilernotes_core {}", core_version());
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print!("{USAGE}");
            Ok(())
        }
        other => Err(format!("Unknown command: {other}\n\n{USAGE}").into()),
    }
}

fn list(store: &NoteStore, query: &str) -> Result<(), Box<dyn Error>> {
    let rows = list_items(
        store.notes(),
        store.selected_id(),
        query,
        &Local::now(),
        store.locale(),
    );
    if rows.is_empty() {
        println!("No notes. Try `wilernotes new`.");
        return Ok(());
    }
    for row in rows {
        let marker = if row.selected { '*' } else { ' ' };
        println!(
            "{marker} {:<14} {:<24} {:<14} {}",
            row.id, row.title, row.date_label, row.preview
        );
    }
    Ok(())
}

fn show(store: &NoteStore, args: &[String]) -> Result<(), Box<dyn Error>> {
    let id = parse_id(args.first())?;
    let note = store
        .get(id)
        .ok_or_else(|| format!("Note {id} not found"))?;
    let detail = note_detail(note, &Local::now(), store.locale());
    println!(
        "# {} ({})\nFolder: {}\nModified: {} ({})\nCharacters: {}\n\n{}",
        detail.title,
        detail.id,
        detail.folder,
        note.modified_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        detail.date_label,
        detail.char_count,
        detail.content
    );
    Ok(())
}

fn edit(
    store: &mut NoteStore,
    args: &[String],
    field: fn(String) -> NoteField,
) -> Result<(), Box<dyn Error>> {
    let id = parse_id(args.first())?;
    let value = args.get(1..).unwrap_or_default().join(" ");
    let updated = store
        .update(id, field(value))
        .ok_or_else(|| format!("Note {id} not found"))?;
    report_write_failures(store)?;
    println!("Updated note {} ({})", updated.id, updated.title);
    Ok(())
}

fn delete(store: &mut NoteStore, args: &[String]) -> Result<(), Box<dyn Error>> {
    let id = parse_id(args.first())?;
    if store.get(id).is_none() {
        return Err(format!("Note {id} not found").into());
    }
    store.delete(id);
    report_write_failures(store)?;
    println!("Deleted note {id}");
    Ok(())
}

fn parse_id(raw: Option<&String>) -> Result<NoteId, Box<dyn Error>> {
    let raw = raw.ok_or("Provide a note id (see `wilernotes list`)")?;
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("Invalid note id: {raw}"))?;
    Ok(NoteId(value))
}

fn report_write_failures(store: &NoteStore) -> Result<(), Box<dyn Error>> {
    let failed = store.write_counts().writes_failed;
    if failed > 0 {
        return Err(format!("Change kept in memory but {failed} write(s) failed").into());
    }
    Ok(())
}
