//! Read-only inspection entry point.
//!
//! # Responsibility
//! - Print the linked `lexikon_core` version.
//! - Optionally load a snapshot database and print per-kind record counts.
//!
//! Never creates a database file and never writes beyond schema migration
//! on open.

use clap::Parser;
use lexikon_core::{
    core_version, default_log_level, init_logging, load_database, open_existing_db, EntityKind,
    SqliteSnapshotRepository, StoreOptions,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "lexikon", version, about = "Inspect a lexikon snapshot database")]
struct Args {
    /// Snapshot database to inspect.
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("lexikon_core version={}", core_version());
    let Some(path) = args.db else {
        return ExitCode::SUCCESS;
    };

    match print_counts(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_inspect module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_counts(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_existing_db(path)?;
    let repo = SqliteSnapshotRepository::try_new(&mut conn)?;
    let Some(db) = load_database(&repo, StoreOptions::default())? else {
        println!("snapshot=none");
        return Ok(());
    };

    for kind in EntityKind::ALL {
        println!("{kind}={}", db.len(kind));
    }
    Ok(())
}
