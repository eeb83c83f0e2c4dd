//! Gridpad - spreadsheet grid editor, command mode

mod cli;
mod commands;

use anyhow::{Context, Result};
use gridpad_core::storage::{CSV_FILE_NAME, CSV_MIME_TYPE};
use gridpad_core::{FileStore, GridConfig, KeyValueStore, MemoryStore, Session};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn run_session<S: KeyValueStore>(mut session: Session<S>, args: &cli::Args) -> Result<()> {
    let result = apply_args(&mut session, args);
    // Edits made before a failing command are still saved.
    session.flush();
    result
}

fn apply_args<S: KeyValueStore>(session: &mut Session<S>, args: &cli::Args) -> Result<()> {
    if let Some(path) = &args.import {
        session
            .edit(|doc| doc.import_csv_file(path))
            .with_context(|| format!("Failed to import {}", path.display()))?;
    }

    if let Some(script) = &args.command {
        for command in commands::parse_script(script)? {
            session
                .edit(|doc| commands::apply(doc, &command))
                .with_context(|| format!("Command failed: {:?}", command))?;
        }
    }

    if let Some(output) = &args.output {
        let path: PathBuf = if output.is_dir() {
            output.join(CSV_FILE_NAME)
        } else {
            output.clone()
        };
        session
            .document()
            .export_csv(&path)
            .with_context(|| format!("Failed to export {}", path.display()))?;
        log::info!("wrote {} as {}", path.display(), CSV_MIME_TYPE);
        println!("Exported to {}", path.display());
    }

    if args.print {
        print!("{}", session.document().to_csv());
    }

    Ok(())
}

fn run(args: cli::Args) -> Result<()> {
    let (config, warnings) = GridConfig::load(args.config.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    if args.memory {
        return run_session(Session::open(&config, MemoryStore::new()), &args);
    }
    let dir = args
        .store
        .clone()
        .or_else(|| config.storage_dir())
        .context("No storage directory available; pass --store <DIR> or --memory")?;
    run_session(Session::open(&config, FileStore::new(dir)), &args)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = match cli::parse(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            cli::print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_usage();
            std::process::exit(1);
        }
    };

    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
