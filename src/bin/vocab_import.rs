//! Imports vocabulary tags from the remote word list into the ledger CSV.
//!
//! Usage: `vocab-import <tag>...`. Without arguments a single tag is read from
//! stdin. Tags are imported in order. The first tag that is already in the
//! ledger is reported and the run stops there with a success status, leaving
//! later tags unimported. Any network or file error ends the process with
//! status 1.

use arabic_flashcards::ImportError;
use arabic_flashcards::import::{HttpWordSource, ImportConfig, Importer};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn read_tag_from_stdin() -> io::Result<String> {
    print!("Tag to import: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn wait_for_enter() {
    print!("Press Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut tags: Vec<String> = std::env::args().skip(1).collect();
    if tags.is_empty() {
        match read_tag_from_stdin() {
            Ok(tag) if !tag.trim().is_empty() => tags.push(tag),
            Ok(_) => {
                error!("No tag given");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                error!("Could not read tag: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let config = ImportConfig::default();
    let source = match HttpWordSource::new(
        &config.base_url,
        config.start_index,
        config.page_size,
    ) {
        Ok(source) => source,
        Err(e) => {
            error!("Could not create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let importer = Importer::new(source, config);

    for tag in &tags {
        match importer.run(tag) {
            Ok(report) => info!("{}", report),
            Err(ImportError::DuplicateTag(tag)) => {
                println!("Tag '{}' already added to the ledger.", tag);
                wait_for_enter();
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                error!("Import of '{}' failed: {}", tag.trim(), e);
                return ExitCode::from(e.exit_code() as u8);
            }
        }
    }

    ExitCode::SUCCESS
}
