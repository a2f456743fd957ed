//! Meme CLI - option front end
//!
//! Resolves and validates the command line, then writes the hand-off
//! record (JSON) to stdout for the image loader, compositor and uploader.
//! Exit status: 0 on success, 1 on validation failure, 2 on bad flags.

use colored::Colorize;
use env_logger::Env;
use log::debug;
use std::process::ExitCode;

use meme_core::{parse_options, print_usage, TemplateCatalog};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // Catalog is built once, before any argument is looked at
    let catalog = TemplateCatalog::builtin();

    let options = match parse_options(std::env::args_os()) {
        Ok(o) => o,
        Err(e) => e.exit(),
    };

    if options.help {
        if let Err(e) = print_usage(&catalog) {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    if let Err(e) = options.valid() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        return ExitCode::FAILURE;
    }

    let destination = options.destination();
    debug!("options valid, handing off to {:?}", destination);

    let handoff = serde_json::json!({
        "options": &options,
        "destination": &destination,
    });

    match serde_json::to_string_pretty(&handoff) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
