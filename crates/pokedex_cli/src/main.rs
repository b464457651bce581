//! Pokedex tour entry point.
//!
//! # Responsibility
//! - Parse the command line (an optional config path, plus `--help`/`--version`).
//! - Start logging, then run the tour with output on stdout.
//! - Turn any failure into a diagnostic on stderr and a non-zero exit code.

use clap::Parser;
use log::info;
use pokedex_core::{
    init_logging, load_config, PokedexConfig, ThreadRngSource, TourService, WriterSink,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "pokedex")]
#[command(version, about = "Guided tour over a JSON Pokedex document", long_about = None)]
struct Cli {
    /// JSON config file; built-in defaults apply when omitted
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pokedex: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match cli.config {
        Some(path) => load_config(path)?,
        None => PokedexConfig::default(),
    };
    init_logging(&config.log.level, config.log.dir.as_deref())?;

    let source = config.record_source();
    let mut tour = TourService::new(WriterSink::stdout(), ThreadRngSource, config.tour);
    let summary = tour.run_from(&source)?;

    info!(
        "event=cli_exit module=cli status=ok initial={} final={} version={}",
        summary.initial_count,
        summary.final_count,
        pokedex_core::core_version()
    );
    Ok(())
}
