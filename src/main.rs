//! qif2csv CLI
//!
//! Converts a QIF file, or every QIF file below a directory, into one CSV
//! stream.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- statements/ -o transactions.csv
//! cargo run -- checking.qif > checking.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` to list parsed files, `debug` for details

use clap::Parser;
use log::info;
use qif2csv::{ConvertError, Converter, CsvSink, FailurePolicy, Result, DEFAULT_EXTENSION};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "qif2csv", version, about = "Convert QIF transactions to CSV")]
struct Cli {
    /// QIF file, or directory searched recursively
    input: PathBuf,

    /// CSV destination (default: standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extension matched in directory mode
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Skip sources that fail to parse instead of stopping
    #[arg(long)]
    continue_on_error: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when sources were skipped under `--continue-on-error`.
fn run(cli: &Cli) -> Result<bool> {
    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| ConvertError::Output {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let policy = if cli.continue_on_error {
        FailurePolicy::Skip
    } else {
        FailurePolicy::Stop
    };

    let mut sink = CsvSink::new(writer)?;
    let mut converter = Converter::new(policy);
    let result = converter.convert_path(&cli.input, &cli.extension, &mut sink);

    // rows already written stay valid even when a source failed
    sink.flush()?;
    info!("Wrote {} rows", sink.rows());
    let batch = result?;

    for failure in &batch.failures {
        eprintln!("Error: {}", failure.error);
    }
    if !batch.is_clean() {
        eprintln!(
            "Skipped {} of {} sources",
            batch.failures.len(),
            batch.failures.len() + batch.sources
        );
    }

    Ok(batch.is_clean())
}

