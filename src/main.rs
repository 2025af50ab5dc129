extern crate env_logger;
#[macro_use]
extern crate log;
use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter},
    path::Path,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod fasta;
mod identifier;
mod preset;
mod record;
mod refalt;
mod report;
mod sequence;
mod uniqueness;
mod validate;

use cli::Cli;
use validate::ValidationOpts;

/// Exit status when every check passed.
const EXIT_PASS: u8 = 0;
/// Exit status when the library was read, but some checks failed.
const EXIT_INVALID: u8 = 1;
/// Exit status when the run could not complete.
const EXIT_ERROR: u8 = 2;

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))
                .with_context(|| format!("Unable to create output file {x}"))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

/// Runs one validation, returning whether the library passed every check.
fn try_main() -> Result<bool> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("probelint v{}", cli::VERSION);

    // every fatal condition is checked before any output is produced
    let opts = ValidationOpts::new(cli.max_length, cli.length_window, cli.mode)?;
    let records = fasta::load_library(&cli.files)?;
    info!("Validating {} sequences", records.len());

    let report = validate::validate(&records, &opts)?;
    let passed = report.passed();

    if let Some(ref output) = cli.output {
        let writer = get_writer(&cli.output)?;
        report::write_table(writer, &report.rows)?;
        info!("Wrote sequence table to {output}");
    }

    if let Some(ref log) = cli.log {
        report::write_log(Path::new(log), &cli.files, &opts, &report.summary, passed)?;
        info!("Appended summary to {log}");
    }

    if !cli.quiet {
        let mut writer = get_writer(&None)?;
        if cli.json {
            writeln!(writer, "{}", serde_json::to_string_pretty(&report.summary)?)?;
        } else {
            writeln!(writer, "{}", report.summary.to_text())?;
        }
        writer.flush()?;
    }

    if passed {
        info!("All checks passed.");
    } else {
        warn!("Some checks failed.");
    }

    Ok(passed)
}

fn main() -> ExitCode {
    match try_main() {
        Ok(true) => ExitCode::from(EXIT_PASS),
        Ok(false) => ExitCode::from(EXIT_INVALID),
        Err(err) => {
            error!("{}", err);

            // report any errors that are produced
            err.chain()
                .skip(1)
                .for_each(|cause| error!("  because: {}", cause));

            ExitCode::from(EXIT_ERROR)
        }
    }
}
