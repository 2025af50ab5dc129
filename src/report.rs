use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use itertools::Itertools;
use serde::Serialize;

use crate::record::Row;
use crate::validate::ValidationOpts;

/// Counts of failing records for each check.
#[derive(Serialize, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub duplicate_ids: usize,
    pub duplicate_sequences: usize,
    pub revcomp_duplicates: usize,
    pub bad_length: usize,
    pub non_standard: usize,
    pub bad_id_format: usize,
}

impl Summary {
    pub fn from_rows(rows: &[Row]) -> Self {
        let count = |f: fn(&Row) -> bool| rows.iter().filter(|r| f(r)).count();

        Summary {
            total: rows.len(),
            duplicate_ids: count(|r| r.id_unique > 0),
            duplicate_sequences: count(|r| r.seq_unique > 0),
            revcomp_duplicates: count(|r| r.seq_revcompl_unique == Some(true)),
            bad_length: count(|r| r.seq_length != 0),
            non_standard: count(|r| r.seq_standard != 0),
            bad_id_format: count(|r| r.id_format != 0),
        }
    }

    /// The summary as `label: count` lines.
    pub fn to_text(&self) -> String {
        [
            ("Total sequences", self.total),
            ("Duplicate IDs", self.duplicate_ids),
            ("Duplicate sequences", self.duplicate_sequences),
            ("Reverse complement duplicates", self.revcomp_duplicates),
            ("Sequences out of length range", self.bad_length),
            ("Sequences with non-standard bases", self.non_standard),
            ("Malformed IDs", self.bad_id_format),
        ]
        .iter()
        .map(|(label, count)| format!("{label}: {count}"))
        .join("\n")
    }
}

/// Writes the annotated rows as a tab separated table with a header line.
pub fn write_table(writer: impl Write, rows: &[Row]) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Appends a header describing the run, followed by the summary, to a log file. Any missing
/// parent directories of `path` are created.
pub fn write_log(
    path: &Path,
    files: &[String],
    opts: &ValidationOpts,
    summary: &Summary,
    passed: bool,
) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Unable to create log directory {}", dir.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Unable to open log file {}", path.display()))?;

    writeln!(
        file,
        "# probelint v{} run at {}",
        crate::cli::VERSION,
        chrono::offset::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(file, "# input: {}", files.iter().join(", "))?;
    writeln!(
        file,
        "# max length: {}, length window: {}, mode: {}",
        opts.bounds.max, opts.bounds.window, opts.grammar
    )?;
    writeln!(file, "{}", summary.to_text())?;
    writeln!(file, "Result: {}", if passed { "PASS" } else { "FAIL" })?;

    Ok(())
}
