use std::fs::File;
use std::path::Path;

use anyhow::Result;
use bio::io::fasta;
use thiserror::Error;

use crate::record::Record;

/// File extensions accepted for input libraries.
pub const FASTA_EXTENSIONS: [&str; 2] = ["fa", "fasta"];

/// Check every input path before any of them is read, so that a bad path late in the list
/// still fails the run before any parsing happens.
pub fn check_paths(files: &[String]) -> Result<(), LoadErr> {
    for file in files {
        let path = Path::new(file);
        if !path.is_file() {
            return Err(LoadErr::MissingFile { path: file.clone() });
        }

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if !FASTA_EXTENSIONS.contains(&extension) {
            return Err(LoadErr::BadExtension { path: file.clone() });
        }
    }
    Ok(())
}

/// Reads every record of one FASTA file, in file order.
pub fn read_records(file: &str) -> Result<Vec<Record>, LoadErr> {
    let handle = File::open(file).map_err(|source| LoadErr::Parse {
        path: file.to_string(),
        source,
    })?;

    fasta::Reader::new(handle)
        .records()
        .map(|rec| {
            let rec = rec.map_err(|source| LoadErr::Parse {
                path: file.to_string(),
                source,
            })?;

            // the reader only yields records built from valid UTF-8 lines
            let seq = String::from_utf8_lossy(rec.seq()).into_owned();

            Ok(Record::new(rec.id(), seq))
        })
        .collect()
}

/// Loads a library from one or more FASTA files. Records are concatenated in the order the
/// files are given.
///
/// # Errors
///
/// Returns an error if any file is missing, does not have a `.fa` or `.fasta` extension, or
/// cannot be parsed.
pub fn load_library(files: &[String]) -> Result<Vec<Record>> {
    check_paths(files)?;

    let mut records = Vec::new();
    for file in files {
        let file_records = read_records(file)?;
        info!("Read {} sequences from {file}", file_records.len());
        records.extend(file_records);
    }

    Ok(records)
}

#[derive(Error, Debug)]
pub enum LoadErr {
    #[error("input file {path} does not exist")]
    MissingFile { path: String },

    #[error(
        "input file {path} is not a FASTA file
suggestion: library files must end in .fa or .fasta"
    )]
    BadExtension { path: String },

    #[error("could not parse FASTA file {path}")]
    Parse {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
