use itertools::izip;
use thiserror::Error;

use crate::identifier::{check_grammar, Decomposer, IdIssues, IdParts};
use crate::preset::IdGrammar;
use crate::record::{Record, Row};
use crate::report::Summary;
use crate::sequence::{check_alphabet, check_length, check_reverse_complement, LengthBounds};
use crate::{refalt, uniqueness};

/// Everything a validation run is configured with.
#[derive(Copy, Clone, Debug)]
pub struct ValidationOpts {
    pub bounds: LengthBounds,
    pub grammar: IdGrammar,
}

impl ValidationOpts {
    /// Check user supplied options, producing `ValidationOpts` for a run.
    ///
    /// # Errors
    ///
    /// Returns an error if no maximum length is given, if the maximum length or the length
    /// window is zero, or if the identifier grammar has no implementation.
    pub fn new(
        max_length: Option<usize>,
        window: usize,
        grammar: IdGrammar,
    ) -> Result<Self, ConfigErr> {
        let max = max_length.ok_or(ConfigErr::MissingMaxLength)?;
        if max == 0 {
            return Err(ConfigErr::ZeroMaxLength);
        }
        if window == 0 {
            return Err(ConfigErr::ZeroLengthWindow);
        }
        if grammar != IdGrammar::RefAlt {
            return Err(ConfigErr::UnsupportedMode(grammar));
        }

        Ok(ValidationOpts {
            bounds: LengthBounds { max, window },
            grammar,
        })
    }
}

/// The annotated table for one library, with its summary.
#[derive(Debug, PartialEq)]
pub struct Report {
    pub rows: Vec<Row>,
    pub summary: Summary,
}

impl Report {
    /// True if every annotation of every row passed.
    pub fn passed(&self) -> bool {
        !self.rows.iter().any(Row::has_failure)
    }
}

/// Runs every check over the library and collects the results into a `Report`.
///
/// Each check is independent and only reads the records, so the result depends only on the
/// records and the options. Rows are returned in the same order as `records`.
pub fn validate(records: &[Record], opts: &ValidationOpts) -> Result<Report, ConfigErr> {
    let decomposer = Decomposer::new(&opts.grammar)?;
    let decomposed: Vec<_> = records.iter().map(|r| decomposer.decompose(&r.id)).collect();

    let id_unique = uniqueness::check_ids(records);
    let seq_unique = uniqueness::check_sequences(records);
    let revcomp = check_reverse_complement(records);
    let length = check_length(records, &opts.bounds);
    let standard = check_alphabet(records);

    let mut id_issues = check_grammar(&decomposed);
    for (issue, group_issue) in id_issues
        .iter_mut()
        .zip(refalt::check_consistency(&decomposed))
    {
        *issue |= group_issue;
    }

    let rows: Vec<Row> = izip!(
        records,
        &decomposed,
        id_unique,
        revcomp,
        seq_unique,
        length,
        standard,
        &id_issues
    )
    .map(
        |(rec, decomposed, id_unique, revcomp, seq_unique, length, standard, issues)| {
            let parts = decomposed.parts();
            if let Some(message) = describe_issues(rec, parts, issues) {
                debug!("{message}");
            }
            Row {
                id: rec.id.clone(),
                short_id: parts.map(|p| p.short_id.clone()),
                tag: parts.map(|p| p.tag.to_string()),
                strict_id: parts.map(|p| p.strict_id()),
                id_unique,
                seq_revcompl_unique: revcomp,
                seq_unique,
                seq_length: length,
                seq_standard: standard,
                id_format: u8::from(issues.any()),
            }
        },
    )
    .collect();

    let summary = Summary::from_rows(&rows);
    Ok(Report { rows, summary })
}

/// A diagnostic line for a failing identifier, naming each reason it failed.
fn describe_issues(rec: &Record, parts: Option<&IdParts>, issues: &IdIssues) -> Option<String> {
    if !issues.any() {
        return None;
    }

    let reasons = issues.labels().join(", ");
    Some(match parts {
        Some(p) => format!(
            "{}: identifier {} (free text {:?}) fails ({reasons})",
            rec.id,
            p.strict_id(),
            p.free_text.as_deref().unwrap_or_default()
        ),
        None => format!("{}: identifier fails ({reasons})", rec.id),
    })
}

#[derive(Error, Debug)]
pub enum ConfigErr {
    #[error("no maximum sequence length given: pass --max-length")]
    MissingMaxLength,

    #[error("the maximum sequence length must be a positive integer")]
    ZeroMaxLength,

    #[error("the length window must be a positive integer")]
    ZeroLengthWindow,

    #[error(
        "identifier mode `{0}` is not supported
suggestion: use `--mode ref-alt`"
    )]
    UnsupportedMode(IdGrammar),

    #[error("could not compile the identifier grammar")]
    Grammar(#[from] regex::Error),
}
