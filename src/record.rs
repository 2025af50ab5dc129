use serde::Serialize;

/// A single sequence entry from one of the input FASTA files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// The identifier as given in the FASTA header, up to the first whitespace
    pub id: String,
    /// The nucleotide sequence, case preserved as read
    pub seq: String,
}

impl Record {
    pub fn new(id: impl Into<String>, seq: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            seq: seq.into(),
        }
    }
}

/// One row of the annotated table. Every annotation column follows the convention that zero
/// (or `false`) is a pass and anything else is a failure.
///
/// The field order here is the column order of the detailed `.tsv` output. The sequence itself
/// is not written, to keep the table compact.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    #[serde(rename = "shortId")]
    pub short_id: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "strictId")]
    pub strict_id: Option<String>,
    pub id_unique: usize,
    /// `None` if the reverse complement could not be computed for this sequence
    pub seq_revcompl_unique: Option<bool>,
    pub seq_unique: usize,
    pub seq_length: u8,
    pub seq_standard: u8,
    pub id_format: u8,
}

impl Row {
    /// Whether any annotation column of this row holds a failing value.
    pub fn has_failure(&self) -> bool {
        self.id_unique > 0
            || self.seq_revcompl_unique == Some(true)
            || self.seq_unique > 0
            || self.seq_length != 0
            || self.seq_standard != 0
            || self.id_format != 0
    }
}
