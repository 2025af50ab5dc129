use std::collections::HashSet;
use std::sync::OnceLock;

use bio::alphabets::{dna, Alphabet};

use crate::record::Record;

/// The accepted length range for library sequences, `(max - window, max]`.
#[derive(Copy, Clone, Debug)]
pub struct LengthBounds {
    pub max: usize,
    pub window: usize,
}

impl LengthBounds {
    /// The exclusive lower bound. This may be zero or negative, which leaves no lower bound.
    pub fn min(&self) -> i64 {
        self.max as i64 - self.window as i64
    }

    pub fn contains(&self, len: usize) -> bool {
        (len as i64) > self.min() && len <= self.max
    }
}

/// The standard DNA alphabet, in either case.
fn standard_alphabet() -> &'static Alphabet {
    static STANDARD: OnceLock<Alphabet> = OnceLock::new();
    STANDARD.get_or_init(|| Alphabet::new(b"ACGTacgt"))
}

/// Returns true if the sequence only contains `A`, `C`, `G` and `T`, in either case.
/// The empty sequence is standard.
pub fn is_standard(seq: &str) -> bool {
    standard_alphabet().is_word(seq.as_bytes())
}

/// Computes the reverse complement of a sequence, keeping the case of each base.
///
/// Returns `None` if the sequence contains anything other than `ACGTacgt`.
pub fn reverse_complement(seq: &str) -> Option<String> {
    is_standard(seq)
        .then(|| dna::revcomp(seq.as_bytes()))
        .and_then(|rc| String::from_utf8(rc).ok())
}

/// `seq_length`: 0 if the sequence length is within `bounds`, otherwise 1. Length is counted in
/// characters, so a stray multi-byte character counts as one position.
pub fn check_length(records: &[Record], bounds: &LengthBounds) -> Vec<u8> {
    records
        .iter()
        .map(|r| u8::from(!bounds.contains(r.seq.chars().count())))
        .collect()
}

/// `seq_standard`: 0 if the sequence contains only standard bases, otherwise 1.
pub fn check_alphabet(records: &[Record]) -> Vec<u8> {
    records
        .iter()
        .map(|r| u8::from(!is_standard(&r.seq)))
        .collect()
}

/// `seq_revcompl_unique`: whether the reverse complement of each sequence appears anywhere in
/// the library, including as the sequence itself.
///
/// Sequences which cannot be complemented are reported as `None` and the rest of the library is
/// still evaluated. Those sequences are already flagged by [`check_alphabet`].
pub fn check_reverse_complement(records: &[Record]) -> Vec<Option<bool>> {
    let library: HashSet<&str> = records.iter().map(|r| r.seq.as_str()).collect();

    records
        .iter()
        .map(|r| match reverse_complement(&r.seq) {
            Some(rc) => Some(library.contains(rc.as_str())),
            None => {
                warn!(
                    "Cannot compute the reverse complement of {}: non-standard bases",
                    r.id
                );
                None
            }
        })
        .collect()
}
