use itertools::Itertools;
use regex::Regex;
use std::collections::HashMap;

use crate::preset::{get_grammar_regex, IdGrammar};
use crate::validate::ConfigErr;

/// The REF/ALT tag at the end of an identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    Ref,
    /// An `ALT_<n>` tag. `raw` holds the text after `ALT_`, and `number` holds it parsed as an
    /// integer, or `None` if it does not fit.
    Alt { raw: String, number: Option<u32> },
}

impl Tag {
    pub fn is_ref(&self) -> bool {
        matches!(self, Tag::Ref)
    }

    pub fn is_alt(&self) -> bool {
        matches!(self, Tag::Alt { .. })
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Ref => f.write_str("REF"),
            Tag::Alt { raw, .. } => write!(f, "ALT_{raw}"),
        }
    }
}

/// The pieces of an identifier that matched the grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdParts {
    pub free_text: Option<String>,
    pub short_id: String,
    pub tag: Tag,
}

impl IdParts {
    /// The short ID and the tag joined with an underscore. This ignores any free text, so two
    /// records that differ only in their free text share a strict ID.
    pub fn strict_id(&self) -> String {
        format!("{}_{}", self.short_id, self.tag)
    }
}

/// The result of decomposing one identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decomposed {
    Matched(IdParts),
    Unmatched,
}

impl Decomposed {
    pub fn parts(&self) -> Option<&IdParts> {
        match self {
            Decomposed::Matched(parts) => Some(parts),
            Decomposed::Unmatched => None,
        }
    }
}

/// Splits identifiers into their free text, short ID and tag.
pub struct Decomposer {
    re: Regex,
}

impl Decomposer {
    /// Build a decomposer for the given grammar.
    ///
    /// # Errors
    ///
    /// Returns `ConfigErr::UnsupportedMode` for a grammar which has no implementation.
    pub fn new(grammar: &IdGrammar) -> Result<Self, ConfigErr> {
        let Some(pattern) = get_grammar_regex(grammar) else {
            return Err(ConfigErr::UnsupportedMode(*grammar));
        };

        Ok(Decomposer {
            re: Regex::new(pattern)?,
        })
    }

    pub fn decompose(&self, id: &str) -> Decomposed {
        let Some(captures) = self.re.captures(id) else {
            return Decomposed::Unmatched;
        };

        let tag = match captures.name("alt") {
            Some(alt) => Tag::Alt {
                raw: alt.as_str().to_string(),
                number: alt.as_str().parse().ok(),
            },
            None => Tag::Ref,
        };

        Decomposed::Matched(IdParts {
            free_text: captures.name("free").map(|m| m.as_str().to_string()),
            short_id: captures["short"].to_string(),
            tag,
        })
    }
}

/// The reasons an identifier can fail the `id_format` check. These are kept apart so they can
/// be logged, and are collapsed into a single flag for the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdIssues {
    pub grammar: bool,
    pub duplicate_strict_id: bool,
    pub ref_count: bool,
    pub missing_alt: bool,
    pub bad_alt_number: bool,
}

impl IdIssues {
    pub fn any(&self) -> bool {
        self.grammar
            || self.duplicate_strict_id
            || self.ref_count
            || self.missing_alt
            || self.bad_alt_number
    }

    /// Short labels for every issue that is set, for diagnostics.
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.grammar, "grammar"),
            (self.duplicate_strict_id, "duplicate strict id"),
            (self.ref_count, "REF count"),
            (self.missing_alt, "no ALT"),
            (self.bad_alt_number, "bad ALT number"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

impl std::ops::BitOrAssign for IdIssues {
    fn bitor_assign(&mut self, rhs: Self) {
        self.grammar |= rhs.grammar;
        self.duplicate_strict_id |= rhs.duplicate_strict_id;
        self.ref_count |= rhs.ref_count;
        self.missing_alt |= rhs.missing_alt;
        self.bad_alt_number |= rhs.bad_alt_number;
    }
}

/// Flags identifiers which do not match the grammar, and matched identifiers whose strict ID
/// is shared with another record.
pub fn check_grammar(decomposed: &[Decomposed]) -> Vec<IdIssues> {
    let strict_ids: Vec<Option<String>> = decomposed
        .iter()
        .map(|d| d.parts().map(IdParts::strict_id))
        .collect();

    let counts: HashMap<&String, usize> = strict_ids.iter().flatten().counts();

    decomposed
        .iter()
        .zip(strict_ids.iter())
        .map(|(d, strict_id)| IdIssues {
            grammar: *d == Decomposed::Unmatched,
            duplicate_strict_id: strict_id
                .as_ref()
                .is_some_and(|s| counts.get(s).copied().unwrap_or(0) != 1),
            ..IdIssues::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decomposer() -> Decomposer {
        Decomposer::new(&IdGrammar::RefAlt).unwrap()
    }

    fn parts(id: &str) -> IdParts {
        match decomposer().decompose(id) {
            Decomposed::Matched(p) => p,
            Decomposed::Unmatched => panic!("{id} should match"),
        }
    }

    #[test]
    fn with_free_text() {
        let p = parts("sample_S1_REF");
        assert_eq!(p.free_text.as_deref(), Some("sample"));
        assert_eq!(p.short_id, "S1");
        assert_eq!(p.tag, Tag::Ref);
        assert_eq!(p.strict_id(), "S1_REF");
    }

    #[test]
    fn without_free_text() {
        let p = parts("S1_REF");
        assert_eq!(p.free_text, None);
        assert_eq!(p.short_id, "S1");
        assert_eq!(p.tag, Tag::Ref);
    }

    #[test]
    fn free_text_with_underscores() {
        let p = parts("my_long_sample_name_BRCA1x_ALT_12");
        assert_eq!(p.free_text.as_deref(), Some("my_long_sample_name"));
        assert_eq!(p.short_id, "BRCA1x");
        assert_eq!(
            p.tag,
            Tag::Alt {
                raw: "12".to_string(),
                number: Some(12)
            }
        );
        assert_eq!(p.strict_id(), "BRCA1x_ALT_12");
    }

    #[test]
    fn non_integer_alt_does_not_match() {
        assert_eq!(decomposer().decompose("sample_S1_ALT_x"), Decomposed::Unmatched);
    }

    #[test]
    fn missing_tag_does_not_match() {
        let d = decomposer();
        assert_eq!(d.decompose("sample_S1"), Decomposed::Unmatched);
        assert_eq!(d.decompose("S1_ref"), Decomposed::Unmatched);
        assert_eq!(d.decompose("S1_ALT_"), Decomposed::Unmatched);
        assert_eq!(d.decompose("_REF"), Decomposed::Unmatched);
    }

    #[test]
    fn short_id_is_bounded() {
        let d = decomposer();
        let ok = format!("{}_REF", "A".repeat(20));
        let too_long = format!("{}_REF", "A".repeat(21));
        assert!(d.decompose(&ok).parts().is_some());
        assert_eq!(d.decompose(&too_long), Decomposed::Unmatched);
        // the excess can always be read as free text when separated by an underscore
        assert!(d.decompose(&format!("x_{}", ok)).parts().is_some());
    }

    #[test]
    fn overflowing_alt_number_is_kept_unparsed() {
        let p = parts("S1_ALT_99999999999999999999");
        assert_eq!(
            p.tag,
            Tag::Alt {
                raw: "99999999999999999999".to_string(),
                number: None
            }
        );
    }

    #[test]
    fn synthetic_is_unsupported() {
        assert!(matches!(
            Decomposer::new(&IdGrammar::Synthetic),
            Err(ConfigErr::UnsupportedMode(IdGrammar::Synthetic))
        ));
    }

    #[test]
    fn grammar_and_strict_id_checks() {
        let d = decomposer();
        let ids = ["a_S1_REF", "b_S1_REF", "S1_ALT_1", "bad id", "S2_REF"];
        let decomposed: Vec<_> = ids.iter().map(|id| d.decompose(id)).collect();
        let issues = check_grammar(&decomposed);

        assert!(issues[0].duplicate_strict_id && !issues[0].grammar);
        assert!(issues[1].duplicate_strict_id);
        assert!(!issues[2].any());
        assert!(issues[3].grammar && !issues[3].duplicate_strict_id);
        assert!(!issues[4].any());
    }

    #[test]
    fn unmatched_identifiers_are_not_grouped_together() {
        let d = decomposer();
        let decomposed: Vec<_> = ["nope", "nope"].iter().map(|id| d.decompose(id)).collect();
        let issues = check_grammar(&decomposed);
        assert!(issues.iter().all(|i| i.grammar && !i.duplicate_strict_id));
    }

    #[test]
    fn issue_labels() {
        let issues = IdIssues {
            ref_count: true,
            bad_alt_number: true,
            ..IdIssues::default()
        };
        assert_eq!(issues.labels(), vec!["REF count", "bad ALT number"]);
    }
}
