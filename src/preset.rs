/// Enum representing the identifier grammars a library can be checked against.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdGrammar {
    /// `[FREETEXT_]SHORTID_REF` or `[FREETEXT_]SHORTID_ALT_<n>`, with one REF and at least one
    /// ALT for every short ID
    RefAlt,

    /// `[FREETEXT_]SHORTID` for synthetic libraries. Not currently supported.
    Synthetic,
}

impl std::fmt::Display for IdGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdGrammar::RefAlt => f.write_str("ref-alt"),
            IdGrammar::Synthetic => f.write_str("synthetic"),
        }
    }
}

/// Returns the regular expression for an identifier grammar, or `None` if the grammar has no
/// implementation.
///
/// The REF/ALT expression has the named groups `free` (optional), `short`, `tag` and `alt`
/// (the digits of an ALT tag).
pub fn get_grammar_regex(grammar: &IdGrammar) -> Option<&'static str> {
    match grammar {
        IdGrammar::RefAlt => Some(
            r"^(?:(?P<free>.*)_)?(?P<short>[A-Za-z0-9]{1,20})_(?P<tag>REF|ALT_(?P<alt>[0-9]+))$",
        ),
        IdGrammar::Synthetic => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn ref_alt_regex_compiles() {
        let re = get_grammar_regex(&IdGrammar::RefAlt).unwrap();
        assert!(Regex::new(re).is_ok());
    }

    #[test]
    fn synthetic_has_no_grammar() {
        assert_eq!(get_grammar_regex(&IdGrammar::Synthetic), None);
    }
}
