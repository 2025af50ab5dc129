use indexmap::IndexMap;

use crate::identifier::{Decomposed, IdIssues, Tag};

/// Checks every REF/ALT group for consistency. A group is all the matched identifiers which
/// share a short ID. Identifiers which did not match the grammar take no part in grouping.
///
/// * A group with zero or several REF members fails every member.
/// * A group with no ALT member fails every member.
/// * An ALT member whose number does not parse as an integer fails on its own.
///
/// ALT numbers are not required to be unique or consecutive within a group.
pub fn check_consistency(decomposed: &[Decomposed]) -> Vec<IdIssues> {
    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (pos, parts) in decomposed
        .iter()
        .enumerate()
        .filter_map(|(pos, d)| d.parts().map(|p| (pos, p)))
    {
        groups.entry(parts.short_id.as_str()).or_default().push(pos);
    }

    let mut issues = vec![IdIssues::default(); decomposed.len()];

    for (short_id, members) in &groups {
        let tags: Vec<&Tag> = members
            .iter()
            .filter_map(|&pos| decomposed[pos].parts())
            .map(|p| &p.tag)
            .collect();

        let refs = tags.iter().filter(|t| t.is_ref()).count();
        let alts = tags.iter().filter(|t| t.is_alt()).count();

        if refs != 1 {
            debug!("group {short_id} has {refs} REF sequences");
        }
        if alts == 0 {
            debug!("group {short_id} has no ALT sequences");
        }

        for (&pos, tag) in members.iter().zip(tags) {
            let issue = &mut issues[pos];
            issue.ref_count = refs != 1;
            issue.missing_alt = alts == 0;
            issue.bad_alt_number = matches!(tag, Tag::Alt { number: None, .. });
        }
    }

    issues
}
