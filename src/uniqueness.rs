use indexmap::IndexMap;

use crate::record::Record;

/// Positions of every record sharing a key, in the order the keys were first seen.
pub struct DuplicateMap<'a> {
    pub by_key: IndexMap<&'a str, Vec<usize>>,
}

impl<'a> DuplicateMap<'a> {
    pub fn new() -> Self {
        DuplicateMap {
            by_key: IndexMap::new(),
        }
    }

    /// Group records by the key returned by `key`.
    pub fn from_records(records: &'a [Record], key: impl Fn(&'a Record) -> &'a str) -> Self {
        let mut map = Self::new();
        for (pos, rec) in records.iter().enumerate() {
            map.insert(key(rec), pos);
        }
        map
    }

    pub fn insert(&mut self, key: &'a str, pos: usize) {
        self.by_key
            .entry(key)
            .and_modify(|e| e.push(pos))
            .or_insert(vec![pos]);
    }

    /// Iterate over the groups which have more than one member.
    pub fn duplicated(&self) -> impl Iterator<Item = &Vec<usize>> {
        self.by_key.values().filter(|v| v.len() > 1)
    }
}

/// `id_unique`: for every record, the number of *other* records with exactly the same ID.
pub fn check_ids(records: &[Record]) -> Vec<usize> {
    let map = DuplicateMap::from_records(records, |r| r.id.as_str());

    let mut column = vec![0; records.len()];
    for positions in map.duplicated() {
        for &pos in positions {
            column[pos] = positions.len() - 1;
        }
    }
    column
}

/// `seq_unique`: 0 for a unique sequence, otherwise the 1-based number of its duplicate group.
/// Groups are numbered in order of their first appearance in the library.
pub fn check_sequences(records: &[Record]) -> Vec<usize> {
    let map = DuplicateMap::from_records(records, |r| r.seq.as_str());

    let mut column = vec![0; records.len()];
    for (group, positions) in map.duplicated().enumerate() {
        for &pos in positions {
            column[pos] = group + 1;
        }
    }

    let groups = map.duplicated().count();
    if groups > 0 {
        debug!("{groups} duplicated sequence groups");
    }

    column
}
