//! In-memory roster: canonical name to record, in first-seen order.

use indexmap::IndexMap;

use crate::data::character::{CharacterName, CharacterRecord, StatDimension};

#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: IndexMap<CharacterName, CharacterRecord>,
}

/// What happened to a record on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Added,
    /// The key already existed; the new record replaced it in its original position.
    Merged,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: CharacterRecord) -> InsertOutcome {
        match self.records.insert(record.name.clone(), record) {
            Some(_) => InsertOutcome::Merged,
            None => InsertOutcome::Added,
        }
    }

    pub fn get(&self, name: &CharacterName) -> Option<&CharacterRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &CharacterName) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.records.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &CharacterName> {
        self.records.keys()
    }

    /// Records whose stat in `dimension` equals `tier`, in roster order.
    pub fn with_tier(&self, dimension: StatDimension, tier: u8) -> Vec<&CharacterRecord> {
        self.iter()
            .filter(|record| record.stats.get(dimension) == tier)
            .collect()
    }
}

impl FromIterator<CharacterRecord> for Roster {
    fn from_iter<I: IntoIterator<Item = CharacterRecord>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for record in iter {
            roster.insert(record);
        }
        roster
    }
}
