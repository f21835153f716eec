//! In-memory PerkStore implementation for tests and local runs.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use perk_core::{Perk, PerkId};

use super::{PerkStore, StoreError};

/// In-memory implementation of [`PerkStore`].
///
/// Source and override sets live in `BTreeMap`s so enumeration order is
/// deterministic across runs.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPerkStore {
    sources: BTreeMap<PerkId, Perk>,
    overrides: BTreeMap<PerkId, Perk>,
}

impl InMemoryPerkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from source records.
    pub fn with_sources(perks: impl IntoIterator<Item = Perk>) -> Self {
        Self {
            sources: perks.into_iter().map(|perk| (perk.id, perk)).collect(),
            overrides: BTreeMap::new(),
        }
    }

    /// Number of overrides materialized so far.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Consume the store, yielding the overrides produced by the run.
    pub fn into_overrides(self) -> Vec<Perk> {
        self.overrides.into_values().collect()
    }
}

impl PerkStore for InMemoryPerkStore {
    fn winning_ids(&self) -> Vec<PerkId> {
        self.sources.keys().copied().collect()
    }

    fn winning(&self, id: PerkId) -> Option<&Perk> {
        self.overrides.get(&id).or_else(|| self.sources.get(&id))
    }

    fn get_or_add_override(&mut self, id: PerkId) -> Result<&mut Perk, StoreError> {
        match self.overrides.entry(id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let source = self
                    .sources
                    .get(&id)
                    .cloned()
                    .ok_or(StoreError::MissingRecord(id))?;
                Ok(entry.insert(source))
            }
        }
    }
}
