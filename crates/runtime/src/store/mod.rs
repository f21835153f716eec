//! Record store seam.
//!
//! The patcher never owns perk records; the embedding host does. `PerkStore`
//! models the three operations a pass needs: enumerate winning records, read
//! the authoritative version of one record, and materialize a copy-on-write
//! override. The in-memory implementation backs tests and local runs.

mod memory;

pub use memory::InMemoryPerkStore;

use perk_core::{Perk, PerkId};

/// Storage abstraction over winning perk records and their overrides.
pub trait PerkStore {
    /// Every known perk id, in a deterministic order.
    fn winning_ids(&self) -> Vec<PerkId>;

    /// The authoritative version of a perk: the override if one was
    /// materialized this run, the source record otherwise. Doubles as
    /// reference resolution for well-known perk ids.
    fn winning(&self, id: PerkId) -> Option<&Perk>;

    /// Materialize (or fetch) the mutable override copy of a perk.
    ///
    /// Idempotent within a run: the first call copies the winning version,
    /// every later call returns the same instance.
    fn get_or_add_override(&mut self, id: PerkId) -> Result<&mut Perk, StoreError>;
}

/// Errors raised by a record store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The referenced perk does not exist in the source set.
    #[error("perk {0} not found in the record store")]
    MissingRecord(PerkId),
}
