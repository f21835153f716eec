//! Perk records.

use crate::effect::PerkEffect;
use crate::record::PerkId;

/// A perk record: an ordered list of entry-point effects.
///
/// Record fields that play no role in re-targeting (display name, rank
/// chains, playability flags) are not modeled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perk {
    pub id: PerkId,
    pub effects: Vec<PerkEffect>,
}

impl Perk {
    /// Create a perk with no effects.
    pub fn new(id: PerkId) -> Self {
        Self {
            id,
            effects: Vec::new(),
        }
    }

    /// Create a perk from its effects.
    pub fn with_effects(id: PerkId, effects: Vec<PerkEffect>) -> Self {
        Self { id, effects }
    }
}
