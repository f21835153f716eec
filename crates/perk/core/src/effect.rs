//! Perk entry-point effects.

use crate::condition::ConditionGroup;
use crate::record::Attribute;

/// Entry point an effect hooks into the game's formulas.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntryPoint {
    /// Base weapon damage computation.
    CalculateWeaponDamage,
    /// Flat attack damage adjustment.
    ModAttackDamage,
    ModPowerAttackDamage,
    ModTargetDamageResistance,
    ModActivateCost,
    CalculateMyCriticalHitDamage,
}

impl EntryPoint {
    /// Whether this entry point feeds the weapon damage computation.
    pub fn modifies_damage(self) -> bool {
        matches!(self, Self::CalculateWeaponDamage | Self::ModAttackDamage)
    }
}

/// How a constant-value effect combines with the damage amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueOp {
    Set,
    Add,
    Multiply,
}

/// How an attribute-scaled effect combines with the damage amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeOp {
    Set,
    /// Add `attribute * value`.
    AddScaled,
    /// Multiply by `attribute * value`.
    MultiplyScaled,
    /// Multiply by `1 + attribute * value`.
    MultiplyOnePlusScaled,
}

/// Payload of a perk effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Combine a constant with the damage amount.
    Value { op: ValueOp, value: f32 },
    /// Combine a runtime-attribute-scaled coefficient with the damage amount.
    AttributeScaled {
        op: AttributeOp,
        attribute: Attribute,
        value: f32,
    },
}

/// One entry-point effect of a perk.
///
/// Effects are plain values; cloning one before mutation is how every
/// rewrite in this crate starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerkEffect {
    pub entry_point: EntryPoint,
    pub priority: u8,
    pub rank: u8,
    pub condition_groups: Vec<ConditionGroup>,
    pub kind: EffectKind,
}

impl PerkEffect {
    /// Create an unconditioned effect with priority and rank zero.
    pub fn new(entry_point: EntryPoint, kind: EffectKind) -> Self {
        Self {
            entry_point,
            priority: 0,
            rank: 0,
            condition_groups: Vec::new(),
            kind,
        }
    }

    /// Set the application priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Attach condition groups.
    pub fn with_conditions(mut self, groups: Vec<ConditionGroup>) -> Self {
        self.condition_groups = groups;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_two_damage_entry_points_qualify() {
        assert!(EntryPoint::CalculateWeaponDamage.modifies_damage());
        assert!(EntryPoint::ModAttackDamage.modifies_damage());
        assert!(!EntryPoint::ModPowerAttackDamage.modifies_damage());
        assert!(!EntryPoint::ModActivateCost.modifies_damage());
    }
}
