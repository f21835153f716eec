//! Condition trees gating perk entry-point effects.
//!
//! Damage entry points carry up to three condition tabs (owner, weapon,
//! target), each holding an ordered predicate list. Within a list,
//! consecutive OR-flagged conditions form a block; blocks combine with AND.
//! The submodules prove static truth over those lists and rewrite them while
//! re-targeting effects.

mod rewrite;
mod tautology;

pub use rewrite::{
    add_attribute_range_gate, add_complement_selector, add_owner_only, strip_class_selector,
};
pub use tautology::{affects_class_universally, is_tautology_for_class};

use bitflags::bitflags;

use crate::record::{Attribute, KeywordId};

/// Comparison operator of a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    Equal,
    NotEqual,
    GreaterOrEqual,
    LessThan,
}

bitflags! {
    /// Combination flags of a condition.
    ///
    /// `OR` chains the condition with the one that follows it instead of
    /// starting a new AND block.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ConditionFlags: u8 {
        const OR = 1 << 0;
    }
}

/// Which entity a condition function runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOn {
    Subject,
    Target,
}

/// Queryable game fact referenced by a condition.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionFunction {
    /// Whether the subject record carries a keyword.
    HasKeyword(KeywordId),
    /// Current value of a runtime actor attribute.
    AttributeValue(Attribute),
}

/// An atomic predicate gating an entry-point effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub op: CompareOp,
    pub comparison_value: f32,
    pub function: ConditionFunction,
    pub run_on: RunOn,
    pub flags: ConditionFlags,
}

impl Condition {
    /// Subject-run keyword test.
    pub fn has_keyword(keyword: KeywordId, op: CompareOp, comparison_value: f32) -> Self {
        Self {
            op,
            comparison_value,
            function: ConditionFunction::HasKeyword(keyword),
            run_on: RunOn::Subject,
            flags: ConditionFlags::empty(),
        }
    }

    /// Subject-run attribute comparison.
    pub fn attribute_value(attribute: Attribute, op: CompareOp, comparison_value: f32) -> Self {
        Self {
            op,
            comparison_value,
            function: ConditionFunction::AttributeValue(attribute),
            run_on: RunOn::Subject,
            flags: ConditionFlags::empty(),
        }
    }

    /// Chain this condition with the next one via OR.
    pub fn with_or(mut self) -> Self {
        self.flags |= ConditionFlags::OR;
        self
    }
}

/// Condition tab slots of a damage entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionTab {
    Owner = 0,
    Weapon = 1,
    Target = 2,
}

/// Ordered condition list bound to one tab.
///
/// Well-formed records carry at most one group per tab.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionGroup {
    pub tab: ConditionTab,
    pub conditions: Vec<Condition>,
}

impl ConditionGroup {
    /// Create an empty group for a tab.
    pub fn new(tab: ConditionTab) -> Self {
        Self {
            tab,
            conditions: Vec::new(),
        }
    }
}
