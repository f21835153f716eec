//! Static tautology proofs over weapon-tab condition lists.
//!
//! An entry point may only be re-targeted when its weapon-tab conditions are
//! provably true for every bow in every situation. The proof is structural:
//! consecutive OR-flagged conditions form blocks, blocks combine with AND,
//! and each atom must match one of two recognized always-true shapes.
//! Anything unrecognized fails the proof and blocks the rewrite.

use crate::record::KeywordId;

use super::{
    CompareOp, Condition, ConditionFlags, ConditionFunction, ConditionGroup, ConditionTab, RunOn,
};

/// Whether a condition list holds for every member of the weapon class.
///
/// An empty list is vacuously true. A block is true when any member is an
/// atomic tautology; the list is true when every block is.
pub fn is_tautology_for_class(conditions: &[Condition], class: KeywordId) -> bool {
    if conditions.is_empty() {
        return true;
    }

    // A block ends right after a condition without the OR flag; a trailing
    // OR run forms its own block.
    let mut blocks: Vec<&[Condition]> = Vec::new();
    let mut start = 0;
    for (i, cond) in conditions.iter().enumerate() {
        if !cond.flags.contains(ConditionFlags::OR) {
            blocks.push(&conditions[start..=i]);
            start = i + 1;
        }
    }
    if start < conditions.len() {
        blocks.push(&conditions[start..]);
    }

    blocks
        .iter()
        .all(|block| block.iter().any(|cond| is_atomic_tautology(cond, class)))
}

/// Whether an effect's condition groups leave the weapon class unrestricted.
///
/// The first weapon-tab group decides; a missing weapon tab means no
/// restriction at all.
pub fn affects_class_universally(groups: &[ConditionGroup], class: KeywordId) -> bool {
    match groups.iter().find(|group| group.tab == ConditionTab::Weapon) {
        Some(group) => is_tautology_for_class(&group.conditions, class),
        None => true,
    }
}

/// Only subject-run keyword tests are recognized. Two shapes qualify:
/// asserting the class marker is present, or asserting some other keyword is
/// absent.
fn is_atomic_tautology(cond: &Condition, class: KeywordId) -> bool {
    let ConditionFunction::HasKeyword(keyword) = cond.function else {
        return false;
    };
    if cond.run_on != RunOn::Subject {
        return false;
    }
    let value = cond.comparison_value;
    if keyword == class {
        (cond.op == CompareOp::Equal && value == 1.0)
            || (cond.op == CompareOp::NotEqual && value == 0.0)
    } else {
        (cond.op == CompareOp::Equal && value == 0.0)
            || (cond.op == CompareOp::NotEqual && value == 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Attribute;

    const CLASS: KeywordId = KeywordId::WEAP_TYPE_BOW;

    fn class_marker(op: CompareOp, value: f32) -> Condition {
        Condition::has_keyword(CLASS, op, value)
    }

    fn other_keyword(op: CompareOp, value: f32) -> Condition {
        Condition::has_keyword(KeywordId::ACTIVATOR_LEVER, op, value)
    }

    #[test]
    fn empty_list_is_vacuously_true() {
        assert!(is_tautology_for_class(&[], CLASS));
    }

    #[test]
    fn class_marker_presence_is_tautological() {
        assert!(is_tautology_for_class(
            &[class_marker(CompareOp::Equal, 1.0)],
            CLASS
        ));
        assert!(is_tautology_for_class(
            &[class_marker(CompareOp::NotEqual, 0.0)],
            CLASS
        ));
    }

    #[test]
    fn class_marker_absence_is_not() {
        assert!(!is_tautology_for_class(
            &[class_marker(CompareOp::Equal, 0.0)],
            CLASS
        ));
        assert!(!is_tautology_for_class(
            &[class_marker(CompareOp::NotEqual, 1.0)],
            CLASS
        ));
    }

    #[test]
    fn unrelated_keyword_absence_is_tautological() {
        assert!(is_tautology_for_class(
            &[other_keyword(CompareOp::Equal, 0.0)],
            CLASS
        ));
        assert!(is_tautology_for_class(
            &[other_keyword(CompareOp::NotEqual, 1.0)],
            CLASS
        ));
        assert!(!is_tautology_for_class(
            &[other_keyword(CompareOp::Equal, 1.0)],
            CLASS
        ));
    }

    #[test]
    fn attribute_conditions_are_not_recognized() {
        let cond = Condition::attribute_value(Attribute::Marksman, CompareOp::GreaterOrEqual, 0.0);
        assert!(!is_tautology_for_class(&[cond], CLASS));
    }

    #[test]
    fn target_run_on_is_not_recognized() {
        let mut cond = class_marker(CompareOp::Equal, 1.0);
        cond.run_on = RunOn::Target;
        assert!(!is_tautology_for_class(&[cond], CLASS));
    }

    #[test]
    fn or_block_is_true_when_any_member_is() {
        let good = class_marker(CompareOp::Equal, 1.0);
        let bad = class_marker(CompareOp::Equal, 0.0);
        assert!(is_tautology_for_class(
            &[bad.clone().with_or(), good.clone()],
            CLASS
        ));
        assert!(!is_tautology_for_class(
            &[bad.clone().with_or(), bad.clone()],
            CLASS
        ));
    }

    #[test]
    fn blocks_combine_with_and() {
        let good = class_marker(CompareOp::Equal, 1.0);
        let bad = class_marker(CompareOp::Equal, 0.0);
        assert!(!is_tautology_for_class(
            &[good.clone(), bad.clone()],
            CLASS
        ));
        assert!(is_tautology_for_class(&[good.clone(), good.clone()], CLASS));
    }

    #[test]
    fn trailing_or_run_forms_its_own_block() {
        let good = class_marker(CompareOp::Equal, 1.0);
        let bad = class_marker(CompareOp::Equal, 0.0);
        // [good][bad] and the trailing OR does not rescue the second block.
        assert!(!is_tautology_for_class(
            &[good.clone(), bad.clone().with_or()],
            CLASS
        ));
        assert!(is_tautology_for_class(&[good.clone().with_or()], CLASS));
    }

    #[test]
    fn missing_weapon_tab_is_unrestricted() {
        let owner_only = ConditionGroup {
            tab: ConditionTab::Owner,
            conditions: vec![other_keyword(CompareOp::Equal, 1.0)],
        };
        assert!(affects_class_universally(&[owner_only], CLASS));
        assert!(affects_class_universally(&[], CLASS));
    }

    #[test]
    fn weapon_tab_decides() {
        let restricted = ConditionGroup {
            tab: ConditionTab::Weapon,
            conditions: vec![class_marker(CompareOp::Equal, 0.0)],
        };
        assert!(!affects_class_universally(&[restricted], CLASS));

        let universal = ConditionGroup {
            tab: ConditionTab::Weapon,
            conditions: vec![class_marker(CompareOp::Equal, 1.0)],
        };
        assert!(affects_class_universally(&[universal], CLASS));
    }
}
