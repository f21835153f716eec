//! Condition-set rewriters used while re-targeting entry points.
//!
//! Each rewriter is independent of the others and insensitive to the order
//! they are applied in. They operate on the full group list of one effect and
//! create the tab they need when it is absent.

use crate::record::{Attribute, KeywordId};

use super::{CompareOp, Condition, ConditionGroup, ConditionTab};

/// Remove every weapon-tab group.
pub fn strip_class_selector(groups: &mut Vec<ConditionGroup>) {
    groups.retain(|group| group.tab != ConditionTab::Weapon);
}

/// Restrict an effect to everything except projectile records.
///
/// Prepends `HasKeyword(marker) == 0 OR HasKeyword(marker) != 0` to the
/// weapon tab. The pair is trivially true for weapon records, but projectile
/// records are not weapons and fail the keyword lookup itself, so both arms
/// evaluate false there and the effect never applies. Unarmed attacks still
/// pass the pair.
pub fn add_complement_selector(groups: &mut Vec<ConditionGroup>, marker: KeywordId) {
    let group = find_or_create(groups, ConditionTab::Weapon);
    group.conditions.splice(
        0..0,
        [
            Condition::has_keyword(marker, CompareOp::Equal, 0.0).with_or(),
            Condition::has_keyword(marker, CompareOp::NotEqual, 0.0),
        ],
    );
}

/// Restrict an effect to owners carrying `owner_marker`.
pub fn add_owner_only(groups: &mut Vec<ConditionGroup>, owner_marker: KeywordId) {
    let group = find_or_create(groups, ConditionTab::Owner);
    group.conditions.insert(
        0,
        Condition::has_keyword(owner_marker, CompareOp::Equal, 1.0),
    );
}

/// Gate an effect on `min <= attribute < max`, on the owner tab.
///
/// `i32::MIN` and `i32::MAX` mean unbounded on that side. Bounds are offset
/// by half a unit so the integer range survives the float comparison.
pub fn add_attribute_range_gate(
    groups: &mut Vec<ConditionGroup>,
    attribute: Attribute,
    min: i32,
    max: i32,
) {
    let group = find_or_create(groups, ConditionTab::Owner);
    if min != i32::MIN {
        group.conditions.insert(
            0,
            Condition::attribute_value(attribute, CompareOp::GreaterOrEqual, min as f32 - 0.5),
        );
    }
    if max != i32::MAX {
        group.conditions.insert(
            0,
            Condition::attribute_value(attribute, CompareOp::LessThan, max as f32 - 0.5),
        );
    }
}

fn find_or_create(groups: &mut Vec<ConditionGroup>, tab: ConditionTab) -> &mut ConditionGroup {
    match groups.iter().position(|group| group.tab == tab) {
        Some(index) => &mut groups[index],
        None => {
            groups.push(ConditionGroup::new(tab));
            let last = groups.len() - 1;
            &mut groups[last]
        }
    }
}
