//! Piecewise emulation of attribute-scaled multipliers.
//!
//! A multiplier that scales with a runtime attribute has no exact inverse as
//! a record: the cancelling side would need the attribute's value at
//! application time. Instead the attribute domain is cut into ranges, each
//! approximated by a constant multiplier pair gated on the owner's attribute
//! falling inside the range.

use crate::bounds::{ensure_bounds, is_zero};
use crate::condition::add_attribute_range_gate;
use crate::config::EmulationSettings;
use crate::effect::{EffectKind, PerkEffect, ValueOp};
use crate::record::Attribute;

/// Range boundaries of the emulated segments.
///
/// `thresholds[i]..thresholds[i + 1]` is segment `i`; the outermost entries
/// are unbounded sentinels so the segments cover the whole domain.
pub(crate) fn segment_thresholds(emulation: &EmulationSettings) -> Vec<i32> {
    let segments = (emulation.max_attribute_value / emulation.accuracy + 1) as usize;
    let maximum = emulation.max_attribute_value as f32;

    let mut thresholds = vec![0i32; segments + 1];
    thresholds[0] = i32::MIN;
    thresholds[segments] = i32::MAX;
    for i in 1..segments {
        thresholds[i] = (maximum / (segments - 1) as f32 * i as f32).round() as i32;
    }
    thresholds
}

/// Build the range-gated constant-multiplier pairs approximating
/// `base(attribute) ^ scaling_factor`.
///
/// `base` is `attribute * coefficient`, or `1 + attribute * coefficient` when
/// `one_plus` is set. Each segment is evaluated at a representative value:
/// zero for the lowest segment, the segment's lower threshold otherwise.
/// Segments whose multiplier lands within tolerance of 1 are dropped
/// entirely.
pub(crate) fn segment_pairs(
    scale_all: &PerkEffect,
    scale_complement: &PerkEffect,
    attribute: Attribute,
    coefficient: f32,
    one_plus: bool,
    scaling_factor: f32,
    emulation: &EmulationSettings,
) -> Vec<PerkEffect> {
    let thresholds = segment_thresholds(emulation);
    let segments = thresholds.len() - 1;

    let mut accepted = Vec::new();
    for i in 0..segments {
        let representative = if i == 0 { 0.0 } else { thresholds[i] as f32 };
        let base = if one_plus {
            1.0 + representative * coefficient
        } else {
            representative * coefficient
        };
        let seg_mul = ensure_bounds(base.powf(scaling_factor));
        // The segment multiplies by ~1; nothing worth adding.
        if is_zero(seg_mul - 1.0) {
            continue;
        }

        let mut all_segment = multiply_template(scale_all, seg_mul);
        let mut complement_segment =
            multiply_template(scale_complement, ensure_bounds(1.0 / seg_mul));
        add_attribute_range_gate(
            &mut all_segment.condition_groups,
            attribute,
            thresholds[i],
            thresholds[i + 1],
        );
        add_attribute_range_gate(
            &mut complement_segment.condition_groups,
            attribute,
            thresholds[i],
            thresholds[i + 1],
        );
        accepted.push(all_segment);
        accepted.push(complement_segment);
    }
    accepted
}

/// Constant-multiplier copy of a template effect; entry point, priority,
/// rank, and conditions carry over.
fn multiply_template(template: &PerkEffect, value: f32) -> PerkEffect {
    PerkEffect {
        entry_point: template.entry_point,
        priority: template.priority,
        rank: template.rank,
        condition_groups: template.condition_groups.clone(),
        kind: EffectKind::Value {
            op: ValueOp::Multiply,
            value,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{CompareOp, ConditionFunction, ConditionTab};
    use crate::effect::EntryPoint;

    fn template(op_value: f32) -> PerkEffect {
        PerkEffect::new(
            EntryPoint::ModAttackDamage,
            EffectKind::Value {
                op: ValueOp::Multiply,
                value: op_value,
            },
        )
        .with_priority(20)
    }

    fn settings() -> EmulationSettings {
        EmulationSettings::default()
    }

    #[test]
    fn default_configuration_yields_seventeen_segments() {
        let thresholds = segment_thresholds(&settings());
        assert_eq!(thresholds.len(), 18);
        assert_eq!(thresholds[0], i32::MIN);
        assert_eq!(thresholds[17], i32::MAX);
        for i in 1..17 {
            assert_eq!(thresholds[i], 10 * i as i32);
        }
    }

    #[test]
    fn interior_thresholds_strictly_increase() {
        let emulation = EmulationSettings {
            accuracy: 7,
            max_attribute_value: 100,
            ..settings()
        };
        let thresholds = segment_thresholds(&emulation);
        for pair in thresholds[1..thresholds.len() - 1].windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn segments_pair_a_multiplier_with_its_reciprocal() {
        let pairs = segment_pairs(
            &template(0.0),
            &template(0.0),
            Attribute::Marksman,
            0.01,
            false,
            1.0,
            &settings(),
        );
        assert!(!pairs.is_empty());
        assert_eq!(pairs.len() % 2, 0);
        for chunk in pairs.chunks(2) {
            let (all, complement) = (value_of(&chunk[0]), value_of(&chunk[1]));
            assert!((all * complement - 1.0).abs() < 1.0e-3);
        }
    }

    #[test]
    fn near_unity_segments_are_omitted() {
        // coefficient 0.01 makes the representative value 100 an exact no-op:
        // 100 * 0.01 == 1. Sixteen of seventeen segments survive.
        let pairs = segment_pairs(
            &template(0.0),
            &template(0.0),
            Attribute::Marksman,
            0.01,
            false,
            1.0,
            &settings(),
        );
        assert_eq!(pairs.len(), 16 * 2);
    }

    #[test]
    fn zero_coefficient_one_plus_collapses_to_nothing() {
        let pairs = segment_pairs(
            &template(0.0),
            &template(0.0),
            Attribute::Marksman,
            0.0,
            true,
            1.0,
            &settings(),
        );
        assert!(pairs.is_empty());
    }

    #[test]
    fn segments_are_range_gated_on_the_owner_tab() {
        let pairs = segment_pairs(
            &template(0.0),
            &template(0.0),
            Attribute::Marksman,
            0.005,
            true,
            1.0,
            &settings(),
        );

        // First retained segment after the zero-representative one covers
        // [10, 20): gated below 19.5 and at or above 9.5.
        let first = &pairs[0];
        let group = first
            .condition_groups
            .iter()
            .find(|group| group.tab == ConditionTab::Owner)
            .unwrap();
        assert_eq!(group.conditions.len(), 2);
        assert_eq!(group.conditions[0].op, CompareOp::LessThan);
        assert_eq!(group.conditions[0].comparison_value, 19.5);
        assert_eq!(group.conditions[1].op, CompareOp::GreaterOrEqual);
        assert_eq!(group.conditions[1].comparison_value, 9.5);
        assert!(group.conditions.iter().all(
            |cond| cond.function == ConditionFunction::AttributeValue(Attribute::Marksman)
        ));

        // Every retained effect became a plain multiplier.
        assert!(pairs.iter().all(|effect| matches!(
            effect.kind,
            EffectKind::Value {
                op: ValueOp::Multiply,
                ..
            }
        )));
    }

    #[test]
    fn templates_keep_entry_point_and_priority() {
        let pairs = segment_pairs(
            &template(0.0),
            &template(0.0),
            Attribute::Marksman,
            0.01,
            false,
            1.0,
            &settings(),
        );
        assert!(
            pairs
                .iter()
                .all(|effect| effect.entry_point == EntryPoint::ModAttackDamage)
        );
        assert!(pairs.iter().all(|effect| effect.priority == 20));
    }

    fn value_of(effect: &PerkEffect) -> f32 {
        match effect.kind {
            EffectKind::Value { value, .. } => value,
            EffectKind::AttributeScaled { value, .. } => value,
        }
    }
}
