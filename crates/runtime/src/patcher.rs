//! The patch pass.
//!
//! One synchronous sweep over the winning perk records. Damage entry points
//! that provably apply to every bow are cloned, rewritten, and inverted into
//! pairs that extend the same scaling to projectile damage; accepted pairs
//! are appended to copy-on-write overrides. Global balancing knobs ride
//! through the same pipeline as short-lived synthesized effects, and the
//! bow-side knobs are appended directly at the end.

use perk_core::{
    Attribute, AttributeOp, CompareOp, Condition, ConditionGroup, ConditionTab, EffectKind,
    EntryPoint, KeywordId, PatchSettings, Perk, PerkEffect, PerkId, ValueOp,
    add_complement_selector, add_owner_only, affects_class_universally, invert,
    strip_class_selector,
};
use tracing::{debug, info};

use crate::error::PatchError;
use crate::store::PerkStore;

/// Destination table for effects that must not stay on their source perk.
///
/// Some source perks are handed out to many NPCs by popular mods; appending
/// dozens of entry points to those would multiply the engine's per-actor perk
/// work. When the pass runs owner-only, their re-targeted effects are moved
/// to one designated player-only perk instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectionTable {
    /// Perk that absorbs redirected and synthesized effects.
    pub designated: PerkId,
    /// Source perks whose new effects are moved to the designated perk.
    pub redirected: Vec<PerkId>,
}

impl RedirectionTable {
    /// The stock table: the NPC-distributed skill-boost perks redirect to the
    /// shout-unlock perk only the player carries.
    pub fn vanilla() -> Self {
        Self {
            designated: PerkId::ALLOW_SHOUTING,
            redirected: vec![PerkId::ALCHEMY_SKILL_BOOSTS, PerkId::PERK_SKILL_BOOSTS],
        }
    }

    fn destination(&self, source: PerkId, owner_only: bool) -> PerkId {
        if owner_only && self.redirected.contains(&source) {
            self.designated
        } else {
            source
        }
    }
}

/// Totals reported after a pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchSummary {
    /// Source perks whose effects produced at least one accepted rewrite.
    pub patched_perks: usize,
    /// Entry-point effects appended across all overrides.
    pub added_effects: usize,
    /// Damage effects that passed the class filter but could not be inverted.
    pub skipped_effects: usize,
}

/// Single-pass patcher re-targeting bow damage modifiers onto projectiles.
pub struct Patcher {
    settings: PatchSettings,
    redirect: RedirectionTable,
}

impl Patcher {
    /// Class marker every patched modifier must provably apply to.
    const CLASS_MARKER: KeywordId = KeywordId::WEAP_TYPE_BOW;
    /// Unrelated marker whose failed lookup excludes projectile records.
    const COMPLEMENT_MARKER: KeywordId = KeywordId::ACTIVATOR_LEVER;
    /// Owner marker used when the pass is restricted to the player.
    const OWNER_MARKER: KeywordId = KeywordId::PLAYER;

    pub fn new(settings: PatchSettings, redirect: RedirectionTable) -> Self {
        Self { settings, redirect }
    }

    /// Run the full pass against a store.
    ///
    /// Aborts without touching the store when the settings are invalid. The
    /// pass itself only appends to overrides; the synthesized effects are the
    /// one exception, retracted again before the run returns.
    pub fn run(&self, store: &mut dyn PerkStore) -> Result<PatchSummary, PatchError> {
        let violations = self.settings.validate();
        if !violations.is_empty() {
            return Err(PatchError::InvalidSettings(violations));
        }

        let mut summary = PatchSummary::default();

        // Synthesized effects ride through the same filter/rewrite/invert
        // pipeline as authored ones; their projectile-only derivatives stay
        // after the originals are retracted below.
        let synthesized = self.synthesized_effects();
        let synthesized_range = if synthesized.is_empty() {
            None
        } else {
            let perk = store.get_or_add_override(self.redirect.designated)?;
            let start = perk.effects.len();
            perk.effects.extend(synthesized);
            Some(start..perk.effects.len())
        };

        if self.settings.scaling_factor != 0.0 {
            for id in store.winning_ids() {
                let Some(perk) = store.winning(id) else {
                    continue;
                };
                let perk = perk.clone();
                self.patch_perk(store, &perk, &mut summary)?;
            }
        }

        if let Some(range) = synthesized_range {
            let perk = store.get_or_add_override(self.redirect.designated)?;
            perk.effects.drain(range);
        }

        summary.added_effects += self.append_bow_balancing(store)?;

        info!(
            patched_perks = summary.patched_perks,
            added_effects = summary.added_effects,
            skipped_effects = summary.skipped_effects,
            "patch pass complete"
        );
        Ok(summary)
    }

    /// Re-target every eligible damage effect of one perk.
    fn patch_perk(
        &self,
        store: &mut dyn PerkStore,
        perk: &Perk,
        summary: &mut PatchSummary,
    ) -> Result<(), PatchError> {
        let relevant: Vec<&PerkEffect> = perk
            .effects
            .iter()
            .filter(|effect| effect.entry_point.modifies_damage())
            .filter(|effect| {
                affects_class_universally(&effect.condition_groups, Self::CLASS_MARKER)
            })
            .collect();
        if relevant.is_empty() {
            return Ok(());
        }

        let mut destination = None;
        for effect in relevant {
            let mut scale_all = effect.clone();
            let mut scale_complement = effect.clone();

            if self.settings.owner_only {
                add_owner_only(&mut scale_all.condition_groups, Self::OWNER_MARKER);
                add_owner_only(&mut scale_complement.condition_groups, Self::OWNER_MARKER);
            }
            strip_class_selector(&mut scale_all.condition_groups);
            strip_class_selector(&mut scale_complement.condition_groups);
            add_complement_selector(&mut scale_complement.condition_groups, Self::COMPLEMENT_MARKER);

            let Some(accepted) = invert(
                scale_all,
                scale_complement,
                self.settings.scaling_factor,
                &self.settings.emulation,
            ) else {
                summary.skipped_effects += 1;
                continue;
            };

            let id = *destination.get_or_insert_with(|| {
                self.redirect.destination(perk.id, self.settings.owner_only)
            });
            let target = store.get_or_add_override(id)?;
            let count = accepted.len();
            target.effects.extend(accepted);
            summary.added_effects += count;
            debug!(perk = %perk.id, destination = %id, effects = count, "re-targeted damage effects");
        }
        if destination.is_some() {
            summary.patched_perks += 1;
        }
        Ok(())
    }

    /// Effects standing in for global balancing knobs.
    ///
    /// Attached to the designated perk before the pass so the pipeline emits
    /// their projectile-only derivatives, then retracted.
    fn synthesized_effects(&self) -> Vec<PerkEffect> {
        let mut effects = Vec::new();

        // The engine applies the bow skill curve through game settings, which
        // never touch projectile damage; a bow-style skill multiplier fills
        // the gap once the pipeline has inverted it.
        if self.settings.emulation.skill_scaling != 0.0 {
            effects.push(
                PerkEffect::new(
                    EntryPoint::ModAttackDamage,
                    EffectKind::AttributeScaled {
                        op: AttributeOp::MultiplyOnePlusScaled,
                        attribute: Attribute::Marksman,
                        value: self.settings.emulation.skill_scaling,
                    },
                )
                .with_priority(20),
            );
        }

        if self.settings.balancing.projectile_factor != 1.0 {
            effects.push(PerkEffect::new(
                EntryPoint::ModAttackDamage,
                EffectKind::Value {
                    op: ValueOp::Multiply,
                    value: self.settings.balancing.projectile_factor,
                },
            ));
        }

        if self.settings.balancing.projectile_offset != 0.0 {
            effects.push(
                PerkEffect::new(
                    EntryPoint::ModAttackDamage,
                    EffectKind::Value {
                        op: ValueOp::Add,
                        value: self.settings.balancing.projectile_offset,
                    },
                )
                .with_priority(255),
            );
        }

        effects
    }

    /// Append the direct bow balancing knobs, bypassing inversion.
    ///
    /// These change bow damage itself, so they go straight onto the
    /// designated perk gated by the class marker.
    fn append_bow_balancing(&self, store: &mut dyn PerkStore) -> Result<usize, PatchError> {
        let mut effects = Vec::new();
        if self.settings.balancing.bow_factor != 1.0 {
            effects.push(self.bow_gated(EffectKind::Value {
                op: ValueOp::Multiply,
                value: self.settings.balancing.bow_factor,
            }));
        }
        if self.settings.balancing.bow_offset != 0.0 {
            effects.push(
                self.bow_gated(EffectKind::Value {
                    op: ValueOp::Add,
                    value: self.settings.balancing.bow_offset,
                })
                .with_priority(255),
            );
        }
        if effects.is_empty() {
            return Ok(0);
        }

        let count = effects.len();
        let perk = store.get_or_add_override(self.redirect.designated)?;
        perk.effects.extend(effects);
        Ok(count)
    }

    fn bow_gated(&self, kind: EffectKind) -> PerkEffect {
        let mut effect = PerkEffect::new(EntryPoint::ModAttackDamage, kind);
        if self.settings.owner_only {
            add_owner_only(&mut effect.condition_groups, Self::OWNER_MARKER);
        }
        let mut group = ConditionGroup::new(ConditionTab::Weapon);
        group.conditions.push(Condition::has_keyword(
            Self::CLASS_MARKER,
            CompareOp::Equal,
            1.0,
        ));
        effect.condition_groups.push(group);
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirection_applies_only_when_owner_only() {
        let table = RedirectionTable::vanilla();
        assert_eq!(
            table.destination(PerkId::ALCHEMY_SKILL_BOOSTS, true),
            PerkId::ALLOW_SHOUTING
        );
        assert_eq!(
            table.destination(PerkId::ALCHEMY_SKILL_BOOSTS, false),
            PerkId::ALCHEMY_SKILL_BOOSTS
        );
        assert_eq!(table.destination(PerkId(0x1234), true), PerkId(0x1234));
    }

    #[test]
    fn neutral_settings_synthesize_nothing() {
        let mut settings = PatchSettings::default();
        settings.emulation.skill_scaling = 0.0;
        let patcher = Patcher::new(settings, RedirectionTable::vanilla());
        assert!(patcher.synthesized_effects().is_empty());
    }

    #[test]
    fn every_knob_synthesizes_one_effect() {
        let mut settings = PatchSettings::default();
        settings.emulation.skill_scaling = 0.005;
        settings.balancing.projectile_factor = 1.2;
        settings.balancing.projectile_offset = 3.0;
        let patcher = Patcher::new(settings, RedirectionTable::vanilla());

        let effects = patcher.synthesized_effects();
        assert_eq!(effects.len(), 3);
        assert_eq!(effects[0].priority, 20);
        assert_eq!(effects[1].priority, 0);
        assert_eq!(effects[2].priority, 255);
    }
}
