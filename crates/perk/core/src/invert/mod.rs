//! Algebraic inversion of damage modifiers.
//!
//! A source modifier gated to bows applies its full strength to bow damage
//! but never to projectile damage. Inversion turns one such modifier into a
//! pair: `scale_all` applies the modifier's strength to everything, and
//! `scale_complement` cancels it again everywhere except on projectile
//! records. Their net effect leaves every weapon exactly as the source left
//! it while projectiles finally receive the same scaling.

mod emulate;

use crate::bounds::{ensure_bounds, is_zero};
use crate::config::EmulationSettings;
use crate::effect::{AttributeOp, EffectKind, PerkEffect, ValueOp};

/// Compute the re-targeted effect pair for one source effect.
///
/// Both arguments are clones of the same source effect whose conditions have
/// already been rewritten: `scale_complement` carries the complement
/// selector, `scale_all` does not. Returns `None` when the effect kind cannot
/// be inverted, which tells the caller to skip the source effect; `Some`
/// carries every effect to append, and may be empty for emulated kinds whose
/// segments all collapse to numeric no-ops.
pub fn invert(
    mut scale_all: PerkEffect,
    mut scale_complement: PerkEffect,
    scaling_factor: f32,
    emulation: &EmulationSettings,
) -> Option<Vec<PerkEffect>> {
    match (scale_all.kind, scale_complement.kind) {
        (
            EffectKind::Value {
                op: ValueOp::Add,
                value: all,
            },
            EffectKind::Value {
                op: ValueOp::Add,
                value: complement,
            },
        ) => {
            // A zero offset modifies nothing.
            if is_zero(complement) {
                return None;
            }
            let scaled = ensure_bounds(all * scaling_factor);
            scale_all.kind = EffectKind::Value {
                op: ValueOp::Add,
                value: scaled,
            };
            scale_complement.kind = EffectKind::Value {
                op: ValueOp::Add,
                value: ensure_bounds(-scaled),
            };
            Some(vec![scale_all, scale_complement])
        }
        (
            EffectKind::Value {
                op: ValueOp::Multiply,
                value: all,
            },
            EffectKind::Value {
                op: ValueOp::Multiply,
                value: complement,
            },
        ) => {
            scale_all.kind = EffectKind::Value {
                op: ValueOp::Multiply,
                value: ensure_bounds(all.powf(scaling_factor)),
            };
            scale_complement.kind = EffectKind::Value {
                op: ValueOp::Multiply,
                value: ensure_bounds(1.0 / complement),
            };
            Some(vec![scale_all, scale_complement])
        }
        (
            EffectKind::AttributeScaled {
                op: AttributeOp::AddScaled,
                attribute,
                value: all,
            },
            EffectKind::AttributeScaled {
                op: AttributeOp::AddScaled,
                value: complement,
                ..
            },
        ) => {
            if is_zero(complement) {
                return None;
            }
            let scaled = ensure_bounds(all * scaling_factor);
            scale_all.kind = EffectKind::AttributeScaled {
                op: AttributeOp::AddScaled,
                attribute,
                value: scaled,
            };
            scale_complement.kind = EffectKind::AttributeScaled {
                op: AttributeOp::AddScaled,
                attribute,
                value: ensure_bounds(-scaled),
            };
            Some(vec![scale_all, scale_complement])
        }
        (
            EffectKind::AttributeScaled {
                op: AttributeOp::MultiplyScaled,
                attribute,
                value: coefficient,
            },
            EffectKind::AttributeScaled {
                op: AttributeOp::MultiplyScaled,
                ..
            },
        ) => {
            if !emulation.enabled {
                return None;
            }
            Some(emulate::segment_pairs(
                &scale_all,
                &scale_complement,
                attribute,
                coefficient,
                false,
                scaling_factor,
                emulation,
            ))
        }
        (
            EffectKind::AttributeScaled {
                op: AttributeOp::MultiplyOnePlusScaled,
                attribute,
                value: coefficient,
            },
            EffectKind::AttributeScaled {
                op: AttributeOp::MultiplyOnePlusScaled,
                ..
            },
        ) => {
            if is_zero(coefficient) || !emulation.enabled {
                return None;
            }
            Some(emulate::segment_pairs(
                &scale_all,
                &scale_complement,
                attribute,
                coefficient,
                true,
                scaling_factor,
                emulation,
            ))
        }
        // Set modifications overwrite rather than combine; there is no pair
        // of effects that re-targets one without changing the host result.
        _ => None,
    }
}
