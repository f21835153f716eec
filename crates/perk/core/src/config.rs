//! Patch settings and their validation.
//!
//! The embedding host loads these from its settings file; this crate only
//! defines the shape, the defaults, and the validation that gates a run.

/// Tunable parameters of a patch run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatchSettings {
    /// Exponent applied to every re-targeted modifier. 1.0 reproduces the
    /// source modifier's strength exactly; 0 disables the main pass.
    pub scaling_factor: f32,
    /// Restrict every added effect to owners carrying the player marker.
    pub owner_only: bool,
    pub emulation: EmulationSettings,
    pub balancing: BalancingSettings,
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            scaling_factor: 1.0,
            owner_only: true,
            emulation: EmulationSettings::default(),
            balancing: BalancingSettings::default(),
        }
    }
}

/// Controls piecewise emulation of attribute-scaled multipliers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmulationSettings {
    /// Emulate attribute-scaled multipliers with range-gated segments. When
    /// disabled those source effects are skipped entirely.
    pub enabled: bool,
    /// Attribute range covered by a single segment. Smaller values are more
    /// accurate and add more entry points, about
    /// `max_attribute_value / accuracy` of them per emulated effect.
    pub accuracy: u32,
    /// Attribute values are emulated up to this maximum; the last segment
    /// covers everything above it.
    pub max_attribute_value: u32,
    /// Per-point marksman skill bonus applied to projectile damage.
    pub skill_scaling: f32,
}

impl Default for EmulationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            accuracy: 10,
            max_attribute_value: 160,
            skill_scaling: 0.005,
        }
    }
}

/// Flat balancing knobs applied outside the inversion pipeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalancingSettings {
    /// Additive projectile damage offset.
    pub projectile_offset: f32,
    /// Multiplicative projectile damage factor.
    pub projectile_factor: f32,
    /// Additive bow damage offset.
    pub bow_offset: f32,
    /// Multiplicative bow damage factor.
    pub bow_factor: f32,
}

impl Default for BalancingSettings {
    fn default() -> Self {
        Self {
            projectile_offset: 0.0,
            projectile_factor: 1.0,
            bow_offset: 0.0,
            bow_factor: 1.0,
        }
    }
}

/// A single settings violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("scaling_factor must not be negative")]
    NegativeScalingFactor,

    #[error("emulation.accuracy must be at least 1")]
    AccuracyTooSmall,

    #[error("emulation.accuracy cannot be larger than emulation.max_attribute_value")]
    AccuracyAboveMaximum,

    #[error("emulation.skill_scaling must not be negative")]
    NegativeSkillScaling,
}

impl PatchSettings {
    /// Collect every violation; an empty list means the settings are usable.
    pub fn validate(&self) -> Vec<SettingsError> {
        let mut errors = Vec::new();
        if self.scaling_factor < 0.0 {
            errors.push(SettingsError::NegativeScalingFactor);
        }
        if self.emulation.enabled {
            if self.emulation.accuracy < 1 {
                errors.push(SettingsError::AccuracyTooSmall);
            }
            if self.emulation.max_attribute_value < self.emulation.accuracy {
                errors.push(SettingsError::AccuracyAboveMaximum);
            }
            if self.emulation.skill_scaling < 0.0 {
                errors.push(SettingsError::NegativeSkillScaling);
            }
        }
        errors
    }
}
