//! Opaque record identifiers and runtime attributes.

use std::fmt;

/// Opaque identifier of a keyword record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeywordId(pub u32);

impl KeywordId {
    /// Marker carried by every bow-class weapon record.
    pub const WEAP_TYPE_BOW: Self = Self(0x0001_E715);

    /// Marker unrelated to weapons. Projectile records fail the keyword
    /// lookup outright, which is what the complement selector exploits.
    pub const ACTIVATOR_LEVER: Self = Self(0x000F_D0E2);

    /// Marker carried only by the player actor.
    pub const PLAYER: Self = Self(0x0009_F8A6);
}

impl fmt::Display for KeywordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Opaque identifier of a perk record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerkId(pub u32);

impl PerkId {
    /// Player-only perk that absorbs redirected and synthesized entry points.
    pub const ALLOW_SHOUTING: Self = Self(0x000C_F788);

    /// Skill-boost perk that popular mods hand out to many NPCs.
    pub const ALCHEMY_SKILL_BOOSTS: Self = Self(0x000A_725C);

    /// Companion skill-boost perk, distributed alongside the alchemy one.
    pub const PERK_SKILL_BOOSTS: Self = Self(0x000C_F789);
}

impl fmt::Display for PerkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Runtime actor attribute a condition or effect can reference.
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
pub enum Attribute {
    /// Archery skill; drives projectile skill scaling.
    Marksman,
    OneHanded,
    TwoHanded,
    Smithing,
    Alchemy,
    Enchanting,
}
