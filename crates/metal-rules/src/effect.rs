//! Ephemeral effects attached to a character.
//!
//! Every applied effect carries the tag of the toggle or power that created
//! it, so removal works by tag lookup even if the defining bundle has
//! changed since application.

use serde::{Deserialize, Serialize};

use crate::ability::MaledictionId;

/// Physical damage types the Doom form resists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DamageKind {
    /// Bludgeoning damage.
    Bludgeoning,
    /// Piercing damage.
    Piercing,
    /// Slashing damage.
    Slashing,
}

impl std::fmt::Display for DamageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bludgeoning => write!(f, "bludgeoning"),
            Self::Piercing => write!(f, "piercing"),
            Self::Slashing => write!(f, "slashing"),
        }
    }
}

/// A single mechanical modification applied to the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    /// Resistance to a physical damage type.
    Resistance(DamageKind),
    /// Advantage on Strength checks and saving throws.
    AdvantageOnStrength,
    /// Cannot concentrate on spells.
    NoConcentration,
    /// Advantage on Strength-based melee attacks.
    AdvantageOnStrengthMelee,
    /// Attacks against the character have advantage.
    AttackersHaveAdvantage,
    /// Proficiency bonus added to AC while unarmored.
    AcProficiencyBonus,
    /// The character is invisible.
    Invisible,
    /// Advantage on all attack rolls.
    AdvantageOnAttacks,
    /// Brutal Fury is readied for the next hit.
    BrutalFuryReady,
    /// Hex Shield retaliation is readied.
    HexShieldReady,
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resistance(kind) => write!(f, "resistance to {kind}"),
            Self::AdvantageOnStrength => write!(f, "advantage on Strength checks and saves"),
            Self::NoConcentration => write!(f, "no spell concentration"),
            Self::AdvantageOnStrengthMelee => {
                write!(f, "advantage on Strength-based melee attacks")
            }
            Self::AttackersHaveAdvantage => write!(f, "attacks against you have advantage"),
            Self::AcProficiencyBonus => write!(f, "proficiency bonus to AC"),
            Self::Invisible => write!(f, "invisible"),
            Self::AdvantageOnAttacks => write!(f, "advantage on attack rolls"),
            Self::BrutalFuryReady => write!(f, "Brutal Fury readied"),
            Self::HexShieldReady => write!(f, "Hex Shield readied"),
        }
    }
}

/// The owner of an applied effect, used for tagged removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectTag {
    /// Part of the Doom transformation bundle.
    Doom,
    /// Created by a specific malediction.
    Malediction(MaledictionId),
}

/// How long an effect lasts before the host expires it.
///
/// The duration caps the in-host overlay only; it never drives a state
/// transition in this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectDuration {
    /// A number of combat rounds.
    Rounds(u32),
    /// A number of in-world seconds.
    Seconds(u32),
}

/// An effect currently attached to the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEffect {
    /// Who created the effect.
    pub tag: EffectTag,
    /// The modification itself.
    pub effect: Effect,
    /// Host-side lifetime, if capped.
    pub duration: Option<EffectDuration>,
}

impl AppliedEffect {
    /// Create a tagged effect with no duration cap.
    pub fn new(tag: EffectTag, effect: Effect) -> Self {
        Self {
            tag,
            effect,
            duration: None,
        }
    }

    /// Create a tagged effect with a host-side lifetime.
    pub fn with_duration(tag: EffectTag, effect: Effect, duration: EffectDuration) -> Self {
        Self {
            tag,
            effect,
            duration: Some(duration),
        }
    }
}
