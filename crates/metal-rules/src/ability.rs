//! Ability identifiers and definitions.
//!
//! The malediction roster is a closed enumeration: every power the class
//! ships is listed here, and effect handlers dispatch over the enum rather
//! than over string identifiers.

use serde::{Deserialize, Serialize};

/// The resource-consumption policy governing an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UsageModel {
    /// No gating and no ledger entry.
    Unlimited,
    /// Limited uses; refreshed by activating Doom or finishing a long rest.
    DoomRefresh,
    /// Usable only while the Doom transformation is active.
    DoomOnly,
    /// Always-on ability with no uses to spend.
    Permanent,
}

/// The action economy cost of using an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    /// A full action.
    Action,
    /// A bonus action.
    BonusAction,
    /// A reaction.
    Reaction,
    /// No action: always on.
    Passive,
    /// Free to use on the character's turn.
    Free,
}

/// What an ability targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetMode {
    /// Affects only the user.
    SelfOnly,
    /// One creature the user can see.
    Single,
    /// The user plus one creature brought along.
    SelfPlusOne,
    /// The creature that attacked the user.
    Attacker,
}

/// A malediction power of the Accursed class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaledictionId {
    /// Curse a creature's next roll.
    EvilEye,
    /// Proficiency bonus to AC while unarmored.
    HexArmor,
    /// Misty Step from dim light or darkness.
    ShadowStep,
    /// Reckless Strength advantage while in Doom form.
    UnholyFury,
    /// Trade advantage for extra necrotic damage in Doom form.
    BrutalFury,
    /// Retaliatory necrotic damage in Doom form.
    HexShield,
    /// Shadow Step that can carry a creature along.
    ImprovedShadowStep,
    /// Greater Invisibility from dim light or darkness.
    ShroudOfDarkness,
}

impl MaledictionId {
    /// Every malediction, in roster order.
    pub const ALL: [Self; 8] = [
        Self::EvilEye,
        Self::HexArmor,
        Self::ShadowStep,
        Self::UnholyFury,
        Self::BrutalFury,
        Self::HexShield,
        Self::ImprovedShadowStep,
        Self::ShroudOfDarkness,
    ];

    /// The stable identifier used in persisted state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EvilEye => "evil-eye",
            Self::HexArmor => "hex-armor",
            Self::ShadowStep => "shadow-step",
            Self::UnholyFury => "unholy-fury",
            Self::BrutalFury => "brutal-fury",
            Self::HexShield => "hex-shield",
            Self::ImprovedShadowStep => "improved-shadow-step",
            Self::ShroudOfDarkness => "shroud-of-darkness",
        }
    }

    /// Parse a persisted identifier back into a malediction id.
    pub fn from_str_tag(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

impl std::fmt::Display for MaledictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for MaledictionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MaledictionId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str_tag(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown malediction: {s}")))
    }
}

/// Key for a ledger entry: either the Doom resource or a malediction's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AbilityKey {
    /// The Doom transformation resource.
    Doom,
    /// A malediction's own uses.
    Malediction(MaledictionId),
}

impl AbilityKey {
    /// The stable identifier used in persisted state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doom => "doom",
            Self::Malediction(id) => id.as_str(),
        }
    }

    /// Parse a persisted identifier back into a ledger key.
    pub fn from_str_tag(s: &str) -> Option<Self> {
        if s == "doom" {
            return Some(Self::Doom);
        }
        MaledictionId::from_str_tag(s).map(Self::Malediction)
    }
}

impl std::fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for AbilityKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AbilityKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str_tag(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown ability: {s}")))
    }
}

/// Static definition of a malediction power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaledictionDef {
    /// Which power this defines.
    pub id: MaledictionId,
    /// Display name.
    pub name: &'static str,
    /// Minimum Accursed level to select the power.
    pub min_level: u32,
    /// Action economy cost.
    pub action: ActionType,
    /// Range in feet; `None` means self-range.
    pub range_ft: Option<u32>,
    /// Resource-consumption policy.
    pub usage: UsageModel,
    /// Targeting mode.
    pub target: TargetMode,
    /// One-line rules summary shown in chat.
    pub summary: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        for id in MaledictionId::ALL {
            assert_eq!(MaledictionId::from_str_tag(id.as_str()), Some(id));
        }
        assert_eq!(MaledictionId::from_str_tag("frog-rain"), None);
    }

    #[test]
    fn key_round_trip() {
        assert_eq!(AbilityKey::from_str_tag("doom"), Some(AbilityKey::Doom));
        assert_eq!(
            AbilityKey::from_str_tag("evil-eye"),
            Some(AbilityKey::Malediction(MaledictionId::EvilEye))
        );
        assert_eq!(AbilityKey::from_str_tag("nope"), None);
    }

    #[test]
    fn id_serde_as_string() {
        let json = serde_json::to_string(&MaledictionId::ShadowStep).unwrap();
        assert_eq!(json, "\"shadow-step\"");
        let back: MaledictionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MaledictionId::ShadowStep);
    }

    #[test]
    fn unknown_id_rejected() {
        let err = serde_json::from_str::<MaledictionId>("\"frog-rain\"");
        assert!(err.is_err());
    }
}
