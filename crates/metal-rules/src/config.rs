//! The class configuration table.
//!
//! Built once at startup and passed by reference to consumers; nothing
//! mutates it afterwards.

use crate::ability::{ActionType, MaledictionDef, MaledictionId, TargetMode, UsageModel};

/// The immutable Accursed class configuration: the full malediction roster.
#[derive(Debug, Clone)]
pub struct ClassConfig {
    maledictions: Vec<MaledictionDef>,
}

impl ClassConfig {
    /// The standard Accursed roster: eight maledictions, unlocking at
    /// levels 2 and 9.
    pub fn standard() -> Self {
        Self {
            maledictions: vec![
                MaledictionDef {
                    id: MaledictionId::EvilEye,
                    name: "Evil Eye",
                    min_level: 2,
                    action: ActionType::BonusAction,
                    range_ft: Some(60),
                    usage: UsageModel::DoomRefresh,
                    target: TargetMode::Single,
                    summary: "Curse a creature you can see within 60 ft: the first attack \
                              roll, ability check, or saving throw it makes before the start \
                              of your next turn has disadvantage.",
                },
                MaledictionDef {
                    id: MaledictionId::HexArmor,
                    name: "Hex Armor",
                    min_level: 2,
                    action: ActionType::Passive,
                    range_ft: None,
                    usage: UsageModel::Permanent,
                    target: TargetMode::SelfOnly,
                    summary: "While not wearing armor, add your proficiency bonus to your AC.",
                },
                MaledictionDef {
                    id: MaledictionId::ShadowStep,
                    name: "Shadow Step",
                    min_level: 2,
                    action: ActionType::BonusAction,
                    range_ft: Some(30),
                    usage: UsageModel::DoomRefresh,
                    target: TargetMode::SelfOnly,
                    summary: "While in dim light or darkness, cast Misty Step.",
                },
                MaledictionDef {
                    id: MaledictionId::UnholyFury,
                    name: "Unholy Fury",
                    min_level: 2,
                    action: ActionType::Free,
                    range_ft: None,
                    usage: UsageModel::DoomOnly,
                    target: TargetMode::SelfOnly,
                    summary: "Until your next turn, you have advantage on Strength-based \
                              melee attacks, and attacks against you have advantage.",
                },
                MaledictionDef {
                    id: MaledictionId::BrutalFury,
                    name: "Brutal Fury",
                    min_level: 9,
                    action: ActionType::Reaction,
                    range_ft: None,
                    usage: UsageModel::DoomOnly,
                    target: TargetMode::SelfOnly,
                    summary: "When you hit with an attack, forgo advantage to deal extra \
                              necrotic damage equal to twice your Doom die.",
                },
                MaledictionDef {
                    id: MaledictionId::HexShield,
                    name: "Hex Shield",
                    min_level: 9,
                    action: ActionType::Reaction,
                    range_ft: Some(5),
                    usage: UsageModel::DoomOnly,
                    target: TargetMode::Attacker,
                    summary: "When damaged by an attack within 5 ft, deal necrotic damage \
                              equal to your Doom die to the attacker.",
                },
                MaledictionDef {
                    id: MaledictionId::ImprovedShadowStep,
                    name: "Improved Shadow Step",
                    min_level: 9,
                    action: ActionType::BonusAction,
                    range_ft: Some(30),
                    usage: UsageModel::DoomRefresh,
                    target: TargetMode::SelfPlusOne,
                    summary: "As Shadow Step, but you may bring one creature with you; an \
                              unwilling creature resists with a Charisma save.",
                },
                MaledictionDef {
                    id: MaledictionId::ShroudOfDarkness,
                    name: "Shroud of Darkness",
                    min_level: 9,
                    action: ActionType::Action,
                    range_ft: None,
                    usage: UsageModel::DoomRefresh,
                    target: TargetMode::SelfOnly,
                    summary: "While in dim light or darkness, cast Greater Invisibility on \
                              yourself.",
                },
            ],
        }
    }

    /// Look up a malediction definition.
    pub fn malediction(&self, id: MaledictionId) -> Option<&MaledictionDef> {
        self.maledictions.iter().find(|def| def.id == id)
    }

    /// All maledictions in the roster.
    pub fn maledictions(&self) -> &[MaledictionDef] {
        &self.maledictions
    }

    /// Maledictions selectable at the given Accursed level.
    pub fn available_at(&self, level: u32) -> Vec<&MaledictionDef> {
        self.maledictions
            .iter()
            .filter(|def| def.min_level <= level)
            .collect()
    }
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self::standard()
    }
}
