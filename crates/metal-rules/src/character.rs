//! The per-character state record.
//!
//! This is the strongly typed replacement for the module's flag bag on the
//! host actor document: every field is named and defaulted explicitly, and
//! the whole record round-trips through serde for host persistence.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ability::{AbilityKey, MaledictionId};
use crate::effect::{AppliedEffect, DamageKind, Effect, EffectTag};
use crate::error::{RulesError, RulesResult};
use crate::ledger::ResourceLedger;
use crate::progression;
use crate::stress;
use crate::track::Track;

/// Cap on the stress and exhaustion tracks.
pub const CONDITION_MAX: u32 = 6;

/// An Accursed character's mechanical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Host document id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Accursed class level.
    pub level: u32,
    /// Proficiency bonus (host-owned stat, snapshotted).
    pub proficiency: u32,
    /// Constitution modifier (host-owned stat, snapshotted).
    pub constitution_mod: i32,
    /// Whether the character currently wears armor.
    pub wearing_armor: bool,
    /// Whether the Doom transformation is active.
    pub doom_active: bool,
    /// Remaining uses of limited abilities.
    pub ledger: ResourceLedger,
    /// Selected maledictions, in pick order.
    pub maledictions: Vec<MaledictionId>,
    /// Stress condition (0..=6).
    pub stress: Track,
    /// Exhaustion condition (0..=6).
    pub exhaustion: Track,
    /// Temporary hit points.
    pub temp_hp: u32,
    /// Effects currently attached to the character.
    pub effects: Vec<AppliedEffect>,
}

impl Character {
    /// Create a fresh Accursed character at the given class level.
    ///
    /// The Doom ledger entry starts at the level's full allotment, as if
    /// the character had just finished a long rest.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        let mut ledger = ResourceLedger::new();
        ledger.set(AbilityKey::Doom, progression::doom_uses(level));
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            level,
            proficiency: proficiency_for(level),
            constitution_mod: 0,
            wearing_armor: false,
            doom_active: false,
            ledger,
            maledictions: Vec::new(),
            stress: Track::new(CONDITION_MAX),
            exhaustion: Track::new(CONDITION_MAX),
            temp_hp: 0,
            effects: Vec::new(),
        }
    }

    /// Returns true if the malediction is part of the current selection.
    pub fn has_selected(&self, id: MaledictionId) -> bool {
        self.maledictions.contains(&id)
    }

    /// Returns true if an identical effect is already attached.
    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.iter().any(|applied| applied.effect == effect)
    }

    /// Returns true if any attached effect carries the tag.
    pub fn has_effect_tag(&self, tag: EffectTag) -> bool {
        self.effects.iter().any(|applied| applied.tag == tag)
    }

    /// Attach a bundle of effects atomically.
    ///
    /// Either every effect in the bundle is attached, or none are: if an
    /// effect is rejected partway (an identical effect is already active),
    /// every piece applied so far is rolled back before the error returns.
    pub fn apply_bundle(&mut self, bundle: Vec<AppliedEffect>) -> RulesResult<()> {
        let applied_before = self.effects.len();
        for applied in bundle {
            if self.has_effect(applied.effect) {
                let rejected = applied.effect;
                self.effects.truncate(applied_before);
                return Err(RulesError::EffectRejected(format!(
                    "{rejected} is already active"
                )));
            }
            self.effects.push(applied);
        }
        Ok(())
    }

    /// Remove every attached effect carrying the tag. Returns how many
    /// were removed.
    pub fn remove_effects_tagged(&mut self, tag: EffectTag) -> usize {
        let before = self.effects.len();
        self.effects.retain(|applied| applied.tag != tag);
        before - self.effects.len()
    }

    /// Compute the bonuses and restrictions currently in force, from the
    /// attached effects and conditions.
    pub fn derived(&self) -> Derived {
        let mut derived = Derived {
            resistances: BTreeSet::new(),
            advantage_on_strength: false,
            can_concentrate: true,
            advantage_on_strength_melee: false,
            attackers_have_advantage: false,
            ac_proficiency_bonus: false,
            invisible: false,
            advantage_on_attacks: false,
            check_penalty: stress::check_penalty(self),
        };
        for applied in &self.effects {
            match applied.effect {
                Effect::Resistance(kind) => {
                    derived.resistances.insert(kind);
                }
                Effect::AdvantageOnStrength => derived.advantage_on_strength = true,
                Effect::NoConcentration => derived.can_concentrate = false,
                Effect::AdvantageOnStrengthMelee => derived.advantage_on_strength_melee = true,
                Effect::AttackersHaveAdvantage => derived.attackers_have_advantage = true,
                Effect::AcProficiencyBonus => derived.ac_proficiency_bonus = true,
                Effect::Invisible => derived.invisible = true,
                Effect::AdvantageOnAttacks => derived.advantage_on_attacks = true,
                Effect::BrutalFuryReady | Effect::HexShieldReady => {}
            }
        }
        derived
    }
}

/// Bonuses and restrictions derived from the character's current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    /// Damage types currently resisted.
    pub resistances: BTreeSet<DamageKind>,
    /// Advantage on Strength checks and saving throws.
    pub advantage_on_strength: bool,
    /// Whether spell concentration is allowed.
    pub can_concentrate: bool,
    /// Advantage on Strength-based melee attacks.
    pub advantage_on_strength_melee: bool,
    /// Attacks against the character have advantage.
    pub attackers_have_advantage: bool,
    /// Proficiency bonus applies to AC.
    pub ac_proficiency_bonus: bool,
    /// The character is invisible.
    pub invisible: bool,
    /// Advantage on all attack rolls.
    pub advantage_on_attacks: bool,
    /// Penalty to d20 rolls from stress or exhaustion (0 or negative).
    pub check_penalty: i32,
}

/// Standard proficiency bonus by class level.
fn proficiency_for(level: u32) -> u32 {
    match level {
        0..=4 => 2,
        5..=8 => 3,
        9..=12 => 4,
        13..=16 => 5,
        _ => 6,
    }
}
