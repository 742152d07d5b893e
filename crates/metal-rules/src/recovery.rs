//! Recovery rules: ledger resets on lifecycle events.
//!
//! Both triggers are independent and order-insensitive, and both are
//! idempotent: a host event firing twice leaves the ledger exactly where
//! one firing would.

use crate::ability::{AbilityKey, MaledictionId, UsageModel};
use crate::character::Character;
use crate::config::ClassConfig;
use crate::ledger::{Uses, max_uses};
use crate::progression;

/// What a long rest recovered, for the rest chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRecovery {
    /// Doom uses after the reset.
    pub doom_uses: u32,
    /// Maledictions whose uses were refreshed.
    pub refreshed: Vec<MaledictionId>,
}

/// Long rest completed: Doom uses return to the level's full allotment and
/// every selected doom-refresh malediction returns to its maximum.
pub fn on_long_rest(character: &mut Character, config: &ClassConfig) -> RestRecovery {
    let doom_max = progression::doom_uses(character.level);
    character
        .ledger
        .reset_to_max(AbilityKey::Doom, Uses::Limited(doom_max));

    RestRecovery {
        doom_uses: doom_max,
        refreshed: refresh_doom_refresh(character, config),
    }
}

/// Doom activated: every selected doom-refresh malediction refills to its
/// fixed per-activation value of one use.
pub fn on_doom_activated(character: &mut Character, config: &ClassConfig) -> Vec<MaledictionId> {
    refresh_doom_refresh(character, config)
}

fn refresh_doom_refresh(character: &mut Character, config: &ClassConfig) -> Vec<MaledictionId> {
    let mut refreshed = Vec::new();
    for id in character.maledictions.clone() {
        let Some(def) = config.malediction(id) else {
            continue;
        };
        if def.usage == UsageModel::DoomRefresh {
            character
                .ledger
                .reset_to_max(AbilityKey::Malediction(id), max_uses(def.usage));
            refreshed.push(id);
        }
    }
    refreshed
}
