//! The Doom transformation toggle.
//!
//! Two states, Inactive and Active, with no automatic timeout: the bundled
//! durations only cap the host-side overlay. Activating while Active and
//! deactivating while Inactive are no-ops reported as success, so a sheet
//! button can fire the same call twice without harm.

use crate::ability::{AbilityKey, MaledictionId};
use crate::character::Character;
use crate::config::ClassConfig;
use crate::effect::{AppliedEffect, DamageKind, Effect, EffectDuration, EffectTag};
use crate::error::{RulesError, RulesResult};
use crate::progression;
use crate::recovery;

/// Host-side lifetime of the Doom overlay.
const DOOM_OVERLAY_SECONDS: u32 = 600;

/// What an activation changed, for the chat summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoomActivation {
    /// Temporary hit points granted.
    pub temp_hp: u32,
    /// Doom uses remaining after the activation.
    pub remaining: u32,
    /// Maledictions refreshed by the activation.
    pub refreshed: Vec<MaledictionId>,
}

/// Activate the Doom transformation.
///
/// Fails with `InsufficientUses` when the Doom ledger is spent. On success
/// the ledger is decremented, the effect bundle is attached atomically,
/// temporary hit points are granted (the grant never lowers an existing
/// pool), and doom-refresh maledictions refill. Returns `None` when Doom
/// was already active: an idempotent no-op.
pub fn activate(
    character: &mut Character,
    config: &ClassConfig,
) -> RulesResult<Option<DoomActivation>> {
    if character.doom_active {
        return Ok(None);
    }
    if character.ledger.get(AbilityKey::Doom) == 0 {
        return Err(RulesError::InsufficientUses("Doom Transformation".to_string()));
    }

    // Bundle first: if any piece is rejected everything rolls back and
    // the ledger is untouched.
    character.apply_bundle(bundle(DOOM_OVERLAY_SECONDS))?;

    let remaining = character.ledger.decrement(AbilityKey::Doom)?;
    character.doom_active = true;

    let temp_hp = progression::doom_temp_hp(character.level);
    character.temp_hp = character.temp_hp.max(temp_hp);

    let refreshed = recovery::on_doom_activated(character, config);

    Ok(Some(DoomActivation {
        temp_hp,
        remaining,
        refreshed,
    }))
}

/// End the Doom transformation.
///
/// Removes every effect tagged as part of the Doom bundle, by tag lookup
/// rather than recomputation. Temporary hit points are left in place.
/// Returns false when Doom was already inactive: an idempotent no-op.
pub fn deactivate(character: &mut Character) -> bool {
    if !character.doom_active {
        return false;
    }
    character.doom_active = false;
    character.remove_effects_tagged(EffectTag::Doom);
    true
}

/// The Doom effect bundle: physical resistances, Strength advantage, and
/// the concentration bar.
fn bundle(overlay_seconds: u32) -> Vec<AppliedEffect> {
    let duration = EffectDuration::Seconds(overlay_seconds);
    [
        Effect::Resistance(DamageKind::Bludgeoning),
        Effect::Resistance(DamageKind::Piercing),
        Effect::Resistance(DamageKind::Slashing),
        Effect::AdvantageOnStrength,
        Effect::NoConcentration,
    ]
    .into_iter()
    .map(|effect| AppliedEffect::with_duration(EffectTag::Doom, effect, duration))
    .collect()
}
