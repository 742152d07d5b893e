//! Malediction selection and use.
//!
//! Selection is bounded by the level's slot count and enforced at save
//! time only (levelling down never retroactively strips picks). Use runs
//! gate, then the power's handler, and consumes a use only for
//! doom-refresh powers, only after the handler succeeds.

use crate::ability::{AbilityKey, MaledictionDef, MaledictionId, UsageModel};
use crate::character::Character;
use crate::config::ClassConfig;
use crate::effect::{AppliedEffect, Effect, EffectDuration, EffectTag};
use crate::error::{RulesError, RulesResult};
use crate::gating::{self, DenyReason, Gate, UseContext};
use crate::ledger::Uses;
use crate::progression;

/// The result of a successful malediction use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseOutcome {
    /// Which power was used.
    pub id: MaledictionId,
    /// Display name of the power.
    pub name: &'static str,
    /// Whether a ledger use was spent.
    pub consumed: bool,
    /// Uses remaining after this one.
    pub remaining: Uses,
    /// Rules reminder for the chat message.
    pub note: Option<String>,
    /// Name of the creature cursed, for powers that land an effect on a
    /// foreign actor; the host applies that effect.
    pub cursed_target: Option<String>,
}

/// Replace the character's malediction selection.
///
/// Validates capacity and level requirements before touching anything, so
/// a rejected save leaves the previous selection intact. Removed powers
/// lose their ledger entry and any active effect bundle; newly picked
/// doom-refresh powers start with one use.
pub fn save_selection(
    character: &mut Character,
    config: &ClassConfig,
    selection: &[MaledictionId],
) -> RulesResult<()> {
    // Ordered set semantics: a duplicated pick collapses to one.
    let mut picks: Vec<MaledictionId> = Vec::new();
    for &id in selection {
        if !picks.contains(&id) {
            picks.push(id);
        }
    }

    let slots = progression::malediction_slots(character.level);
    if picks.len() > slots {
        return Err(RulesError::InvalidSelection {
            chosen: picks.len(),
            slots,
            level: character.level,
        });
    }
    for &id in &picks {
        let def = lookup(config, id)?;
        if def.min_level > character.level {
            return Err(RulesError::LevelRequirement {
                name: def.name.to_string(),
                required: def.min_level,
            });
        }
    }

    let removed: Vec<MaledictionId> = character
        .maledictions
        .iter()
        .copied()
        .filter(|id| !picks.contains(id))
        .collect();
    for id in removed {
        character.ledger.remove(AbilityKey::Malediction(id));
        character.remove_effects_tagged(EffectTag::Malediction(id));
    }

    for &id in &picks {
        let def = lookup(config, id)?;
        let key = AbilityKey::Malediction(id);
        if def.usage == UsageModel::DoomRefresh && !character.ledger.contains(key) {
            character.ledger.set(key, 1);
        }
    }

    character.maledictions = picks;
    Ok(())
}

/// Use a selected malediction.
///
/// A denial consumes nothing; in particular a missing target reports
/// `AwaitingInput` so the user can target and re-invoke.
pub fn use_malediction(
    character: &mut Character,
    config: &ClassConfig,
    id: MaledictionId,
    ctx: &UseContext,
) -> RulesResult<UseOutcome> {
    let def = lookup(config, id)?;
    if !character.has_selected(id) {
        return Err(RulesError::NotSelected(def.name.to_string()));
    }

    match gating::can_use(character, def, ctx) {
        Gate::Allowed => {}
        Gate::Denied(reason) => return Err(deny_to_error(def, reason)),
    }

    let output = apply_effect(character, def, ctx)?;

    let (consumed, remaining) = if def.usage == UsageModel::DoomRefresh {
        let left = character.ledger.decrement(AbilityKey::Malediction(id))?;
        (true, Uses::Limited(left))
    } else {
        (false, Uses::Unlimited)
    };

    Ok(UseOutcome {
        id,
        name: def.name,
        consumed,
        remaining,
        note: output.note,
        cursed_target: output.cursed_target,
    })
}

fn lookup(config: &ClassConfig, id: MaledictionId) -> RulesResult<&MaledictionDef> {
    config
        .malediction(id)
        .ok_or_else(|| RulesError::UnknownMalediction(id.to_string()))
}

fn deny_to_error(def: &MaledictionDef, reason: DenyReason) -> RulesError {
    match reason {
        DenyReason::NoUsesRemaining => RulesError::InsufficientUses(def.name.to_string()),
        DenyReason::AwaitingTarget => {
            let range = def.range_ft.unwrap_or(0);
            RulesError::AwaitingInput(format!(
                "select a target within {range} feet for {}, then use it again",
                def.name
            ))
        }
        other => RulesError::PreconditionNotMet(other),
    }
}

/// What a handler produced beyond its attached effects.
struct HandlerOutput {
    note: Option<String>,
    cursed_target: Option<String>,
}

impl HandlerOutput {
    fn note(text: impl Into<String>) -> Self {
        Self {
            note: Some(text.into()),
            cursed_target: None,
        }
    }
}

/// Dispatch to the power's effect handler. Every handler has the same
/// signature; the closed enum replaces dispatch by string identifier.
fn apply_effect(
    character: &mut Character,
    def: &MaledictionDef,
    ctx: &UseContext,
) -> RulesResult<HandlerOutput> {
    match def.id {
        MaledictionId::EvilEye => evil_eye(character, def, ctx),
        MaledictionId::HexArmor => hex_armor(character, def, ctx),
        MaledictionId::ShadowStep => shadow_step(character, def, ctx),
        MaledictionId::UnholyFury => unholy_fury(character, def, ctx),
        MaledictionId::BrutalFury => brutal_fury(character, def, ctx),
        MaledictionId::HexShield => hex_shield(character, def, ctx),
        MaledictionId::ImprovedShadowStep => improved_shadow_step(character, def, ctx),
        MaledictionId::ShroudOfDarkness => shroud_of_darkness(character, def, ctx),
    }
}

fn evil_eye(
    _character: &mut Character,
    def: &MaledictionDef,
    ctx: &UseContext,
) -> RulesResult<HandlerOutput> {
    let target = ctx
        .targets
        .first()
        .ok_or_else(|| deny_to_error(def, DenyReason::AwaitingTarget))?;
    Ok(HandlerOutput {
        note: Some(format!(
            "The first attack roll, ability check, or saving throw {} makes has disadvantage.",
            target.name
        )),
        cursed_target: Some(target.name.clone()),
    })
}

fn hex_armor(
    character: &mut Character,
    _def: &MaledictionDef,
    _ctx: &UseContext,
) -> RulesResult<HandlerOutput> {
    character.apply_bundle(vec![AppliedEffect::new(
        EffectTag::Malediction(MaledictionId::HexArmor),
        Effect::AcProficiencyBonus,
    )])?;
    Ok(HandlerOutput::note(
        "Proficiency bonus added to AC while unarmored.",
    ))
}

fn shadow_step(
    _character: &mut Character,
    _def: &MaledictionDef,
    _ctx: &UseContext,
) -> RulesResult<HandlerOutput> {
    Ok(HandlerOutput::note(
        "Cast Misty Step: teleport up to 30 feet to an unoccupied space you can see.",
    ))
}

fn unholy_fury(
    character: &mut Character,
    _def: &MaledictionDef,
    _ctx: &UseContext,
) -> RulesResult<HandlerOutput> {
    let tag = EffectTag::Malediction(MaledictionId::UnholyFury);
    character.apply_bundle(vec![
        AppliedEffect::with_duration(
            tag,
            Effect::AdvantageOnStrengthMelee,
            EffectDuration::Rounds(1),
        ),
        AppliedEffect::with_duration(
            tag,
            Effect::AttackersHaveAdvantage,
            EffectDuration::Rounds(1),
        ),
    ])?;
    Ok(HandlerOutput::note(
        "Advantage on Strength-based melee attacks until your next turn, but attacks \
         against you have advantage.",
    ))
}

fn brutal_fury(
    character: &mut Character,
    _def: &MaledictionDef,
    _ctx: &UseContext,
) -> RulesResult<HandlerOutput> {
    let die = progression::doom_die(character.level);
    character.apply_bundle(vec![AppliedEffect::with_duration(
        EffectTag::Malediction(MaledictionId::BrutalFury),
        Effect::BrutalFuryReady,
        EffectDuration::Rounds(10),
    )])?;
    Ok(HandlerOutput::note(format!(
        "On your next hit, forgo advantage to deal 2{die} extra necrotic damage."
    )))
}

fn hex_shield(
    character: &mut Character,
    _def: &MaledictionDef,
    _ctx: &UseContext,
) -> RulesResult<HandlerOutput> {
    let die = progression::doom_die(character.level);
    character.apply_bundle(vec![AppliedEffect::with_duration(
        EffectTag::Malediction(MaledictionId::HexShield),
        Effect::HexShieldReady,
        EffectDuration::Rounds(10),
    )])?;
    Ok(HandlerOutput::note(format!(
        "When damaged by an attack within 5 feet, deal 1{die} necrotic damage to the attacker."
    )))
}

fn improved_shadow_step(
    character: &mut Character,
    _def: &MaledictionDef,
    _ctx: &UseContext,
) -> RulesResult<HandlerOutput> {
    let dc = 8 + character.proficiency as i32 + character.constitution_mod;
    Ok(HandlerOutput::note(format!(
        "Cast Misty Step and optionally bring one creature; an unwilling creature \
         resists with a Charisma save (DC {dc})."
    )))
}

fn shroud_of_darkness(
    character: &mut Character,
    _def: &MaledictionDef,
    _ctx: &UseContext,
) -> RulesResult<HandlerOutput> {
    let tag = EffectTag::Malediction(MaledictionId::ShroudOfDarkness);
    character.apply_bundle(vec![
        AppliedEffect::with_duration(tag, Effect::Invisible, EffectDuration::Seconds(60)),
        AppliedEffect::with_duration(tag, Effect::AdvantageOnAttacks, EffectDuration::Seconds(60)),
    ])?;
    Ok(HandlerOutput::note(
        "Cast Greater Invisibility on yourself.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gating::Lighting;
    use proptest::prelude::*;

    fn setup(level: u32, selection: &[MaledictionId]) -> (Character, ClassConfig) {
        let mut character = Character::new("Vex", level);
        let config = ClassConfig::standard();
        save_selection(&mut character, &config, selection).unwrap();
        (character, config)
    }

    #[test]
    fn selection_initializes_doom_refresh_ledger() {
        let (character, _) = setup(9, &[MaledictionId::EvilEye, MaledictionId::HexArmor]);
        assert_eq!(
            character
                .ledger
                .get(AbilityKey::Malediction(MaledictionId::EvilEye)),
            1
        );
        // Permanent powers have no entry.
        assert!(
            !character
                .ledger
                .contains(AbilityKey::Malediction(MaledictionId::HexArmor))
        );
    }

    #[test]
    fn reselection_does_not_refill_spent_uses() {
        let (mut character, config) = setup(9, &[MaledictionId::EvilEye]);
        character
            .ledger
            .set(AbilityKey::Malediction(MaledictionId::EvilEye), 0);

        save_selection(
            &mut character,
            &config,
            &[MaledictionId::EvilEye, MaledictionId::HexArmor],
        )
        .unwrap();
        assert_eq!(
            character
                .ledger
                .get(AbilityKey::Malediction(MaledictionId::EvilEye)),
            0
        );
    }

    #[test]
    fn over_capacity_save_is_rejected_unchanged() {
        // Level 9 has 2 slots; a third pick must bounce.
        let (mut character, config) = setup(9, &[MaledictionId::EvilEye]);
        let err = save_selection(
            &mut character,
            &config,
            &[
                MaledictionId::EvilEye,
                MaledictionId::HexArmor,
                MaledictionId::ShadowStep,
            ],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            RulesError::InvalidSelection {
                chosen: 3,
                slots: 2,
                level: 9
            }
        ));
        assert_eq!(character.maledictions, vec![MaledictionId::EvilEye]);
    }

    #[test]
    fn level_requirement_enforced() {
        let mut character = Character::new("Vex", 2);
        let config = ClassConfig::standard();
        let err = save_selection(&mut character, &config, &[MaledictionId::BrutalFury])
            .unwrap_err();
        assert!(matches!(err, RulesError::LevelRequirement { required: 9, .. }));
        assert!(character.maledictions.is_empty());
    }

    #[test]
    fn duplicate_picks_collapse() {
        let (character, _) = setup(9, &[MaledictionId::EvilEye, MaledictionId::EvilEye]);
        assert_eq!(character.maledictions, vec![MaledictionId::EvilEye]);
    }

    #[test]
    fn deselection_drops_ledger_and_reverses_bundle() {
        let (mut character, config) = setup(9, &[MaledictionId::HexArmor]);
        use_malediction(
            &mut character,
            &config,
            MaledictionId::HexArmor,
            &UseContext::default(),
        )
        .unwrap();
        assert!(character.has_effect(Effect::AcProficiencyBonus));

        save_selection(&mut character, &config, &[MaledictionId::EvilEye]).unwrap();
        assert!(!character.has_effect(Effect::AcProficiencyBonus));
        assert!(
            !character
                .ledger
                .contains(AbilityKey::Malediction(MaledictionId::HexArmor))
        );
    }

    #[test]
    fn use_at_zero_never_changes_ledger() {
        let (mut character, config) = setup(9, &[MaledictionId::EvilEye]);
        character
            .ledger
            .set(AbilityKey::Malediction(MaledictionId::EvilEye), 0);
        let ctx = UseContext::default().with_target("Ghoul", 30);

        let err =
            use_malediction(&mut character, &config, MaledictionId::EvilEye, &ctx).unwrap_err();
        assert!(matches!(err, RulesError::InsufficientUses(_)));
        assert_eq!(
            character
                .ledger
                .get(AbilityKey::Malediction(MaledictionId::EvilEye)),
            0
        );
    }

    #[test]
    fn doom_only_use_while_inactive_is_denied() {
        let (mut character, config) = setup(9, &[MaledictionId::UnholyFury]);
        let err = use_malediction(
            &mut character,
            &config,
            MaledictionId::UnholyFury,
            &UseContext::default(),
        )
        .unwrap_err();

        match err {
            RulesError::PreconditionNotMet(reason) => {
                assert_eq!(reason.to_string(), "requires active transformation");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(character.effects.is_empty());
    }

    #[test]
    fn awaiting_input_consumes_nothing() {
        let (mut character, config) = setup(9, &[MaledictionId::EvilEye]);
        let err = use_malediction(
            &mut character,
            &config,
            MaledictionId::EvilEye,
            &UseContext::default(),
        )
        .unwrap_err();

        assert!(matches!(err, RulesError::AwaitingInput(_)));
        assert_eq!(
            character
                .ledger
                .get(AbilityKey::Malediction(MaledictionId::EvilEye)),
            1
        );
    }

    #[test]
    fn evil_eye_curses_and_consumes() {
        let (mut character, config) = setup(9, &[MaledictionId::EvilEye]);
        let ctx = UseContext::default().with_target("Ghoul", 30);

        let outcome =
            use_malediction(&mut character, &config, MaledictionId::EvilEye, &ctx).unwrap();
        assert!(outcome.consumed);
        assert_eq!(outcome.remaining, Uses::Limited(0));
        assert_eq!(outcome.cursed_target.as_deref(), Some("Ghoul"));
    }

    #[test]
    fn unselected_power_is_rejected() {
        let (mut character, config) = setup(9, &[MaledictionId::EvilEye]);
        let err = use_malediction(
            &mut character,
            &config,
            MaledictionId::HexArmor,
            &UseContext::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RulesError::NotSelected(_)));
    }

    #[test]
    fn doom_only_use_applies_effects_without_ledger() {
        let (mut character, config) = setup(9, &[MaledictionId::UnholyFury]);
        character.doom_active = true;

        let outcome = use_malediction(
            &mut character,
            &config,
            MaledictionId::UnholyFury,
            &UseContext::default(),
        )
        .unwrap();
        assert!(!outcome.consumed);
        assert_eq!(outcome.remaining, Uses::Unlimited);

        let derived = character.derived();
        assert!(derived.advantage_on_strength_melee);
        assert!(derived.attackers_have_advantage);
    }

    #[test]
    fn shroud_applies_in_darkness_and_spends_a_use() {
        let (mut character, config) = setup(9, &[MaledictionId::ShroudOfDarkness]);
        let ctx = UseContext::in_lighting(Lighting::Darkness);

        let outcome = use_malediction(
            &mut character,
            &config,
            MaledictionId::ShroudOfDarkness,
            &ctx,
        )
        .unwrap();
        assert!(outcome.consumed);
        assert!(character.derived().invisible);
        assert!(character.derived().advantage_on_attacks);
    }

    proptest! {
        /// The selection capacity invariant holds after every save, at
        /// every level: a save either succeeds within the slot count or
        /// leaves the previous (valid) selection untouched.
        #[test]
        fn selection_never_exceeds_slots(level in 1u32..=20, picks in 0usize..=8) {
            let mut character = Character::new("Vex", level);
            let config = ClassConfig::standard();
            let selection = &MaledictionId::ALL[..picks];

            let _ = save_selection(&mut character, &config, selection);
            prop_assert!(
                character.maledictions.len() <= progression::malediction_slots(level)
            );
        }

        /// Resetting a ledger entry twice is the same as resetting once.
        #[test]
        fn reset_to_max_is_idempotent(spent in 0u32..=1, level in 1u32..=20) {
            let mut character = Character::new("Vex", level);
            let config = ClassConfig::standard();
            let key = AbilityKey::Malediction(MaledictionId::EvilEye);
            character.ledger.set(key, spent);

            crate::recovery::on_long_rest(&mut character, &config);
            let once = character.ledger.clone();
            crate::recovery::on_long_rest(&mut character, &config);
            prop_assert_eq!(character.ledger, once);
        }
    }
}
