//! The gating evaluator: may this ability be used right now?
//!
//! Pure decision logic over the character and an environment snapshot.
//! The usage-model check runs first because it is cheap; ability-specific
//! preconditions (armor, lighting, targeting) run only once it passes, and
//! the first failing predicate determines the denial reason.

use serde::{Deserialize, Serialize};

use crate::ability::{AbilityKey, MaledictionDef, MaledictionId, UsageModel};
use crate::character::Character;
use crate::effect::EffectTag;

/// Ambient lighting at the character's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lighting {
    /// Bright light.
    #[default]
    Bright,
    /// Dim light.
    Dim,
    /// Darkness.
    Darkness,
}

/// A targeted creature, as snapshotted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Display name of the target.
    pub name: String,
    /// Distance from the character in feet.
    pub distance_ft: u32,
}

/// Snapshot of the environment at the moment of use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseContext {
    /// Ambient lighting.
    pub lighting: Lighting,
    /// Creatures the user currently targets.
    pub targets: Vec<Target>,
}

impl UseContext {
    /// Snapshot with the given lighting and no targets.
    pub fn in_lighting(lighting: Lighting) -> Self {
        Self {
            lighting,
            targets: Vec::new(),
        }
    }

    /// Add a target to the snapshot.
    pub fn with_target(mut self, name: impl Into<String>, distance_ft: u32) -> Self {
        self.targets.push(Target {
            name: name.into(),
            distance_ft,
        });
        self
    }
}

/// Why an ability use was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The ability's ledger entry is spent.
    NoUsesRemaining,
    /// The ability works only in Doom form.
    RequiresDoomForm,
    /// The ability works only while unarmored.
    WearingArmor,
    /// The ability is already in force.
    AlreadyActive(String),
    /// The ability needs dim light or darkness.
    NotInDarkness,
    /// A target must be selected first; nothing was consumed.
    AwaitingTarget,
    /// Only a single target is allowed.
    TooManyTargets,
    /// The selected target is beyond the ability's range.
    OutOfRange {
        /// Distance to the target in feet.
        distance_ft: u32,
        /// Maximum range in feet.
        range_ft: u32,
    },
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoUsesRemaining => write!(f, "no uses remaining"),
            Self::RequiresDoomForm => write!(f, "requires active transformation"),
            Self::WearingArmor => write!(f, "cannot be used while wearing armor"),
            Self::AlreadyActive(name) => write!(f, "{name} is already active"),
            Self::NotInDarkness => write!(f, "requires dim light or darkness"),
            Self::AwaitingTarget => write!(f, "select a target first"),
            Self::TooManyTargets => write!(f, "can only target one creature"),
            Self::OutOfRange {
                distance_ft,
                range_ft,
            } => write!(f, "target is {distance_ft} ft away, range is {range_ft} ft"),
        }
    }
}

/// The verdict of the gating evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// The ability may be used.
    Allowed,
    /// The ability may not be used, and why.
    Denied(DenyReason),
}

impl Gate {
    /// Returns true for [`Gate::Allowed`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Evaluate whether a malediction can be used right now.
pub fn can_use(character: &Character, def: &MaledictionDef, ctx: &UseContext) -> Gate {
    // Usage model first: cheap, and short-circuits before any
    // environment or targeting work.
    match def.usage {
        UsageModel::Unlimited | UsageModel::Permanent => {}
        UsageModel::DoomRefresh => {
            if character.ledger.get(AbilityKey::Malediction(def.id)) == 0 {
                return Gate::Denied(DenyReason::NoUsesRemaining);
            }
        }
        UsageModel::DoomOnly => {
            if !character.doom_active {
                return Gate::Denied(DenyReason::RequiresDoomForm);
            }
        }
    }

    match def.id {
        MaledictionId::EvilEye => check_single_target(def, ctx),
        MaledictionId::HexArmor => check_hex_armor(character),
        MaledictionId::ShadowStep | MaledictionId::ShroudOfDarkness => check_darkness(ctx),
        MaledictionId::UnholyFury
        | MaledictionId::BrutalFury
        | MaledictionId::HexShield
        | MaledictionId::ImprovedShadowStep => Gate::Allowed,
    }
}

fn check_single_target(def: &MaledictionDef, ctx: &UseContext) -> Gate {
    if ctx.targets.is_empty() {
        return Gate::Denied(DenyReason::AwaitingTarget);
    }
    if ctx.targets.len() > 1 {
        return Gate::Denied(DenyReason::TooManyTargets);
    }
    let target = &ctx.targets[0];
    if let Some(range_ft) = def.range_ft
        && target.distance_ft > range_ft
    {
        return Gate::Denied(DenyReason::OutOfRange {
            distance_ft: target.distance_ft,
            range_ft,
        });
    }
    Gate::Allowed
}

fn check_hex_armor(character: &Character) -> Gate {
    if character.wearing_armor {
        return Gate::Denied(DenyReason::WearingArmor);
    }
    if character.has_effect_tag(EffectTag::Malediction(MaledictionId::HexArmor)) {
        return Gate::Denied(DenyReason::AlreadyActive("Hex Armor".to_string()));
    }
    Gate::Allowed
}

fn check_darkness(ctx: &UseContext) -> Gate {
    match ctx.lighting {
        Lighting::Dim | Lighting::Darkness => Gate::Allowed,
        Lighting::Bright => Gate::Denied(DenyReason::NotInDarkness),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityKey;
    use crate::config::ClassConfig;
    use crate::effect::{AppliedEffect, Effect};

    fn setup(id: MaledictionId) -> (Character, ClassConfig) {
        let mut character = Character::new("Vex", 9);
        character.maledictions.push(id);
        (character, ClassConfig::standard())
    }

    #[test]
    fn doom_refresh_requires_uses() {
        let (mut character, config) = setup(MaledictionId::EvilEye);
        let def = config.malediction(MaledictionId::EvilEye).unwrap();
        let ctx = UseContext::default().with_target("Ghoul", 30);

        assert_eq!(
            can_use(&character, def, &ctx),
            Gate::Denied(DenyReason::NoUsesRemaining)
        );

        character
            .ledger
            .set(AbilityKey::Malediction(MaledictionId::EvilEye), 1);
        assert!(can_use(&character, def, &ctx).is_allowed());
    }

    #[test]
    fn doom_only_requires_active_form() {
        let (mut character, config) = setup(MaledictionId::UnholyFury);
        let def = config.malediction(MaledictionId::UnholyFury).unwrap();
        let ctx = UseContext::default();

        let gate = can_use(&character, def, &ctx);
        assert_eq!(gate, Gate::Denied(DenyReason::RequiresDoomForm));
        if let Gate::Denied(reason) = gate {
            assert_eq!(reason.to_string(), "requires active transformation");
        }

        character.doom_active = true;
        assert!(can_use(&character, def, &ctx).is_allowed());
    }

    #[test]
    fn usage_model_denies_before_preconditions() {
        // Evil Eye with no uses and no target: the usage model wins.
        let (character, config) = setup(MaledictionId::EvilEye);
        let def = config.malediction(MaledictionId::EvilEye).unwrap();
        assert_eq!(
            can_use(&character, def, &UseContext::default()),
            Gate::Denied(DenyReason::NoUsesRemaining)
        );
    }

    #[test]
    fn evil_eye_targeting() {
        let (mut character, config) = setup(MaledictionId::EvilEye);
        character
            .ledger
            .set(AbilityKey::Malediction(MaledictionId::EvilEye), 1);
        let def = config.malediction(MaledictionId::EvilEye).unwrap();

        assert_eq!(
            can_use(&character, def, &UseContext::default()),
            Gate::Denied(DenyReason::AwaitingTarget)
        );
        assert_eq!(
            can_use(
                &character,
                def,
                &UseContext::default()
                    .with_target("Ghoul", 20)
                    .with_target("Wight", 25)
            ),
            Gate::Denied(DenyReason::TooManyTargets)
        );
        assert_eq!(
            can_use(
                &character,
                def,
                &UseContext::default().with_target("Ghoul", 80)
            ),
            Gate::Denied(DenyReason::OutOfRange {
                distance_ft: 80,
                range_ft: 60
            })
        );
        assert!(
            can_use(
                &character,
                def,
                &UseContext::default().with_target("Ghoul", 60)
            )
            .is_allowed()
        );
    }

    #[test]
    fn hex_armor_preconditions() {
        let (mut character, config) = setup(MaledictionId::HexArmor);
        let def = config.malediction(MaledictionId::HexArmor).unwrap();
        let ctx = UseContext::default();

        assert!(can_use(&character, def, &ctx).is_allowed());

        character.wearing_armor = true;
        assert_eq!(
            can_use(&character, def, &ctx),
            Gate::Denied(DenyReason::WearingArmor)
        );

        character.wearing_armor = false;
        character.effects.push(AppliedEffect::new(
            EffectTag::Malediction(MaledictionId::HexArmor),
            Effect::AcProficiencyBonus,
        ));
        assert_eq!(
            can_use(&character, def, &ctx),
            Gate::Denied(DenyReason::AlreadyActive("Hex Armor".to_string()))
        );
    }

    #[test]
    fn shadow_step_needs_darkness() {
        let (mut character, config) = setup(MaledictionId::ShadowStep);
        character
            .ledger
            .set(AbilityKey::Malediction(MaledictionId::ShadowStep), 1);
        let def = config.malediction(MaledictionId::ShadowStep).unwrap();

        assert_eq!(
            can_use(&character, def, &UseContext::in_lighting(Lighting::Bright)),
            Gate::Denied(DenyReason::NotInDarkness)
        );
        assert!(can_use(&character, def, &UseContext::in_lighting(Lighting::Dim)).is_allowed());
        assert!(
            can_use(
                &character,
                def,
                &UseContext::in_lighting(Lighting::Darkness)
            )
            .is_allowed()
        );
    }
}
