//! The event-handling session.
//!
//! `ModuleSession` processes one host event to completion against one
//! character and returns the messages the host should deliver. Rule
//! denials stop at this boundary as warning notifications; nothing
//! propagates past it.

use rand::SeedableRng;
use rand::rngs::StdRng;

use metal_rules::ability::AbilityKey;
use metal_rules::character::Derived;
use metal_rules::gating::UseContext;
use metal_rules::{
    Character, ClassConfig, MaledictionId, RulesError, casting, doom, initiative, malediction,
    progression, recovery, stress,
};

use crate::error::ModuleResult;
use crate::event::{HostEvent, ItemUse, RestKind};
use crate::message::{self, HostMessage};
use crate::settings::ModuleSettings;

/// Decode a character from the host's stored actor data.
pub fn load_character(json: &str) -> ModuleResult<Character> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a character for storage on the actor.
pub fn store_character(character: &Character) -> ModuleResult<String> {
    Ok(serde_json::to_string(character)?)
}

/// An event-handling session for one table.
pub struct ModuleSession {
    config: ClassConfig,
    settings: ModuleSettings,
    rng: StdRng,
}

impl ModuleSession {
    /// Create a session with OS-seeded dice.
    pub fn new(settings: ModuleSettings) -> Self {
        Self {
            config: ClassConfig::standard(),
            settings,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a session with deterministic dice.
    pub fn seeded(settings: ModuleSettings, seed: u64) -> Self {
        Self {
            config: ClassConfig::standard(),
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Get the class configuration.
    pub fn config(&self) -> &ClassConfig {
        &self.config
    }

    /// Get the settings.
    pub fn settings(&self) -> &ModuleSettings {
        &self.settings
    }

    /// Recompute the character's derived data for the host's data
    /// preparation pass.
    pub fn prepare_actor_data(&self, character: &Character) -> Derived {
        character.derived()
    }

    /// Process one host event to completion.
    pub fn handle(&mut self, character: &mut Character, event: HostEvent) -> Vec<HostMessage> {
        match event {
            HostEvent::ItemUsed(ItemUse::DoomTransformation) => self.toggle_doom(character),
            HostEvent::ItemUsed(ItemUse::Malediction { id, ctx }) => {
                self.use_malediction(character, id, &ctx)
            }
            HostEvent::ItemUsed(ItemUse::Spell {
                level,
                casting_modifier,
            }) => self.cast_spell(character, level, casting_modifier),
            HostEvent::RestCompleted(RestKind::Short) => Vec::new(),
            HostEvent::RestCompleted(RestKind::Long) => self.long_rest(character),
            HostEvent::SelectionSaved(ids) => self.save_selection(character, &ids),
            HostEvent::StressSet(level) => self.set_stress(character, level),
            HostEvent::StressReset => self.reset_stress(character),
            HostEvent::DoomRecovered => recover_doom(character),
            HostEvent::InitiativeRequested { modifier } => self.roll_initiative(character, modifier),
        }
    }

    fn toggle_doom(&mut self, character: &mut Character) -> Vec<HostMessage> {
        if character.doom_active {
            doom::deactivate(character);
            return vec![
                HostMessage::chat(character.name.clone(), message::doom_end()),
                HostMessage::RenderSheet,
            ];
        }
        match doom::activate(character, &self.config) {
            Ok(Some(activation)) => {
                let names = self.names(&activation.refreshed);
                vec![
                    HostMessage::chat(
                        character.name.clone(),
                        message::doom_activation(&activation, &names),
                    ),
                    HostMessage::RenderSheet,
                ]
            }
            Ok(None) => Vec::new(),
            Err(err) => deny(err),
        }
    }

    fn use_malediction(
        &mut self,
        character: &mut Character,
        id: MaledictionId,
        ctx: &UseContext,
    ) -> Vec<HostMessage> {
        match malediction::use_malediction(character, &self.config, id, ctx) {
            Ok(outcome) => vec![
                HostMessage::chat(character.name.clone(), message::malediction_use(&outcome)),
                HostMessage::RenderSheet,
            ],
            Err(err) => deny(err),
        }
    }

    fn cast_spell(
        &mut self,
        character: &mut Character,
        level: u32,
        modifier: i32,
    ) -> Vec<HostMessage> {
        // Cantrips cast without a check; no messages, the item proceeds.
        let Some(check) = casting::roll_to_cast(level, modifier, &mut self.rng) else {
            return Vec::new();
        };
        let mut messages = vec![HostMessage::chat(
            character.name.clone(),
            message::casting_result(&check),
        )];
        if !check.success {
            // The slot is already spent; only the spell's effects stop.
            messages.push(HostMessage::CancelItemUse);
        }
        messages
    }

    fn long_rest(&mut self, character: &mut Character) -> Vec<HostMessage> {
        let rest = recovery::on_long_rest(character, &self.config);
        let names = self.names(&rest.refreshed);
        vec![
            HostMessage::chat(character.name.clone(), message::rest_recovery(&rest, &names)),
            HostMessage::RenderSheet,
        ]
    }

    fn save_selection(
        &mut self,
        character: &mut Character,
        ids: &[MaledictionId],
    ) -> Vec<HostMessage> {
        match malediction::save_selection(character, &self.config, ids) {
            Ok(()) => vec![
                HostMessage::notify("Maledictions saved."),
                HostMessage::RenderSheet,
            ],
            Err(err) => vec![HostMessage::notify(err.to_string())],
        }
    }

    fn set_stress(&mut self, character: &mut Character, level: u32) -> Vec<HostMessage> {
        let stored = stress::set_stress(character, level);
        self.stress_messages(character, stored)
    }

    fn reset_stress(&mut self, character: &mut Character) -> Vec<HostMessage> {
        stress::reset_stress(character);
        self.stress_messages(character, 0)
    }

    fn stress_messages(&self, character: &Character, level: u32) -> Vec<HostMessage> {
        let mut messages = Vec::new();
        if self.settings.announce_stress {
            let penalty = stress::PENALTY_PER_LEVEL * level as i32;
            messages.push(HostMessage::chat(
                character.name.clone(),
                message::stress_announcement(&character.name, level, penalty),
            ));
        }
        messages.push(HostMessage::RenderSheet);
        messages
    }

    fn roll_initiative(&mut self, character: &Character, modifier: i32) -> Vec<HostMessage> {
        let roll = initiative::roll_initiative(self.settings.initiative_die, modifier, &mut self.rng);
        vec![HostMessage::chat(
            character.name.clone(),
            message::initiative(&roll),
        )]
    }

    fn names(&self, ids: &[MaledictionId]) -> Vec<&str> {
        ids.iter()
            .filter_map(|&id| self.config.malediction(id))
            .map(|def| def.name)
            .collect()
    }
}

fn recover_doom(character: &mut Character) -> Vec<HostMessage> {
    let max = progression::doom_uses(character.level);
    character.ledger.set(AbilityKey::Doom, max);
    vec![
        HostMessage::notify(format!("Doom uses restored: {max}.")),
        HostMessage::RenderSheet,
    ]
}

/// A rule denial becomes a warning and a cancel; state is unchanged.
fn deny(err: RulesError) -> Vec<HostMessage> {
    vec![
        HostMessage::notify(err.to_string()),
        HostMessage::CancelItemUse,
    ]
}
