//! Outbound messages and their plain-text bodies.
//!
//! The session returns these for the host layer to deliver; the bodies
//! are plain text, markup is the host's business.

use serde::{Deserialize, Serialize};

use metal_rules::casting::CastingCheck;
use metal_rules::doom::DoomActivation;
use metal_rules::initiative::InitiativeRoll;
use metal_rules::malediction::UseOutcome;
use metal_rules::recovery::RestRecovery;

/// One instruction for the host layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostMessage {
    /// Show a transient warning to the acting user.
    Notification(String),
    /// Post a chat message.
    Chat {
        /// Who the message is spoken as.
        speaker: String,
        /// Plain-text body.
        content: String,
    },
    /// Re-render the character sheet.
    RenderSheet,
    /// Cancel the in-flight item use.
    CancelItemUse,
}

impl HostMessage {
    /// A notification message.
    pub fn notify(text: impl Into<String>) -> Self {
        Self::Notification(text.into())
    }

    /// A chat message.
    pub fn chat(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Chat {
            speaker: speaker.into(),
            content: content.into(),
        }
    }
}

/// Chat body for a Doom activation.
pub fn doom_activation(activation: &DoomActivation, refreshed_names: &[&str]) -> String {
    let mut text = format!(
        "The Doom takes hold: {} temporary hit points, {} uses remaining.",
        activation.temp_hp, activation.remaining
    );
    if !refreshed_names.is_empty() {
        text.push_str(&format!(" Refreshed: {}.", refreshed_names.join(", ")));
    }
    text
}

/// Chat body for ending the Doom transformation.
pub fn doom_end() -> String {
    "The Doom transformation ends.".to_string()
}

/// Chat body for a malediction use.
pub fn malediction_use(outcome: &UseOutcome) -> String {
    let mut text = outcome.name.to_string();
    if outcome.consumed {
        text.push_str(&format!(" ({} remaining)", outcome.remaining));
    }
    text.push('.');
    if let Some(target) = &outcome.cursed_target {
        text.push_str(&format!("\n{target} is cursed."));
    }
    if let Some(note) = &outcome.note {
        text.push('\n');
        text.push_str(note);
    }
    text
}

/// Chat body for a stress change.
pub fn stress_announcement(name: &str, level: u32, penalty: i32) -> String {
    if level == 0 {
        format!("{name} is calm again.")
    } else {
        format!("{name}'s stress is now {level} ({penalty} to d20 rolls).")
    }
}

/// Chat body for a long-rest recovery.
pub fn rest_recovery(recovery: &RestRecovery, refreshed_names: &[&str]) -> String {
    let mut text = format!("Long rest: {} Doom uses restored.", recovery.doom_uses);
    if !refreshed_names.is_empty() {
        text.push_str(&format!(" Refreshed: {}.", refreshed_names.join(", ")));
    }
    text
}

/// Chat body for a casting check.
pub fn casting_result(check: &CastingCheck) -> String {
    let mut text = format!("Level {} spell, {check}.", check.spell_level);
    if !check.success {
        text.push_str("\nThe spell fizzles; the slot is spent.");
    }
    text
}

/// Chat body for an initiative roll.
pub fn initiative(roll: &InitiativeRoll) -> String {
    format!("Initiative: {roll}")
}
