//! Inbound host events.
//!
//! Each variant is one hook firing on the host side: an item being used,
//! a rest completing, a sheet button, an initiative request. The session
//! processes exactly one event at a time against one character.

use serde::{Deserialize, Serialize};

use metal_rules::MaledictionId;
use metal_rules::gating::UseContext;

/// Which kind of rest just completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestKind {
    /// A short rest. Recovers nothing for this class.
    Short,
    /// A long rest.
    Long,
}

/// A class item being used from the sheet or hotbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemUse {
    /// The Doom transformation item. Toggles the form.
    DoomTransformation,
    /// A malediction item, with the environment at the moment of use.
    Malediction {
        /// Which malediction.
        id: MaledictionId,
        /// Lighting and targeting snapshot.
        ctx: UseContext,
    },
    /// A levelled spell, subject to the roll-to-cast house rule.
    Spell {
        /// Spell level; 0 for cantrips.
        level: u32,
        /// The caster's spellcasting modifier.
        casting_modifier: i32,
    },
}

/// One event from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostEvent {
    /// An item was used.
    ItemUsed(ItemUse),
    /// A rest completed.
    RestCompleted(RestKind),
    /// The malediction selection dialog was saved.
    SelectionSaved(Vec<MaledictionId>),
    /// The stress track was set from the sheet.
    StressSet(u32),
    /// The stress track was cleared from the sheet.
    StressReset,
    /// The recover-doom sheet button: all Doom uses restored.
    DoomRecovered,
    /// The host asked for an initiative roll.
    InitiativeRequested {
        /// The character's initiative modifier, computed host-side.
        modifier: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_round_trip_json() {
        let events = vec![
            HostEvent::ItemUsed(ItemUse::DoomTransformation),
            HostEvent::ItemUsed(ItemUse::Malediction {
                id: MaledictionId::EvilEye,
                ctx: UseContext::default().with_target("Ghoul", 30),
            }),
            HostEvent::ItemUsed(ItemUse::Spell {
                level: 3,
                casting_modifier: 4,
            }),
            HostEvent::RestCompleted(RestKind::Long),
            HostEvent::SelectionSaved(vec![MaledictionId::HexArmor]),
            HostEvent::StressSet(3),
            HostEvent::StressReset,
            HostEvent::DoomRecovered,
            HostEvent::InitiativeRequested { modifier: -1 },
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: HostEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event);
        }
    }

    #[test]
    fn malediction_ids_serialize_as_tags() {
        let event = HostEvent::SelectionSaved(vec![MaledictionId::EvilEye]);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"evil-eye\""));
    }
}
