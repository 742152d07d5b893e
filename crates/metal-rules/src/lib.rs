//! Rules engine for the Accursed class: the Doom transformation,
//! maledictions, stress, and the table's dice house rules.
//!
//! This crate is pure state-in, state-out rules logic. It knows nothing
//! about any host platform — `metal-module` translates host events into
//! calls on these operations and formats the results.

/// Ability definitions: usage models, identifiers, malediction metadata.
pub mod ability;
/// The roll-to-cast house rule for levelled spells.
pub mod casting;
/// Character state: the record every operation reads and writes.
pub mod character;
/// The class configuration: the standard malediction roster.
pub mod config;
/// Dice types and rolling.
pub mod dice;
/// The Doom transformation toggle.
pub mod doom;
/// Effects, tags, and durations attached to a character.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// The gating evaluator: may this ability be used right now?
pub mod gating;
/// Initiative with a configurable die.
pub mod initiative;
/// Per-ability use tracking.
pub mod ledger;
/// Malediction selection and use.
pub mod malediction;
/// Level-derived class numbers.
pub mod progression;
/// Recovery rules: ledger resets on lifecycle events.
pub mod recovery;
/// The stress tracker.
pub mod stress;
/// Bounded counters for stress and exhaustion.
pub mod track;

/// Re-export ability types.
pub use ability::{AbilityKey, MaledictionDef, MaledictionId, UsageModel};
/// Re-export the character record.
pub use character::Character;
/// Re-export the class configuration.
pub use config::ClassConfig;
/// Re-export error types.
pub use error::{RulesError, RulesResult};
/// Re-export the gating evaluator's verdict types.
pub use gating::{Gate, UseContext};
