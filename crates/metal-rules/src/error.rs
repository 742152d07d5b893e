//! Error types for the Accursed rules engine.

use crate::gating::DenyReason;

/// Errors that can occur during rules operations.
///
/// All of these abort the single triggered operation; none are fatal and
/// none require cleanup beyond the atomic bundle guarantee in
/// [`crate::character::Character::apply_bundle`].
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// A limited-use ability was used with no uses remaining.
    #[error("no uses remaining: {0}")]
    InsufficientUses(String),

    /// An ability-specific precondition failed.
    #[error("{0}")]
    PreconditionNotMet(DenyReason),

    /// A malediction selection exceeds the slots available at this level.
    #[error("cannot keep {chosen} maledictions: only {slots} slots at level {level}")]
    InvalidSelection {
        /// Number of maledictions in the attempted selection.
        chosen: usize,
        /// Slots available at the character's level.
        slots: usize,
        /// The character's Accursed level.
        level: u32,
    },

    /// A malediction was selected below its minimum class level.
    #[error("{name} requires Accursed level {required}")]
    LevelRequirement {
        /// Display name of the malediction.
        name: String,
        /// Minimum Accursed level for the malediction.
        required: u32,
    },

    /// Required user input is missing. Not a failure: the operation
    /// consumed nothing and can be re-invoked once input is provided.
    #[error("awaiting input: {0}")]
    AwaitingInput(String),

    /// The malediction is not part of the character's selection.
    #[error("malediction not selected: {0}")]
    NotSelected(String),

    /// A malediction id has no definition in the class configuration.
    #[error("unknown malediction: {0}")]
    UnknownMalediction(String),

    /// An effect in a bundle could not be applied. Every piece applied
    /// before the failure has been rolled back.
    #[error("effect rejected: {0}")]
    EffectRejected(String),
}

/// Convenience result type for rules operations.
pub type RulesResult<T> = Result<T, RulesError>;
