//! Error types for the module boundary.

use thiserror::Error;

/// Result type for module operations.
pub type ModuleResult<T> = Result<T, ModuleError>;

/// Errors that can occur at the module boundary.
///
/// Rule denials during event handling never surface here: the session
/// absorbs them into warning messages. These errors cover configuration
/// and persistence, where there is no user to warn.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// A setting value was rejected.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// Stored character data failed to decode or encode.
    #[error("character data: {0}")]
    CharacterData(#[from] serde_json::Error),

    /// A rules operation failed outside event handling.
    #[error("{0}")]
    Rules(#[from] metal_rules::RulesError),
}
