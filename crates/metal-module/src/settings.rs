//! World-level module settings.

use serde::{Deserialize, Serialize};

use metal_rules::dice::Die;

use crate::error::{ModuleError, ModuleResult};

/// Dice a table may choose for initiative.
pub const INITIATIVE_DICE: [Die; 5] = [Die::D20, Die::D12, Die::D10, Die::D8, Die::D6];

/// Settings shared by every character at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSettings {
    /// Post stress changes to chat instead of keeping them on the sheet.
    pub announce_stress: bool,
    /// Die rolled for initiative in place of the d20.
    pub initiative_die: Die,
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            announce_stress: false,
            initiative_die: Die::D20,
        }
    }
}

impl ModuleSettings {
    /// Set whether stress changes are announced in chat.
    pub fn with_announce_stress(mut self, announce: bool) -> Self {
        self.announce_stress = announce;
        self
    }

    /// Set the initiative die from a choice tag such as "d10".
    ///
    /// Only d20 through d6 are accepted; a d4 initiative collapses the
    /// order too far to be playable.
    pub fn with_initiative_die(mut self, tag: &str) -> ModuleResult<Self> {
        let die = Die::from_str_tag(tag)
            .filter(|die| INITIATIVE_DICE.contains(die))
            .ok_or_else(|| {
                ModuleError::InvalidSetting(format!(
                    "initiative die must be one of d20, d12, d10, d8, d6, got '{tag}'"
                ))
            })?;
        self.initiative_die = die;
        Ok(self)
    }
}
