//! The roll-to-cast house rule.
//!
//! Every levelled spell requires a flat casting check against a DC that
//! grows with the spell's level; on a failure the spell slot is still
//! spent but the spell fizzles. Cantrips are exempt.

use rand::rngs::StdRng;

use crate::dice::Die;
use crate::progression;

/// A resolved casting check for a levelled spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastingCheck {
    /// Level of the spell being cast.
    pub spell_level: u32,
    /// DC the check was made against.
    pub dc: u32,
    /// The raw d20 result.
    pub roll: u32,
    /// The caster's spellcasting modifier.
    pub modifier: i32,
    /// Roll plus modifier.
    pub total: i32,
    /// Whether the total met the DC.
    pub success: bool,
}

impl std::fmt::Display for CastingCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.success { "success" } else { "failure" };
        write!(
            f,
            "casting check vs DC {}: {} {:+} = {} ({verdict})",
            self.dc, self.roll, self.modifier, self.total
        )
    }
}

/// Make the casting check for a spell. Returns `None` for cantrips and
/// out-of-band levels, which cast without a check.
pub fn roll_to_cast(spell_level: u32, modifier: i32, rng: &mut StdRng) -> Option<CastingCheck> {
    let dc = progression::casting_dc(spell_level)?;
    let roll = Die::D20.roll(rng);
    let total = roll as i32 + modifier;
    Some(CastingCheck {
        spell_level,
        dc,
        roll,
        modifier,
        total,
        success: total >= dc as i32,
    })
}
