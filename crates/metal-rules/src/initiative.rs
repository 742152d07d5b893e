//! Initiative with a configurable die.
//!
//! The house rule swaps the d20 for a smaller die, keeping the usual
//! modifier. The roll happens here so the die in the result is always the
//! die that was actually rolled.

use rand::rngs::StdRng;

use crate::dice::Die;

/// A resolved initiative roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitiativeRoll {
    /// The die that was rolled.
    pub die: Die,
    /// The raw die result.
    pub roll: u32,
    /// The character's initiative modifier.
    pub modifier: i32,
    /// Roll plus modifier.
    pub total: i32,
}

impl std::fmt::Display for InitiativeRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} {:+}) = {}",
            self.die, self.roll, self.modifier, self.total
        )
    }
}

/// Roll initiative on the given die.
pub fn roll_initiative(die: Die, modifier: i32, rng: &mut StdRng) -> InitiativeRoll {
    let roll = die.roll(rng);
    InitiativeRoll {
        die,
        roll,
        modifier,
        total: roll as i32 + modifier,
    }
}
