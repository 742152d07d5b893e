//! The stress tracker.
//!
//! Stress accumulates from 0 to 6 and penalizes d20 rolls at -2 per level,
//! the same scale as exhaustion. Only the worse of the two penalties
//! applies; they never stack.

use crate::character::Character;

/// Penalty to d20 rolls per level of stress or exhaustion.
pub const PENALTY_PER_LEVEL: i32 = -2;

/// Set the character's stress, clamped to the track's cap.
/// Returns the stress level actually stored.
pub fn set_stress(character: &mut Character, level: u32) -> u32 {
    character.stress.set(level)
}

/// Clear the character's stress back to zero.
pub fn reset_stress(character: &mut Character) {
    character.stress.clear();
}

/// The effective d20 penalty: the worse of the stress and exhaustion
/// penalties, zero when both tracks are empty.
pub fn check_penalty(character: &Character) -> i32 {
    let stress = PENALTY_PER_LEVEL * character.stress.current as i32;
    let exhaustion = PENALTY_PER_LEVEL * character.exhaustion.current as i32;
    stress.min(exhaustion)
}
