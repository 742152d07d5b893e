//! Level progression tables for the Accursed class.
//!
//! All functions here are pure step functions of the character's Accursed
//! level (1..=20) or of a spell level.

use crate::dice::Die;

/// Doom uses recovered on a long rest, by Accursed level.
pub fn doom_uses(level: u32) -> u32 {
    match level {
        0..=2 => 2,
        3..=5 => 3,
        6..=11 => 4,
        12..=16 => 5,
        _ => 6,
    }
}

/// Malediction slots available at a given Accursed level.
///
/// Maledictions unlock at level 2; a third slot opens at level 13.
pub fn malediction_slots(level: u32) -> usize {
    match level {
        0..=1 => 0,
        2..=12 => 2,
        _ => 3,
    }
}

/// The Doom damage die at a given Accursed level.
pub fn doom_die(level: u32) -> Die {
    match level {
        0..=8 => Die::D4,
        9..=15 => Die::D6,
        _ => Die::D8,
    }
}

/// Temporary hit points granted when Doom is activated.
pub fn doom_temp_hp(level: u32) -> u32 {
    2 * level
}

/// The casting check DC for a leveled spell (house rule).
///
/// Returns `None` for cantrips and out-of-range levels: no check is made.
pub fn casting_dc(spell_level: u32) -> Option<u32> {
    match spell_level {
        1 => Some(12),
        2 => Some(13),
        3 => Some(15),
        4 => Some(16),
        5 => Some(17),
        6 => Some(19),
        7 => Some(20),
        8 => Some(21),
        9 => Some(23),
        _ => None,
    }
}
