//! Clamped counters for accumulating conditions (stress, exhaustion).

use serde::{Deserialize, Serialize};

/// A numeric condition that accumulates from zero up to a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Current value.
    pub current: u32,
    /// Maximum value.
    pub max: u32,
}

impl Track {
    /// Create a new track starting at zero.
    pub fn new(max: u32) -> Self {
        Self { current: 0, max }
    }

    /// Set the track to a value, clamping to the cap. Returns the new value.
    pub fn set(&mut self, value: u32) -> u32 {
        self.current = value.min(self.max);
        self.current
    }

    /// Clear the track back to zero.
    pub fn clear(&mut self) {
        self.current = 0;
    }

    /// Returns true if the track is at zero.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Returns true if the track is at its cap.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
