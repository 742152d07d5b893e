//! Per-character resource ledger for limited-use abilities.
//!
//! Entries are created lazily: a key with no entry reads as zero uses.
//! Callers clamp; `set` enforces no bounds. Resets are idempotent, never
//! additive, so a host event firing twice cannot mint extra uses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ability::{AbilityKey, UsageModel};
use crate::error::{RulesError, RulesResult};

/// Remaining uses of an ability, with an explicit sentinel for abilities
/// that are never spent down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Uses {
    /// A counted number of uses.
    Limited(u32),
    /// Not tracked: the ability never runs out.
    Unlimited,
}

impl std::fmt::Display for Uses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Unlimited => write!(f, "\u{221e}"),
        }
    }
}

/// Maximum uses for an ability with the given usage model.
///
/// Only doom-refresh abilities are counted; everything else is unlimited
/// from the ledger's point of view (doom-only gating happens elsewhere).
pub fn max_uses(usage: UsageModel) -> Uses {
    match usage {
        UsageModel::DoomRefresh => Uses::Limited(1),
        UsageModel::Unlimited | UsageModel::DoomOnly | UsageModel::Permanent => Uses::Unlimited,
    }
}

/// Counters for limited-use abilities, keyed by ability identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    entries: BTreeMap<AbilityKey, u32>,
}

impl ResourceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining uses for a key; zero if the key has no entry.
    pub fn get(&self, key: AbilityKey) -> u32 {
        self.entries.get(&key).copied().unwrap_or(0)
    }

    /// Returns true if the key has an entry, even one at zero.
    pub fn contains(&self, key: AbilityKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Overwrite the remaining uses for a key.
    pub fn set(&mut self, key: AbilityKey, uses: u32) {
        self.entries.insert(key, uses);
    }

    /// Spend one use. Fails without changing the ledger when none remain.
    pub fn decrement(&mut self, key: AbilityKey) -> RulesResult<u32> {
        let current = self.get(key);
        if current == 0 {
            return Err(RulesError::InsufficientUses(key.to_string()));
        }
        let new = current - 1;
        self.entries.insert(key, new);
        Ok(new)
    }

    /// Reset a key to its maximum. Unlimited abilities keep no entry and
    /// report the infinite sentinel.
    pub fn reset_to_max(&mut self, key: AbilityKey, max: Uses) -> Uses {
        match max {
            Uses::Limited(n) => {
                self.entries.insert(key, n);
                Uses::Limited(n)
            }
            Uses::Unlimited => {
                self.entries.remove(&key);
                Uses::Unlimited
            }
        }
    }

    /// Drop a key's entry entirely (ability deselected).
    pub fn remove(&mut self, key: AbilityKey) {
        self.entries.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::MaledictionId;

    const EYE: AbilityKey = AbilityKey::Malediction(MaledictionId::EvilEye);

    #[test]
    fn absent_reads_zero() {
        let ledger = ResourceLedger::new();
        assert_eq!(ledger.get(AbilityKey::Doom), 0);
        assert!(!ledger.contains(AbilityKey::Doom));
    }

    #[test]
    fn set_then_get() {
        let mut ledger = ResourceLedger::new();
        ledger.set(AbilityKey::Doom, 3);
        assert_eq!(ledger.get(AbilityKey::Doom), 3);
        assert!(ledger.contains(AbilityKey::Doom));
    }

    #[test]
    fn decrement_spends_one() {
        let mut ledger = ResourceLedger::new();
        ledger.set(EYE, 1);
        assert_eq!(ledger.decrement(EYE).unwrap(), 0);
        assert_eq!(ledger.get(EYE), 0);
    }

    #[test]
    fn decrement_at_zero_fails_unchanged() {
        let mut ledger = ResourceLedger::new();
        ledger.set(EYE, 0);
        let err = ledger.decrement(EYE).unwrap_err();
        assert!(matches!(err, RulesError::InsufficientUses(_)));
        assert_eq!(ledger.get(EYE), 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut ledger = ResourceLedger::new();
        let first = ledger.reset_to_max(AbilityKey::Doom, Uses::Limited(4));
        let second = ledger.reset_to_max(AbilityKey::Doom, Uses::Limited(4));
        assert_eq!(first, second);
        assert_eq!(ledger.get(AbilityKey::Doom), 4);
    }

    #[test]
    fn reset_unlimited_keeps_no_entry() {
        let mut ledger = ResourceLedger::new();
        ledger.set(EYE, 1);
        let result = ledger.reset_to_max(EYE, Uses::Unlimited);
        assert_eq!(result, Uses::Unlimited);
        assert!(!ledger.contains(EYE));
    }

    #[test]
    fn max_uses_by_model() {
        assert_eq!(max_uses(UsageModel::DoomRefresh), Uses::Limited(1));
        assert_eq!(max_uses(UsageModel::Permanent), Uses::Unlimited);
        assert_eq!(max_uses(UsageModel::DoomOnly), Uses::Unlimited);
        assert_eq!(max_uses(UsageModel::Unlimited), Uses::Unlimited);
    }

    #[test]
    fn uses_display() {
        assert_eq!(Uses::Limited(2).to_string(), "2");
        assert_eq!(Uses::Unlimited.to_string(), "\u{221e}");
    }

    #[test]
    fn serde_round_trip() {
        let mut ledger = ResourceLedger::new();
        ledger.set(AbilityKey::Doom, 3);
        ledger.set(EYE, 1);
        let json = serde_json::to_string(&ledger).unwrap();
        let back: ResourceLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
