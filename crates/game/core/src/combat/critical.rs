//! Critical hit checks.

use crate::env::{RngOracle, compute_seed};
use crate::state::Combatant;

/// Check whether a d100 roll (1-100) lands a critical hit.
///
/// A chance of 0 never crits; a chance of 100 always does.
pub fn is_critical(crit_rate: u32, roll: u32) -> bool {
    roll <= crit_rate.min(100)
}

/// Bonus damage of a critical hit: `floor(target_max_life * crit_damage / 100)`.
///
/// Computed off the target's maximum life and added after defense.
pub fn critical_bonus(target_max_life: u32, crit_damage: u32) -> u32 {
    let bonus = u64::from(target_max_life) * u64::from(crit_damage) / 100;
    u32::try_from(bonus).unwrap_or(u32::MAX)
}

/// Roll once for `attacker`.
///
/// `context` separates several rolls within one resolution (one per weapon).
pub fn roll_critical(
    attacker: &Combatant,
    battle_seed: u64,
    nonce: u64,
    context: u32,
    rng: &(impl RngOracle + ?Sized),
) -> bool {
    let seed = compute_seed(battle_seed, nonce, attacker.id.0, context);
    is_critical(attacker.crit_rate(), rng.roll_d100(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_chance_never_crits() {
        for roll in 1..=100 {
            assert!(!is_critical(0, roll));
        }
    }

    #[test]
    fn full_chance_always_crits() {
        for roll in 1..=100 {
            assert!(is_critical(100, roll));
        }
    }

    #[test]
    fn bonus_is_floored_percent_of_max_life() {
        assert_eq!(critical_bonus(1000, 15), 150);
        assert_eq!(critical_bonus(999, 10), 99);
        assert_eq!(critical_bonus(0, 50), 0);
    }
}
