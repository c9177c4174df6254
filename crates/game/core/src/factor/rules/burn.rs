//! Burn: stacking damage over time in percent of maximum life.

use crate::combat::pipeline::{self, DamageReport};
use crate::combat::{DamageMode, DamageOrigin};
use crate::engine::ResolveError;
use crate::event::EventSink;
use crate::factor::EffectType;
use crate::state::{BattleState, Side};

use super::{live_instances, summed};

/// `floor(max_life * total_percent / 100)`, then scaled by
/// `(100 + amplification) / 100` when amplification is non-zero.
///
/// Returns `None` if the result does not fit a `u32`.
pub fn burn_damage(max_life: u32, total_percent: u32, amplification: u32) -> Option<u32> {
    let mut damage = u64::from(max_life) * u64::from(total_percent) / 100;
    if amplification > 0 {
        damage = damage.checked_mul(100 + u64::from(amplification))? / 100;
    }
    u32::try_from(damage).ok()
}

/// Burns `owner` for the sum of its Burn percentages.
///
/// The amplification comes from the opponent (the applier). The hit skips
/// flat and elemental defense, never crits, and is still filtered by shields.
pub fn resolve(
    state: &mut BattleState,
    owner: Side,
    sink: &mut impl EventSink,
) -> Result<Option<DamageReport>, ResolveError> {
    let owner_id = state.id(owner);
    if live_instances(state.factors(), owner_id, EffectType::Burn)?.is_empty() {
        return Ok(None);
    }

    let percent = summed(state.factors(), owner_id, EffectType::Burn)?;
    let amplification = state.combatant(owner.opponent()).bonuses().burn_amplification;
    let amount = burn_damage(state.combatant(owner).max_life(), percent, amplification)
        .ok_or(ResolveError::Overflow {
            effect: EffectType::Burn,
        })?;
    if amount == 0 {
        return Ok(None);
    }

    Ok(Some(pipeline::land(
        state,
        None,
        owner,
        amount,
        DamageMode::Bypass,
        DamageOrigin::Factor(EffectType::Burn),
        false,
        sink,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_floored() {
        assert_eq!(burn_damage(1000, 6, 0), Some(60));
        assert_eq!(burn_damage(999, 6, 0), Some(59));
        assert_eq!(burn_damage(10, 1, 0), Some(0));
    }

    #[test]
    fn amplification_scales_after_flooring() {
        assert_eq!(burn_damage(1000, 5, 50), Some(75));
        assert_eq!(burn_damage(999, 5, 10), Some(54));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(burn_damage(u32::MAX, u32::MAX, 0), None);
    }
}
