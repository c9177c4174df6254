//! Per-family factor resolution.
//!
//! Each submodule resolves one effect family for the combatant whose turn is
//! starting (the "owner"). The turn scheduler calls them in this order:
//!
//! 1. [`regeneration`]
//! 2. [`siphon`] (mana, then stamina)
//! 3. [`burn`]
//! 4. [`storm`]
//!
//! [`shield`] is consulted by the damage pipeline and [`lockdown`] acts on
//! equipped cards rather than on the factor tables.

pub mod burn;
pub mod lockdown;
pub mod regeneration;
pub mod shield;
pub mod siphon;
pub mod storm;

pub use lockdown::FreezeOutcome;
pub use shield::ShieldReport;

use crate::engine::ResolveError;
use crate::state::CombatantId;

use super::{EffectType, FactorInstance, FactorStore};

/// Live instances of `effect`, after checking the bitfield agrees with them.
pub(crate) fn live_instances(
    store: &FactorStore,
    combatant: CombatantId,
    effect: EffectType,
) -> Result<&[FactorInstance], ResolveError> {
    let instances = store.query(combatant, effect);
    if store.has(combatant, effect) == instances.is_empty() {
        return Err(ResolveError::Inconsistent { combatant, effect });
    }
    Ok(instances)
}

/// Sum of magnitudes of the live instances of `effect`.
pub(crate) fn summed(
    store: &FactorStore,
    combatant: CombatantId,
    effect: EffectType,
) -> Result<u32, ResolveError> {
    live_instances(store, combatant, effect)?
        .iter()
        .try_fold(0u32, |sum, instance| sum.checked_add(instance.magnitude()))
        .ok_or(ResolveError::Overflow { effect })
}
