//! Regeneration: stacking heal over time.
//!
//! The owner heals the summed amount and the opponent loses half of it as
//! plain life loss. That loss is not damage: shields and defense do not see it.

use crate::combat::pipeline;
use crate::engine::ResolveError;
use crate::event::EventSink;
use crate::factor::EffectType;
use crate::state::{BattleState, Side};

use super::{live_instances, summed};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegenerationReport {
    /// Life restored to the owner (capped at its maximum).
    pub healed: u32,
    /// Life taken from the opponent.
    pub drained: u32,
}

pub fn resolve(
    state: &mut BattleState,
    owner: Side,
    sink: &mut impl EventSink,
) -> Result<Option<RegenerationReport>, ResolveError> {
    let owner_id = state.id(owner);
    if live_instances(state.factors(), owner_id, EffectType::Regeneration)?.is_empty() {
        return Ok(None);
    }

    let amount = summed(state.factors(), owner_id, EffectType::Regeneration)?;
    let healed = pipeline::heal(state, owner, amount, sink);
    // Half of the full amount, not of what was actually healed
    let drained = pipeline::drain_life(state, owner.opponent(), amount / 2, sink);

    Ok(Some(RegenerationReport { healed, drained }))
}
