//! Storm: overwrite-class area denial.
//!
//! While active it deals fixed damage each turn and the factor store rejects
//! every other application on the holder.

use crate::combat::pipeline::{self, DamageReport};
use crate::combat::{DamageMode, DamageOrigin};
use crate::engine::ResolveError;
use crate::event::EventSink;
use crate::factor::EffectType;
use crate::state::{BattleState, Side};

use super::{live_instances, summed};

/// Deals the Storm's fixed damage to `owner`, skipping defense but not shields.
pub fn resolve(
    state: &mut BattleState,
    owner: Side,
    sink: &mut impl EventSink,
) -> Result<Option<DamageReport>, ResolveError> {
    let owner_id = state.id(owner);
    if live_instances(state.factors(), owner_id, EffectType::Storm)?.is_empty() {
        return Ok(None);
    }

    let amount = summed(state.factors(), owner_id, EffectType::Storm)?;
    if amount == 0 {
        return Ok(None);
    }

    Ok(Some(pipeline::land(
        state,
        None,
        owner,
        amount,
        DamageMode::Bypass,
        DamageOrigin::Factor(EffectType::Storm),
        false,
        sink,
    )))
}
