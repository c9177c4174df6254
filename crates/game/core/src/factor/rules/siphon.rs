//! Mana and stamina siphons.
//!
//! Each live instance moves `min(rate, opponent current)` from the opponent
//! to the owner. The owner's gain is capped at its maximum; any excess is lost.

use tracing::debug;

use crate::engine::ResolveError;
use crate::event::{BattleEvent, EventSink};
use crate::factor::{EffectType, FactorInstance};
use crate::state::{BattleState, Side};
use crate::stats::ResourceKind;

use super::live_instances;

/// The two siphon families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SiphonKind {
    Mana,
    Stamina,
}

impl SiphonKind {
    pub const fn effect(self) -> EffectType {
        match self {
            SiphonKind::Mana => EffectType::ManaSiphon,
            SiphonKind::Stamina => EffectType::StaminaSiphon,
        }
    }

    pub const fn pool(self) -> ResourceKind {
        match self {
            SiphonKind::Mana => ResourceKind::Mana,
            SiphonKind::Stamina => ResourceKind::Stamina,
        }
    }
}

/// Resolves every instance of `kind` on `owner`. Returns the total taken from
/// the opponent.
pub fn resolve(
    state: &mut BattleState,
    owner: Side,
    kind: SiphonKind,
    sink: &mut impl EventSink,
) -> Result<u32, ResolveError> {
    let owner_id = state.id(owner);
    let rates: Vec<u32> = live_instances(state.factors(), owner_id, kind.effect())?
        .iter()
        .map(FactorInstance::magnitude)
        .collect();

    let pool = kind.pool();
    let mut total = 0u32;
    for rate in rates {
        let (taker, victim) = state.pair_mut(owner);
        let taken = victim.lose(pool, rate);
        if taken == 0 {
            debug!(target: "duel::factor", victim = %victim.id, %pool, "nothing left to siphon");
            continue;
        }
        taker.gain(pool, taken);
        sink.emit(BattleEvent::ResourceStolen {
            from: victim.id,
            to: taker.id,
            kind: pool,
            amount: taken,
        });
        total = total.saturating_add(taken);
    }
    Ok(total)
}
