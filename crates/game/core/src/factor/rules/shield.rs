//! Shield: a stacking pool of damage-prevention points.
//!
//! Incoming damage drains instances oldest first. An instance drained to zero
//! expires on the spot instead of waiting for the aging pass.

use tracing::debug;

use crate::config::BattleConfig;
use crate::event::EventSink;
use crate::factor::{EffectType, FactorStore};
use crate::state::{CombatantId, Element};

/// How a hit was split between the shield pool and life.
///
/// `absorbed + remainder == incoming` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShieldReport {
    pub incoming: u32,
    pub absorbed: u32,
    pub remainder: u32,
}

/// Filters `incoming` damage through `target`'s shields.
pub fn absorb(
    store: &mut FactorStore,
    target: CombatantId,
    incoming: u32,
    sink: &mut impl EventSink,
) -> ShieldReport {
    if incoming == 0 || !store.has(target, EffectType::Shield) {
        return ShieldReport {
            incoming,
            absorbed: 0,
            remainder: incoming,
        };
    }

    let absorbed = store.consume(target, EffectType::Shield, incoming, sink);
    let remainder = incoming - absorbed;
    if remainder > 0 {
        debug!(target: "duel::factor", %target, absorbed, remainder, "shields broke");
    }

    ShieldReport {
        incoming,
        absorbed,
        remainder,
    }
}

/// Total shield points currently held by `target`.
pub fn pool(store: &FactorStore, target: CombatantId) -> u32 {
    store.total(target, EffectType::Shield)
}

/// Flat damage bonus granted to `element` while `holder` has a live Shield.
pub fn element_bonus(
    store: &FactorStore,
    holder: CombatantId,
    element: Element,
    config: &BattleConfig,
) -> u32 {
    if element == config.shield_element && store.has(holder, EffectType::Shield) {
        config.shield_element_bonus
    } else {
        0
    }
}
