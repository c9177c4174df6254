//! Applying damage, healing and life loss to the battle state.
//!
//! Every path that lowers life ends in [`settle_defeat`], so `Defeated` and
//! `Victory` fire exactly once whichever rule dealt the last point.

use tracing::{debug, info};

use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::event::{BattleEvent, EventSink};
use crate::factor::rules::shield;
use crate::state::{BattleState, Side};
use crate::stats::ResourceKind;

use super::critical::{critical_bonus, roll_critical};
use super::damage::compute_damage;
use super::{DamageFamily, DamageMode, DamageOrigin, DamageRequest};

/// Outcome of one resolved hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Total after defense and critical bonus, before shields.
    pub incoming: u32,
    /// Points soaked by shields.
    pub absorbed: u32,
    /// Life actually removed.
    pub dealt: u32,
    pub critical: bool,
    /// True if this hit defeated the target.
    pub defeated: bool,
}

/// Resolves a hit from `source` (or the environment) against `target`.
///
/// Rolls for a critical hit once, when the request allows it and there is an
/// attacker. `context` separates rolls within one action.
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    state: &mut BattleState,
    config: &BattleConfig,
    rng: &(impl RngOracle + ?Sized),
    source: Option<Side>,
    target: Side,
    request: &DamageRequest,
    context: u32,
    sink: &mut impl EventSink,
) -> DamageReport {
    if !state.combatant(target).is_alive() {
        debug!(target: "duel::combat", side = %target, "skipping hit on defeated combatant");
        return DamageReport::default();
    }

    let situational_bonus = match (source, request.family) {
        (Some(side), DamageFamily::Elemental(element)) => {
            shield::element_bonus(state.factors(), state.id(side), element, config)
        }
        _ => 0,
    };
    let mut total = compute_damage(
        source.map(|side| state.combatant(side)),
        state.combatant(target),
        request,
        situational_bonus,
    );

    let mut critical = false;
    if let Some(side) = source.filter(|_| request.can_crit) {
        let nonce = state.next_nonce();
        let attacker = state.combatant(side);
        if roll_critical(attacker, state.battle_seed, nonce, context, rng) {
            critical = true;
            let bonus = critical_bonus(state.combatant(target).max_life(), attacker.crit_damage());
            total = total.saturating_add(bonus);
        }
    }

    land(state, source, target, total, request.mode, request.origin, critical, sink)
}

/// Applies an already computed amount: shields (unless `Direct`), then life.
#[allow(clippy::too_many_arguments)]
pub fn land(
    state: &mut BattleState,
    source: Option<Side>,
    target: Side,
    amount: u32,
    mode: DamageMode,
    origin: DamageOrigin,
    critical: bool,
    sink: &mut impl EventSink,
) -> DamageReport {
    let target_id = state.id(target);

    let (absorbed, remainder) = match mode {
        DamageMode::Direct => (0, amount),
        DamageMode::Standard | DamageMode::Bypass => {
            let report = shield::absorb(state.factors_mut(), target_id, amount, sink);
            (report.absorbed, report.remainder)
        }
    };

    let dealt = state.combatant_mut(target).lose(ResourceKind::Life, remainder);
    debug!(
        target: "duel::combat",
        %target_id,
        ?origin,
        amount,
        absorbed,
        dealt,
        critical,
        "damage landed"
    );
    sink.emit(BattleEvent::DamageDealt {
        source: source.map(|side| state.id(side)),
        target: target_id,
        origin,
        amount: dealt,
        absorbed,
        critical,
    });

    let defeated = settle_defeat(state, target, sink);
    DamageReport {
        incoming: amount,
        absorbed,
        dealt,
        critical,
        defeated,
    }
}

/// Restores life up to the effective maximum. Returns the amount healed.
pub fn heal(state: &mut BattleState, target: Side, amount: u32, sink: &mut impl EventSink) -> u32 {
    let combatant = state.combatant_mut(target);
    if amount == 0 || !combatant.is_alive() {
        return 0;
    }
    let healed = combatant.gain(ResourceKind::Life, amount);
    if healed > 0 {
        sink.emit(BattleEvent::HealingReceived {
            target: combatant.id,
            amount: healed,
        });
    }
    healed
}

/// Removes life without it being damage: no shields, no defense, no
/// `DamageDealt`. Defeat is still settled.
pub fn drain_life(
    state: &mut BattleState,
    target: Side,
    amount: u32,
    sink: &mut impl EventSink,
) -> u32 {
    let combatant = state.combatant_mut(target);
    if amount == 0 || !combatant.is_alive() {
        return 0;
    }
    let lost = combatant.lose(ResourceKind::Life, amount);
    sink.emit(BattleEvent::ResourceLost {
        target: combatant.id,
        kind: ResourceKind::Life,
        amount: lost,
    });
    settle_defeat(state, target, sink);
    lost
}

/// Emits `Defeated` and `Victory` and unregisters the loser if `side` has
/// just reached zero life. Returns true only on that first transition.
pub(crate) fn settle_defeat(state: &mut BattleState, side: Side, sink: &mut impl EventSink) -> bool {
    if state.combatant(side).is_alive() || state.is_over() {
        return false;
    }

    let loser = state.id(side);
    let winner = side.opponent();
    sink.emit(BattleEvent::Defeated { target: loser });
    state.factors_mut().unregister(loser, true, sink);
    state.declare_winner(winner);
    info!(target: "duel::combat", %loser, winner = %state.id(winner), "combatant defeated");
    sink.emit(BattleEvent::Victory {
        winner: state.id(winner),
    });
    true
}
