//! Card lockdown ("freeze").
//!
//! The countdown lives on the card itself, not in the factor store. It is
//! ticked once at the end of each turn of the card owner, so a freeze of `n`
//! keeps the card out of the owner's next `n` turns. A frozen card cannot be
//! used or swung.

use tracing::debug;

use crate::event::{BattleEvent, EventSink};
use crate::factor::{BlockReason, StatusFlags};
use crate::state::{BattleState, Side};

/// Result of [`freeze`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreezeOutcome {
    /// The card is now frozen for `turns` (the longer of old and new).
    Frozen { turns: u32 },
    Blocked(BlockReason),
    NoSuchCard,
    /// Zero turns requested.
    Ignored,
}

/// Freezes the card in `slot` of `owner` for `turns`, plus the applier's
/// lockdown bonus.
///
/// A card owner under Storm or Immunity rejects the freeze.
pub fn freeze(
    state: &mut BattleState,
    applier: Side,
    owner: Side,
    slot: usize,
    turns: u32,
    sink: &mut impl EventSink,
) -> FreezeOutcome {
    if turns == 0 {
        return FreezeOutcome::Ignored;
    }

    let owner_id = state.id(owner);
    if state.combatant(owner).card(slot).is_none() {
        debug!(target: "duel::factor", owner = %owner_id, slot, "no card to freeze");
        return FreezeOutcome::NoSuchCard;
    }

    let flags = state.factors().flags(owner_id);
    let blocked = if flags.contains(StatusFlags::STORM) {
        Some(BlockReason::Storm)
    } else if flags.contains(StatusFlags::IMMUNITY) {
        Some(BlockReason::Immunity)
    } else {
        None
    };
    if let Some(reason) = blocked {
        debug!(target: "duel::factor", owner = %owner_id, slot, %reason, "freeze blocked");
        sink.emit(BattleEvent::CardLockBlocked {
            owner: owner_id,
            slot,
            reason,
        });
        return FreezeOutcome::Blocked(reason);
    }

    let total = turns.saturating_add(state.combatant(applier).bonuses().lockdown_duration);
    let Some(card) = state.combatant_mut(owner).card_mut(slot) else {
        return FreezeOutcome::NoSuchCard;
    };
    card.lock(total);
    let turns = card.frozen_turns();
    sink.emit(BattleEvent::CardLocked {
        owner: owner_id,
        slot,
        turns,
    });
    FreezeOutcome::Frozen { turns }
}

/// Clears a freeze early. Returns true if the card was frozen.
pub fn thaw(state: &mut BattleState, owner: Side, slot: usize, sink: &mut impl EventSink) -> bool {
    let owner_id = state.id(owner);
    let Some(card) = state.combatant_mut(owner).card_mut(slot) else {
        return false;
    };
    if !card.is_locked() {
        return false;
    }
    card.unlock();
    sink.emit(BattleEvent::CardUnlocked {
        owner: owner_id,
        slot,
    });
    true
}

/// Advances every card countdown of `owner` by one turn. Called when the
/// owner's turn ends. Returns how many cards thawed.
pub fn tick(state: &mut BattleState, owner: Side, sink: &mut impl EventSink) -> usize {
    let combatant = state.combatant_mut(owner);
    let owner_id = combatant.id;
    let mut thawed = 0;
    for (slot, card) in combatant.cards_mut().iter_mut().enumerate() {
        if card.tick_lock() {
            thawed += 1;
            sink.emit(BattleEvent::CardUnlocked {
                owner: owner_id,
                slot,
            });
        }
    }
    thawed
}
