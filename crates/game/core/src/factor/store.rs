//! Factor storage with a bitfield mirror.
//!
//! One table per registered combatant, indexed by [`EffectType`] ordinal.
//! Each slot is an ordered list of instances (insertion order preserved, so
//! index 0 is always the oldest). The table's [`StatusFlags`] are updated in
//! the same call that changes a slot; nothing outside this module can set a
//! bit.

use std::collections::BTreeMap;

use strum::{EnumCount, IntoEnumIterator};
use tracing::debug;

use super::{BlockReason, EffectType, FactorInstance, FactorParams, StackingClass, StatusFlags};
use crate::event::{BattleEvent, EventSink};
use crate::state::CombatantId;

/// Result of [`FactorStore::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A new instance was added.
    Applied,
    /// An overwrite-class instance replaced the previous one.
    Replaced,
    /// The target rejected the application; a `FactorBlocked` event was emitted.
    Blocked(BlockReason),
    /// Nothing happened (unregistered target or zero duration).
    Ignored,
}

impl ApplyOutcome {
    /// True if an instance is now live because of this call.
    pub fn is_applied(self) -> bool {
        matches!(self, ApplyOutcome::Applied | ApplyOutcome::Replaced)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct FactorTable {
    slots: [Vec<FactorInstance>; EffectType::COUNT],
    flags: StatusFlags,
}

impl FactorTable {
    fn slot(&self, effect: EffectType) -> &[FactorInstance] {
        &self.slots[effect.ordinal()]
    }

    fn blocked(&self, effect: EffectType) -> Option<BlockReason> {
        if effect != EffectType::Storm && self.flags.contains(StatusFlags::STORM) {
            return Some(BlockReason::Storm);
        }
        if effect.is_hostile() && self.flags.contains(StatusFlags::IMMUNITY) {
            return Some(BlockReason::Immunity);
        }
        None
    }

    /// Clears the bit (and reports it) if `effect`'s slot just became empty.
    fn sync_cleared(&mut self, target: CombatantId, effect: EffectType, sink: &mut impl EventSink) {
        if self.slots[effect.ordinal()].is_empty() && self.flags.contains(effect.flag()) {
            self.flags.remove(effect.flag());
            sink.emit(BattleEvent::FactorCleared { target, effect });
        }
    }

    fn is_consistent(&self) -> bool {
        EffectType::iter()
            .all(|effect| self.flags.contains(effect.flag()) == !self.slot(effect).is_empty())
    }
}

/// Owner of every live factor instance, keyed by combatant.
#[derive(Clone, Debug, Default)]
pub struct FactorStore {
    tables: BTreeMap<CombatantId, FactorTable>,
    /// Last flags of combatants unregistered without clearing their bits.
    departed: BTreeMap<CombatantId, StatusFlags>,
}

impl FactorStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers a combatant. Idempotent: an existing table is kept as is.
    pub fn register(&mut self, id: CombatantId) {
        self.departed.remove(&id);
        self.tables.entry(id).or_default();
    }

    /// Unregisters a combatant, dropping all of its instances.
    ///
    /// Returns the flags it held. With `clear_bits`, a `FactorCleared` event is
    /// emitted for every effect that was still live and the bits are gone.
    /// Otherwise the instances are dropped silently and the flags stay readable
    /// through [`FactorStore::flags`] as a snapshot of the departed combatant.
    /// Unregistering an unknown id is a no-op returning empty flags.
    pub fn unregister(
        &mut self,
        id: CombatantId,
        clear_bits: bool,
        sink: &mut impl EventSink,
    ) -> StatusFlags {
        let Some(table) = self.tables.remove(&id) else {
            return StatusFlags::empty();
        };
        if clear_bits {
            for effect in EffectType::iter().filter(|e| table.flags.contains(e.flag())) {
                sink.emit(BattleEvent::FactorCleared { target: id, effect });
            }
        } else {
            self.departed.insert(id, table.flags);
        }
        debug!(target: "duel::factor", %id, clear_bits, "unregistered combatant");
        table.flags
    }

    pub fn is_registered(&self, id: CombatantId) -> bool {
        self.tables.contains_key(&id)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Applies a factor to `target` for `duration` turns.
    ///
    /// - Storm on the target rejects every effect except Storm itself
    /// - Immunity on the target rejects hostile effects
    /// - Overwrite class: the slot is replaced by exactly this instance, even
    ///   if the old one was longer or stronger
    /// - Stacking class: the instance is appended
    pub fn apply(
        &mut self,
        target: CombatantId,
        params: FactorParams,
        duration: u32,
        sink: &mut impl EventSink,
    ) -> ApplyOutcome {
        let effect = params.effect();

        if duration == 0 {
            debug!(target: "duel::factor", %target, %effect, "ignoring zero-duration factor");
            return ApplyOutcome::Ignored;
        }

        let Some(table) = self.tables.get_mut(&target) else {
            debug!(target: "duel::factor", %target, %effect, "ignoring factor for unregistered combatant");
            return ApplyOutcome::Ignored;
        };

        if let Some(reason) = table.blocked(effect) {
            debug!(target: "duel::factor", %target, %effect, %reason, "factor blocked");
            sink.emit(BattleEvent::FactorBlocked {
                target,
                effect,
                reason,
            });
            return ApplyOutcome::Blocked(reason);
        }

        let slot = &mut table.slots[effect.ordinal()];
        let replaced = match effect.class() {
            StackingClass::Overwrite => {
                let had_instance = !slot.is_empty();
                slot.clear();
                had_instance
            }
            StackingClass::Stacking => false,
        };
        slot.push(FactorInstance::new(params, duration));
        table.flags.insert(effect.flag());
        debug_assert!(table.is_consistent());

        sink.emit(BattleEvent::FactorApplied {
            target,
            effect,
            duration,
            replaced,
        });

        if replaced {
            ApplyOutcome::Replaced
        } else {
            ApplyOutcome::Applied
        }
    }

    /// Removes one instance by index. Returns it, or `None` if absent.
    pub fn remove_instance(
        &mut self,
        target: CombatantId,
        effect: EffectType,
        index: usize,
        sink: &mut impl EventSink,
    ) -> Option<FactorInstance> {
        let table = self.tables.get_mut(&target)?;
        let slot = &mut table.slots[effect.ordinal()];
        if index >= slot.len() {
            debug!(target: "duel::factor", %target, %effect, index, "no factor instance at index");
            return None;
        }

        let removed = slot.remove(index);
        sink.emit(BattleEvent::FactorRemoved {
            target,
            effect,
            index,
        });
        table.sync_cleared(target, effect, sink);
        debug_assert!(table.is_consistent());
        Some(removed)
    }

    /// Removes every instance of `effect`. Returns how many were removed.
    pub fn remove_all(
        &mut self,
        target: CombatantId,
        effect: EffectType,
        sink: &mut impl EventSink,
    ) -> usize {
        let Some(table) = self.tables.get_mut(&target) else {
            return 0;
        };
        let removed = std::mem::take(&mut table.slots[effect.ordinal()]);
        // Report newest first so each index is valid at the time it is removed
        for index in (0..removed.len()).rev() {
            sink.emit(BattleEvent::FactorRemoved {
                target,
                effect,
                index,
            });
        }
        table.sync_cleared(target, effect, sink);
        debug_assert!(table.is_consistent());
        removed.len()
    }

    /// Ages every instance held by `target` by one turn.
    ///
    /// Instances reaching zero are removed, bits of emptied slots are cleared,
    /// and one `FactorsAged` event summarises the pass. Returns the number of
    /// expired instances.
    pub fn age_all(&mut self, target: CombatantId, sink: &mut impl EventSink) -> usize {
        let Some(table) = self.tables.get_mut(&target) else {
            debug!(target: "duel::factor", %target, "skipping aging for unregistered combatant");
            return 0;
        };

        let mut expired = 0;
        let mut remaining = 0;
        for effect in EffectType::iter() {
            let slot = &mut table.slots[effect.ordinal()];
            if slot.is_empty() {
                continue;
            }
            let before = slot.len();
            slot.retain_mut(|instance| {
                instance.remaining_turns = instance.remaining_turns.saturating_sub(1);
                instance.remaining_turns > 0
            });
            expired += before - slot.len();
            remaining += slot.len();
            table.sync_cleared(target, effect, sink);
        }
        debug_assert!(table.is_consistent());

        sink.emit(BattleEvent::FactorsAged {
            target,
            expired,
            remaining,
        });
        expired
    }

    /// Drains up to `amount` from the magnitudes of `effect`'s instances,
    /// oldest first. Instances drained to zero are removed immediately.
    ///
    /// Returns the total drained, never more than `amount`.
    pub(crate) fn consume(
        &mut self,
        target: CombatantId,
        effect: EffectType,
        amount: u32,
        sink: &mut impl EventSink,
    ) -> u32 {
        let Some(table) = self.tables.get_mut(&target) else {
            return 0;
        };
        let slot = &mut table.slots[effect.ordinal()];

        let mut left = amount;
        for instance in slot.iter_mut() {
            if left == 0 {
                break;
            }
            let available = instance.params.magnitude();
            let taken = available.min(left);
            instance.params = instance.params.with_magnitude(available - taken);
            left -= taken;
        }

        // Spent instances expire now rather than at the next aging pass
        for index in (0..slot.len()).rev() {
            if slot[index].params.magnitude() == 0 {
                slot.remove(index);
                sink.emit(BattleEvent::FactorRemoved {
                    target,
                    effect,
                    index,
                });
            }
        }
        table.sync_cleared(target, effect, sink);
        debug_assert!(table.is_consistent());

        amount - left
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Live instances of `effect` on `target`, oldest first.
    ///
    /// Returns a shared empty slice when the combatant is unregistered or has
    /// no instance of that type.
    pub fn query(&self, target: CombatantId, effect: EffectType) -> &[FactorInstance] {
        match self.tables.get(&target) {
            Some(table) => table.slot(effect),
            None => &[],
        }
    }

    /// O(1) check against the bitfield.
    pub fn has(&self, target: CombatantId, effect: EffectType) -> bool {
        self.flags(target).contains(effect.flag())
    }

    /// Current bitfield of `target`.
    ///
    /// For a combatant unregistered without clearing, this is the snapshot
    /// taken at removal; otherwise empty if unregistered.
    pub fn flags(&self, target: CombatantId) -> StatusFlags {
        match self.tables.get(&target) {
            Some(table) => table.flags,
            None => self.departed.get(&target).copied().unwrap_or_default(),
        }
    }

    /// Sum of the magnitudes of every live instance of `effect`.
    pub fn total(&self, target: CombatantId, effect: EffectType) -> u32 {
        self.query(target, effect)
            .iter()
            .fold(0u32, |sum, instance| sum.saturating_add(instance.magnitude()))
    }

    /// Checks the bitfield invariant for `target`.
    pub fn is_consistent(&self, target: CombatantId) -> bool {
        self.tables
            .get(&target)
            .is_none_or(FactorTable::is_consistent)
    }
}

impl FactorParams {
    /// Same variant with its integer parameter replaced.
    pub(crate) const fn with_magnitude(self, value: u32) -> Self {
        match self {
            FactorParams::Shield { .. } => FactorParams::Shield { points: value },
            FactorParams::Regeneration { .. } => FactorParams::Regeneration { amount: value },
            FactorParams::ManaSiphon { .. } => FactorParams::ManaSiphon { rate: value },
            FactorParams::StaminaSiphon { .. } => FactorParams::StaminaSiphon { rate: value },
            FactorParams::Storm { .. } => FactorParams::Storm { damage: value },
            FactorParams::Burn { .. } => FactorParams::Burn { percent: value },
            FactorParams::Immunity => FactorParams::Immunity,
        }
    }
}
