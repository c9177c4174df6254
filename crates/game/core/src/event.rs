//! Battle notifications.
//!
//! Every observable change (factor lifecycle, turn flow, damage, resources,
//! defeat) is reported as a [`BattleEvent`] through an [`EventSink`] passed
//! explicitly into the mutating call. The core never requires a listener:
//! a battle with an empty [`ListenerRegistry`] behaves identically.

use std::cell::RefCell;
use std::rc::Rc;

use crate::combat::DamageOrigin;
use crate::factor::{BlockReason, EffectType};
use crate::state::{CombatantId, Side};
use crate::stats::ResourceKind;

/// A single notification emitted by the battle core.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    // ========================================================================
    // Factors
    // ========================================================================
    FactorApplied {
        target: CombatantId,
        effect: EffectType,
        duration: u32,
        /// True when an overwrite-class instance replaced an older one.
        replaced: bool,
    },
    FactorRemoved {
        target: CombatantId,
        effect: EffectType,
        index: usize,
    },
    /// The last instance of `effect` is gone and its status bit was cleared.
    FactorCleared {
        target: CombatantId,
        effect: EffectType,
    },
    /// One aggregate notification per aging pass.
    FactorsAged {
        target: CombatantId,
        expired: usize,
        remaining: usize,
    },
    FactorBlocked {
        target: CombatantId,
        effect: EffectType,
        reason: BlockReason,
    },

    // ========================================================================
    // Turn flow
    // ========================================================================
    TurnStarted {
        owner: Side,
        turn: u32,
    },
    TurnEnded {
        owner: Side,
        turn: u32,
    },
    ActionsChanged {
        owner: Side,
        remaining: u8,
    },
    ActionsLocked {
        owner: Side,
    },

    // ========================================================================
    // Damage and resources
    // ========================================================================
    DamageDealt {
        source: Option<CombatantId>,
        target: CombatantId,
        origin: DamageOrigin,
        /// Life actually removed.
        amount: u32,
        /// Points soaked by shields.
        absorbed: u32,
        critical: bool,
    },
    HealingReceived {
        target: CombatantId,
        amount: u32,
    },
    ResourceGained {
        target: CombatantId,
        kind: ResourceKind,
        amount: u32,
    },
    ResourceLost {
        target: CombatantId,
        kind: ResourceKind,
        amount: u32,
    },
    ResourceStolen {
        from: CombatantId,
        to: CombatantId,
        kind: ResourceKind,
        amount: u32,
    },

    // ========================================================================
    // Cards
    // ========================================================================
    CardLocked {
        owner: CombatantId,
        slot: usize,
        turns: u32,
    },
    CardUnlocked {
        owner: CombatantId,
        slot: usize,
    },
    CardLockBlocked {
        owner: CombatantId,
        slot: usize,
        reason: BlockReason,
    },

    // ========================================================================
    // Outcome
    // ========================================================================
    Defeated {
        target: CombatantId,
    },
    Victory {
        winner: CombatantId,
    },
}

/// Destination for notifications produced by a mutating call.
pub trait EventSink {
    fn emit(&mut self, event: BattleEvent);
}

impl EventSink for Vec<BattleEvent> {
    fn emit(&mut self, event: BattleEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: BattleEvent) {
        (**self).emit(event);
    }
}

/// Consumer of battle notifications (presentation, logging, tests).
pub trait BattleListener {
    fn on_event(&mut self, event: &BattleEvent);
}

/// Listeners injected into a battle at construction.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Box<dyn BattleListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Box<dyn BattleListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl EventSink for ListenerRegistry {
    fn emit(&mut self, event: BattleEvent) {
        tracing::trace!(target: "duel::event", ?event, "emit");
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Listener that records every event into a shared buffer.
///
/// Clone the recorder before registering it to keep a handle for reading.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<BattleEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the recorded events.
    pub fn events(&self) -> Vec<BattleEvent> {
        self.events.borrow().clone()
    }

    /// Removes and returns the recorded events.
    pub fn take(&self) -> Vec<BattleEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn count(&self, predicate: impl Fn(&BattleEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }
}

impl BattleListener for EventRecorder {
    fn on_event(&mut self, event: &BattleEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_fans_out_to_every_listener() {
        let first = EventRecorder::new();
        let second = EventRecorder::new();
        let mut registry = ListenerRegistry::new();
        registry.register(Box::new(first.clone()));
        registry.register(Box::new(second.clone()));

        registry.emit(BattleEvent::Defeated {
            target: CombatantId(7),
        });

        assert_eq!(first.events().len(), 1);
        assert_eq!(second.take().len(), 1);
        assert!(second.events().is_empty());
    }

    #[test]
    fn empty_registry_accepts_events() {
        let mut registry = ListenerRegistry::new();
        registry.emit(BattleEvent::ActionsLocked { owner: Side::First });
        assert!(registry.is_empty());
    }
}
