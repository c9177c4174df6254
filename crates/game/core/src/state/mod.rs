//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe the two combatants, the
//! factor tables and turn bookkeeping. Callers read this state freely but
//! mutate it exclusively through [`crate::engine::Battle`].
pub mod types;

pub use types::{
    Ability, BaseStats, Card, CardPayload, CardSlot, CharacterState, Combatant, CombatantId,
    Element, Side, TurnPhase, TurnState, WeaponClass, WeaponProfile,
};

use crate::factor::FactorStore;

/// Canonical snapshot of a duel in progress.
#[derive(Clone, Debug)]
pub struct BattleState {
    /// RNG seed fixed when the battle is built.
    ///
    /// Combined with `turn.nonce` to derive a unique seed for each roll.
    pub battle_seed: u64,

    /// Indexed by [`Side::index`].
    combatants: [Combatant; 2],

    factors: FactorStore,

    pub turn: TurnState,

    winner: Option<Side>,
}

impl BattleState {
    /// Creates the state and registers both combatants with the factor store.
    pub fn new(first: Combatant, second: Combatant, battle_seed: u64, first_turn: Side) -> Self {
        let mut factors = FactorStore::new();
        factors.register(first.id);
        factors.register(second.id);
        Self {
            battle_seed,
            combatants: [first, second],
            factors,
            turn: TurnState::new(first_turn),
            winner: None,
        }
    }

    #[inline]
    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    #[inline]
    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.combatants[side.index()]
    }

    /// Borrows `side` and its opponent mutably at the same time.
    pub fn pair_mut(&mut self, side: Side) -> (&mut Combatant, &mut Combatant) {
        let [first, second] = &mut self.combatants;
        match side {
            Side::First => (first, second),
            Side::Second => (second, first),
        }
    }

    #[inline]
    pub fn id(&self, side: Side) -> CombatantId {
        self.combatant(side).id
    }

    pub fn side_of(&self, id: CombatantId) -> Option<Side> {
        Side::BOTH.into_iter().find(|side| self.id(*side) == id)
    }

    pub fn factors(&self) -> &FactorStore {
        &self.factors
    }

    pub(crate) fn factors_mut(&mut self) -> &mut FactorStore {
        &mut self.factors
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub(crate) fn declare_winner(&mut self, side: Side) {
        self.winner.get_or_insert(side);
    }

    /// Returns the current roll nonce and advances it.
    pub(crate) fn next_nonce(&mut self) -> u64 {
        let nonce = self.turn.nonce;
        self.turn.nonce = self.turn.nonce.wrapping_add(1);
        nonce
    }
}
