//! Turn scheduling and action execution.
//!
//! [`Battle`] is the only mutable entry point into a duel. It owns the
//! [`BattleState`], the RNG oracle and the injected listeners, and drives:
//!
//! - turn flow ([`Battle::start`], [`Battle::next_turn`])
//! - the action economy ([`Battle::try_action`] and its conveniences)
//!
//! Actions run against an [`AbilityContext`], which exposes damage, healing
//! and factor application but not the scheduler, so an action cannot re-enter
//! turn resolution.

mod actions;
mod context;
mod errors;
mod turns;

pub use context::AbilityContext;
pub use errors::{ActionError, BuildError, ResolveError, TurnError};
pub use turns::TurnStep;

use tracing::debug;

use crate::config::BattleConfig;
use crate::env::{PcgRng, RngOracle};
use crate::event::{BattleListener, ListenerRegistry};
use crate::factor::rules::{FreezeOutcome, lockdown};
use crate::factor::{ApplyOutcome, FactorParams};
use crate::state::{BattleState, Combatant, Side, TurnState};

/// A two-combatant battle.
pub struct Battle {
    state: BattleState,
    config: BattleConfig,
    rng: Box<dyn RngOracle>,
    listeners: ListenerRegistry,
}

impl Battle {
    pub fn builder() -> BattleBuilder {
        BattleBuilder::default()
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn turn(&self) -> &TurnState {
        &self.state.turn
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        self.state.combatant(side)
    }

    /// Direct access for setup between turns (equipping, scripted scenarios).
    ///
    /// Changes made here emit no notifications.
    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        self.state.combatant_mut(side)
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    /// Applies a factor from outside any action (pre-battle buffs, scripted
    /// hazards). Subject to the same Storm/Immunity rules as in-action applies.
    pub fn apply_factor(&mut self, target: Side, params: FactorParams, duration: u32) -> ApplyOutcome {
        let id = self.state.id(target);
        self.state
            .factors_mut()
            .apply(id, params, duration, &mut self.listeners)
    }

    /// Freezes a card from outside any action.
    pub fn freeze_card(
        &mut self,
        applier: Side,
        owner: Side,
        slot: usize,
        turns: u32,
    ) -> FreezeOutcome {
        lockdown::freeze(
            &mut self.state,
            applier,
            owner,
            slot,
            turns,
            &mut self.listeners,
        )
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

/// Builder for assembling a [`Battle`].
#[derive(Default)]
pub struct BattleBuilder {
    first: Option<Combatant>,
    second: Option<Combatant>,
    config: Option<BattleConfig>,
    seed: Option<u64>,
    rng: Option<Box<dyn RngOracle>>,
    first_turn: Option<Side>,
    listeners: ListenerRegistry,
}

impl BattleBuilder {
    /// Set the combatant seated first
    pub fn first(mut self, combatant: Combatant) -> Self {
        self.first = Some(combatant);
        self
    }

    /// Set the combatant seated second
    pub fn second(mut self, combatant: Combatant) -> Self {
        self.second = Some(combatant);
        self
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the battle seed used for critical rolls
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the default PCG oracle
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Set which side owns the first turn (default: first)
    pub fn first_turn(mut self, side: Side) -> Self {
        self.first_turn = Some(side);
        self
    }

    pub fn listener(mut self, listener: impl BattleListener + 'static) -> Self {
        self.listeners.register(Box::new(listener));
        self
    }

    /// Build the battle and register both combatants with the factor store.
    pub fn build(self) -> Result<Battle, BuildError> {
        let first = self.first.ok_or(BuildError::MissingCombatant(Side::First))?;
        let second = self.second.ok_or(BuildError::MissingCombatant(Side::Second))?;
        if first.id == second.id {
            return Err(BuildError::DuplicateId(first.id));
        }

        let seed = self.seed.unwrap_or_default();
        debug!(
            target: "duel::turn",
            first = %first.id,
            second = %second.id,
            seed,
            "battle built"
        );

        Ok(Battle {
            state: BattleState::new(first, second, seed, self.first_turn.unwrap_or(Side::First)),
            config: self.config.unwrap_or_default(),
            rng: self.rng.unwrap_or_else(|| Box::new(PcgRng)),
            listeners: self.listeners,
        })
    }
}
