use tracing::{debug, error, info};

use crate::config::BattleConfig;
use crate::error::BattleError;
use crate::event::{BattleEvent, EventSink};
use crate::factor::rules::siphon::SiphonKind;
use crate::factor::rules::{burn, lockdown, regeneration, siphon, storm};
use crate::state::{BattleState, Side, TurnPhase};
use crate::stats::ResourceKind;

use super::{Battle, ResolveError, TurnError};

/// One step of turn-start resolution, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TurnStep {
    Regeneration,
    ManaSiphon,
    StaminaSiphon,
    Burn,
    Storm,
    /// Factor aging for the new owner only.
    Aging,
    /// Mana and stamina regeneration.
    ResourceRegen,
}

impl TurnStep {
    pub const ORDER: [TurnStep; 7] = [
        TurnStep::Regeneration,
        TurnStep::ManaSiphon,
        TurnStep::StaminaSiphon,
        TurnStep::Burn,
        TurnStep::Storm,
        TurnStep::Aging,
        TurnStep::ResourceRegen,
    ];
}

/// Turn scheduling methods for Battle.
impl Battle {
    /// Begins the first turn. Emits no `TurnEnded`.
    pub fn start(&mut self) -> Result<Side, TurnError> {
        self.ensure_idle()?;
        if self.state.turn.started() {
            return Err(TurnError::AlreadyStarted);
        }
        let owner = self.state.turn.owner;
        self.begin_turn(owner);
        Ok(owner)
    }

    /// Ends the current turn and starts the opponent's.
    ///
    /// The ending owner's card freezes count down before `TurnEnded`. Returns
    /// the new owner. If a resolution step defeats a combatant, the remaining
    /// steps are skipped and no `TurnStarted` is emitted.
    pub fn next_turn(&mut self) -> Result<Side, TurnError> {
        self.ensure_idle()?;
        if !self.state.turn.started() {
            return Err(TurnError::NotStarted);
        }

        let ending = self.state.turn.owner;
        let thawed = lockdown::tick(&mut self.state, ending, &mut self.listeners);
        if thawed > 0 {
            debug!(target: "duel::turn", owner = %ending, thawed, "cards thawed");
        }
        self.listeners.emit(BattleEvent::TurnEnded {
            owner: ending,
            turn: self.state.turn.number,
        });

        let owner = ending.opponent();
        self.state.turn.owner = owner;
        self.begin_turn(owner);
        Ok(owner)
    }

    /// Current owner of the turn.
    pub fn current_owner(&self) -> Side {
        self.state.turn.owner
    }

    fn ensure_idle(&self) -> Result<(), TurnError> {
        let phase = self.state.turn.phase;
        if phase != TurnPhase::Idle {
            return Err(TurnError::Reentrant { phase });
        }
        if self.state.is_over() {
            return Err(TurnError::BattleOver);
        }
        Ok(())
    }

    fn begin_turn(&mut self, owner: Side) {
        let turn = &mut self.state.turn;
        turn.number += 1;
        turn.actions_remaining = self.config.actions_per_turn;
        turn.locked = false;
        turn.phase = TurnPhase::Resolving;

        for step in TurnStep::ORDER {
            if self.state.is_over() {
                debug!(target: "duel::turn", %step, "battle ended during resolution");
                break;
            }
            if let Err(err) = self.run_step(step, owner) {
                error!(
                    target: "duel::turn",
                    %step,
                    code = err.error_code(),
                    error = %err,
                    "turn-start step failed"
                );
            }
        }
        self.state.turn.phase = TurnPhase::Idle;

        if self.state.is_over() {
            return;
        }

        let number = self.state.turn.number;
        let remaining = self.state.turn.actions_remaining;
        info!(target: "duel::turn", %owner, turn = number, "turn started");
        self.listeners.emit(BattleEvent::TurnStarted {
            owner,
            turn: number,
        });
        self.listeners.emit(BattleEvent::ActionsChanged { owner, remaining });
    }

    fn run_step(&mut self, step: TurnStep, owner: Side) -> Result<(), ResolveError> {
        let Battle {
            state,
            config,
            listeners,
            ..
        } = self;

        match step {
            TurnStep::Regeneration => {
                regeneration::resolve(state, owner, listeners)?;
            }
            TurnStep::ManaSiphon => {
                siphon::resolve(state, owner, SiphonKind::Mana, listeners)?;
            }
            TurnStep::StaminaSiphon => {
                siphon::resolve(state, owner, SiphonKind::Stamina, listeners)?;
            }
            TurnStep::Burn => {
                burn::resolve(state, owner, listeners)?;
            }
            TurnStep::Storm => {
                storm::resolve(state, owner, listeners)?;
            }
            TurnStep::Aging => {
                let id = state.id(owner);
                state.factors_mut().age_all(id, listeners);
            }
            TurnStep::ResourceRegen => regenerate(state, config, owner, listeners),
        }
        Ok(())
    }
}

/// `round(max * percent / 100)`, halves rounded up.
pub(crate) fn regen_amount(max: u32, percent: u32) -> u32 {
    let amount = (u64::from(max) * u64::from(percent) + 50) / 100;
    u32::try_from(amount).unwrap_or(u32::MAX)
}

fn regenerate(
    state: &mut BattleState,
    config: &BattleConfig,
    owner: Side,
    sink: &mut impl EventSink,
) {
    let combatant = state.combatant_mut(owner);
    for (kind, percent) in [
        (ResourceKind::Mana, config.mana_regen_percent),
        (ResourceKind::Stamina, config.stamina_regen_percent),
    ] {
        let amount = regen_amount(combatant.max(kind), percent);
        let gained = combatant.gain(kind, amount);
        if gained > 0 {
            sink.emit(BattleEvent::ResourceGained {
                target: combatant.id,
                kind,
                amount: gained,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regen_rounds_half_up() {
        assert_eq!(regen_amount(100, 10), 10);
        assert_eq!(regen_amount(95, 10), 10);
        assert_eq!(regen_amount(94, 10), 9);
        assert_eq!(regen_amount(0, 10), 0);
    }

    #[test]
    fn order_lists_every_step_once() {
        use strum::IntoEnumIterator;
        let listed: Vec<_> = TurnStep::iter().collect();
        assert_eq!(listed, TurnStep::ORDER.to_vec());
    }
}
