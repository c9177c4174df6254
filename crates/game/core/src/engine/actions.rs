use std::sync::Arc;

use tracing::{debug, warn};

use crate::combat::DamageReport;
use crate::error::BattleError;
use crate::event::{BattleEvent, EventSink};
use crate::state::{CardPayload, TurnPhase};

use super::{AbilityContext, ActionError, Battle};

/// Action economy methods for Battle.
impl Battle {
    /// Runs `action` for the current turn owner.
    ///
    /// - Swift actions run regardless of the budget and never spend it
    /// - Standard actions are rejected when the budget is empty or locked;
    ///   otherwise they run and spend one action whatever they return, and
    ///   the budget locks when it reaches zero
    ///
    /// A rejected action runs nothing and spends nothing. Effects applied by
    /// an action before it fails stay applied. Every error is logged and
    /// returned.
    pub fn try_action<T>(
        &mut self,
        is_swift: bool,
        action: impl FnOnce(&mut AbilityContext<'_>) -> Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        if let Err(err) = self.check_can_act(is_swift) {
            return Err(self.rejected(err));
        }

        let actor = self.state.turn.owner;
        self.state.turn.phase = TurnPhase::Acting;
        let result = {
            let mut ctx = AbilityContext::new(
                &mut self.state,
                &self.config,
                self.rng.as_ref(),
                &mut self.listeners,
                actor,
            );
            action(&mut ctx)
        };
        self.state.turn.phase = TurnPhase::Idle;

        if !is_swift {
            self.spend_action();
        }
        result.map_err(|err| self.rejected(err))
    }

    /// Normal attack with every usable weapon card.
    pub fn normal_attack(&mut self, is_swift: bool) -> Result<Vec<DamageReport>, ActionError> {
        self.try_action(is_swift, |ctx| Ok(ctx.normal_attack()))
    }

    /// Uses the ability card in `slot` of the current owner.
    ///
    /// Lock and cost are checked before anything is spent. Swiftness comes from
    /// the card. If the ability fails, its cost is refunded but the action is
    /// still used.
    pub fn use_card(&mut self, slot: usize) -> Result<(), ActionError> {
        let owner = self.state.turn.owner;
        let combatant = self.state.combatant(owner);
        let Some(card) = combatant.card(slot) else {
            return Err(self.rejected(ActionError::CardNotFound { slot }));
        };
        let swift = card.swift;
        let cost = card.cost;
        let ability = match &card.payload {
            CardPayload::Ability(ability) => Arc::clone(ability),
            CardPayload::Weapon(_) => return Err(self.rejected(ActionError::NotAnAbility { slot })),
        };
        let precheck = if card.is_locked() {
            Err(ActionError::CardFrozen {
                slot,
                turns: card.frozen_turns(),
            })
        } else if !combatant.can_afford(&cost) {
            Err(ActionError::InsufficientResources { slot })
        } else {
            Ok(())
        };
        if let Err(err) = self.check_can_act(swift).and(precheck) {
            return Err(self.rejected(err));
        }

        debug!(target: "duel::turn", slot, ability = ability.name(), "using card");
        self.try_action(swift, |ctx| {
            if !ctx.pay(&cost) {
                return Err(ActionError::InsufficientResources { slot });
            }
            let result = ability.execute(ctx);
            if result.is_err() {
                ctx.refund(&cost);
            }
            result
        })
    }

    fn check_can_act(&self, is_swift: bool) -> Result<(), ActionError> {
        let turn = &self.state.turn;
        if turn.phase != TurnPhase::Idle {
            return Err(ActionError::Reentrant { phase: turn.phase });
        }
        if !turn.started() {
            return Err(ActionError::NotStarted);
        }
        if self.state.is_over() {
            return Err(ActionError::BattleOver);
        }
        if is_swift {
            return Ok(());
        }
        if turn.locked {
            return Err(ActionError::ActionsLocked);
        }
        if turn.actions_remaining == 0 {
            return Err(ActionError::NoActionsRemaining);
        }
        Ok(())
    }

    fn spend_action(&mut self) {
        let turn = &mut self.state.turn;
        let owner = turn.owner;
        turn.actions_remaining = turn.actions_remaining.saturating_sub(1);
        let remaining = turn.actions_remaining;
        self.listeners
            .emit(BattleEvent::ActionsChanged { owner, remaining });

        if remaining == 0 {
            self.state.turn.locked = true;
            debug!(target: "duel::turn", %owner, "actions locked");
            self.listeners.emit(BattleEvent::ActionsLocked { owner });
        }
    }

    /// Logs a rejection and hands it back.
    fn rejected(&self, err: ActionError) -> ActionError {
        let owner = self.state.turn.owner;
        if err.severity().is_internal() {
            warn!(target: "duel::turn", %owner, code = err.error_code(), error = %err, "action rejected");
        } else {
            debug!(target: "duel::turn", %owner, code = err.error_code(), error = %err, "action rejected");
        }
        err
    }
}
