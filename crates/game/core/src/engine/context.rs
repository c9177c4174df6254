//! The view of a battle handed to actions and ability scripts.

use tracing::debug;

use crate::combat::pipeline::{self, DamageReport};
use crate::combat::{DamageOrigin, DamageRequest};
use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::event::{BattleEvent, EventSink};
use crate::factor::rules::{FreezeOutcome, lockdown};
use crate::factor::{ApplyOutcome, EffectType, FactorParams, FactorStore};
use crate::state::{BattleState, CharacterState, Combatant, Side, WeaponProfile};
use crate::stats::{ResourceCost, ResourceKind};

/// Everything an action may do to the battle.
///
/// Borrowed from [`super::Battle`] for the duration of one action. It grants
/// no access to the scheduler.
pub struct AbilityContext<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
    rng: &'a dyn RngOracle,
    sink: &'a mut dyn EventSink,
    actor: Side,
}

impl<'a> AbilityContext<'a> {
    pub(crate) fn new(
        state: &'a mut BattleState,
        config: &'a BattleConfig,
        rng: &'a dyn RngOracle,
        sink: &'a mut dyn EventSink,
        actor: Side,
    ) -> Self {
        Self {
            state,
            config,
            rng,
            sink,
            actor,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The acting side.
    #[inline]
    pub fn actor(&self) -> Side {
        self.actor
    }

    #[inline]
    pub fn opponent(&self) -> Side {
        self.actor.opponent()
    }

    pub fn state(&self) -> &BattleState {
        &*self.state
    }

    pub fn config(&self) -> &BattleConfig {
        self.config
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        self.state.combatant(side)
    }

    pub fn factors(&self) -> &FactorStore {
        self.state.factors()
    }

    /// Script scratch state of the actor.
    pub fn character_mut(&mut self) -> &mut CharacterState {
        &mut self.state.combatant_mut(self.actor).character
    }

    // ========================================================================
    // Damage and resources
    // ========================================================================

    /// Resolves a hit from the actor against `target`.
    pub fn deal_damage(&mut self, target: Side, request: DamageRequest) -> DamageReport {
        self.hit(target, &request, 0)
    }

    fn hit(&mut self, target: Side, request: &DamageRequest, context: u32) -> DamageReport {
        pipeline::resolve(
            self.state,
            self.config,
            self.rng,
            Some(self.actor),
            target,
            request,
            context,
            &mut self.sink,
        )
    }

    pub fn heal(&mut self, target: Side, amount: u32) -> u32 {
        pipeline::heal(self.state, target, amount, &mut self.sink)
    }

    /// Adds to a pool. Life goes through healing.
    pub fn gain(&mut self, target: Side, kind: ResourceKind, amount: u32) -> u32 {
        if kind == ResourceKind::Life {
            return self.heal(target, amount);
        }
        let combatant = self.state.combatant_mut(target);
        let gained = combatant.gain(kind, amount);
        if gained > 0 {
            self.sink.emit(BattleEvent::ResourceGained {
                target: combatant.id,
                kind,
                amount: gained,
            });
        }
        gained
    }

    /// Removes from a pool. Life loss here is not damage but can still defeat.
    pub fn lose(&mut self, target: Side, kind: ResourceKind, amount: u32) -> u32 {
        if kind == ResourceKind::Life {
            return pipeline::drain_life(self.state, target, amount, &mut self.sink);
        }
        let combatant = self.state.combatant_mut(target);
        let lost = combatant.lose(kind, amount);
        if lost > 0 {
            self.sink.emit(BattleEvent::ResourceLost {
                target: combatant.id,
                kind,
                amount: lost,
            });
        }
        lost
    }

    /// Deducts `cost` from the actor, all or nothing.
    pub fn pay(&mut self, cost: &ResourceCost) -> bool {
        let combatant = self.state.combatant_mut(self.actor);
        if !combatant.pay(cost) {
            return false;
        }
        let target = combatant.id;
        for (kind, amount) in cost.entries() {
            self.sink.emit(BattleEvent::ResourceLost {
                target,
                kind,
                amount,
            });
        }
        true
    }

    /// Returns a previously paid cost to the actor.
    pub(crate) fn refund(&mut self, cost: &ResourceCost) {
        let actor = self.actor;
        for (kind, amount) in cost.entries() {
            self.gain(actor, kind, amount);
        }
    }

    // ========================================================================
    // Factors and cards
    // ========================================================================

    pub fn apply_factor(&mut self, target: Side, params: FactorParams, duration: u32) -> ApplyOutcome {
        let id = self.state.id(target);
        self.state
            .factors_mut()
            .apply(id, params, duration, &mut self.sink)
    }

    /// Removes every instance of `effect` from `target` (cleanses, dispels).
    pub fn remove_factors(&mut self, target: Side, effect: EffectType) -> usize {
        let id = self.state.id(target);
        self.state
            .factors_mut()
            .remove_all(id, effect, &mut self.sink)
    }

    /// Freezes a card of `owner`, adding the actor's lockdown bonus.
    pub fn freeze_card(&mut self, owner: Side, slot: usize, turns: u32) -> FreezeOutcome {
        lockdown::freeze(self.state, self.actor, owner, slot, turns, &mut self.sink)
    }

    pub fn thaw_card(&mut self, owner: Side, slot: usize) -> bool {
        lockdown::thaw(self.state, owner, slot, &mut self.sink)
    }

    // ========================================================================
    // Normal attack
    // ========================================================================

    /// Swings every usable weapon card (at most two), each with its own
    /// critical roll. Without a usable weapon, a single unarmed physical hit.
    ///
    /// Grants the configured ultimate charge afterwards.
    pub fn normal_attack(&mut self) -> Vec<DamageReport> {
        let target = self.opponent();
        let weapons: Vec<(usize, WeaponProfile)> = self
            .state
            .combatant(self.actor)
            .cards()
            .iter()
            .enumerate()
            .filter(|(slot, card)| {
                let usable = !card.is_locked();
                if !usable && card.weapon_profile().is_some() {
                    debug!(target: "duel::combat", slot, "frozen weapon skipped");
                }
                usable
            })
            .filter_map(|(slot, card)| card.weapon_profile().map(|profile| (slot, profile)))
            .take(BattleConfig::MAX_WEAPONS_PER_ATTACK)
            .collect();

        let reports = if weapons.is_empty() {
            let unarmed = DamageRequest::physical(0).with_origin(DamageOrigin::Unarmed);
            vec![self.hit(target, &unarmed, 0)]
        } else {
            weapons
                .into_iter()
                .map(|(slot, profile)| {
                    let request = DamageRequest::weapon(profile, slot);
                    self.hit(target, &request, slot as u32)
                })
                .collect()
        };

        let charge = self.config.charge_per_attack;
        self.gain(self.actor, ResourceKind::Charge, charge);
        reports
    }
}
