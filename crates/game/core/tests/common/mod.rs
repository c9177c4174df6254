//! Shared fixtures for duel-core integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use duel_core::{
    Ability, AbilityContext, ActionError, BaseStats, Battle, BattleConfig, BattleEvent, Combatant,
    CombatantId, DamageRequest, EventRecorder, FixedRoll, Pool, Resources, RngOracle,
};

pub const FIRST_ID: CombatantId = CombatantId(1);
pub const SECOND_ID: CombatantId = CombatantId(2);

/// Combatant with zeroed stats, full mana/stamina (100) and empty charge.
pub fn fighter(id: CombatantId, life: u32) -> Combatant {
    Combatant::new(
        id,
        format!("fighter-{}", id.0),
        BaseStats::default(),
        Resources::new(
            Pool::full(life),
            Pool::full(100),
            Pool::full(100),
            Pool::new(0, 100),
        ),
    )
}

/// Config without turn-start mana/stamina regeneration.
pub fn quiet_config() -> BattleConfig {
    BattleConfig::default().with_regen_percents(0, 0)
}

/// Battle whose critical rolls always come up 100 (only a 100% chance crits).
pub fn duel(first: Combatant, second: Combatant) -> (Battle, EventRecorder) {
    duel_with(first, second, quiet_config(), FixedRoll(100))
}

pub fn duel_with(
    first: Combatant,
    second: Combatant,
    config: BattleConfig,
    rng: impl RngOracle + 'static,
) -> (Battle, EventRecorder) {
    let recorder = EventRecorder::new();
    let battle = Battle::builder()
        .first(first)
        .second(second)
        .config(config)
        .rng(rng)
        .listener(recorder.clone())
        .build()
        .expect("both combatants are present");
    (battle, recorder)
}

/// Oracle replaying a fixed sequence of d100 rolls and counting calls.
#[derive(Debug)]
pub struct ScriptedRolls {
    rolls: Vec<u32>,
    calls: AtomicUsize,
}

impl ScriptedRolls {
    pub fn new(rolls: Vec<u32>) -> Self {
        Self {
            rolls,
            calls: AtomicUsize::new(0),
        }
    }
}

impl RngOracle for ScriptedRolls {
    fn next_u32(&self, _seed: u64) -> u32 {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.rolls[call % self.rolls.len()] - 1
    }
}

/// Damage events in order, as `(amount, absorbed, critical)`.
pub fn damage_dealt(events: &[BattleEvent]) -> Vec<(u32, u32, bool)> {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::DamageDealt {
                amount,
                absorbed,
                critical,
                ..
            } => Some((*amount, *absorbed, *critical)),
            _ => None,
        })
        .collect()
}

/// Ability that fails after running, for refund checks.
pub struct Fizzle;

impl Ability for Fizzle {
    fn name(&self) -> &str {
        "fizzle"
    }

    fn execute(&self, _ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
        Err(ActionError::AbilityFailed("nothing happens".into()))
    }
}

/// Ability that hits the opponent with a fixed physical blow.
pub struct Smite(pub u32);

impl Ability for Smite {
    fn name(&self) -> &str {
        "smite"
    }

    fn execute(&self, ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
        let target = ctx.opponent();
        ctx.deal_damage(target, DamageRequest::physical(self.0));
        Ok(())
    }
}
