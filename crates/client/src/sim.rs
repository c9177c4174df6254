//! Fixed-rotation battle loop.

use anyhow::{Context, Result};
use tracing::{debug, info};

use duel_core::{Battle, BattleListener, CardPayload, CombatantId, Side};

use crate::config::SimConfig;
use crate::roster;

/// How a simulated duel ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// `None` when the turn cap was reached first.
    pub winner: Option<Side>,
    pub turns: u32,
    /// Remaining life of both sides, first seat first.
    pub life: [u32; 2],
}

/// A duel between the two built-in combatants.
pub struct Simulation {
    battle: Battle,
    max_turns: u32,
}

impl Simulation {
    pub fn new(config: &SimConfig, listener: impl BattleListener + 'static) -> Result<Self> {
        let battle = Battle::builder()
            .first(roster::ember(CombatantId(1)))
            .second(roster::tide(CombatantId(2)))
            .config(config.battle.clone())
            .seed(config.seed)
            .listener(listener)
            .build()
            .context("failed to assemble the duel")?;

        Ok(Self {
            battle,
            max_turns: config.max_turns,
        })
    }

    /// Plays until one side is defeated or the turn cap is reached.
    pub fn run(mut self) -> Result<Outcome> {
        self.battle.start().context("failed to start the duel")?;

        while !self.battle.is_over() {
            self.play_turn();
            if self.battle.is_over() || self.battle.turn().number >= self.max_turns {
                break;
            }
            self.battle.next_turn().context("failed to advance the turn")?;
        }

        let outcome = Outcome {
            winner: self.battle.winner(),
            turns: self.battle.turn().number,
            life: Side::BOTH.map(|side| self.battle.combatant(side).life()),
        };
        info!(
            winner = ?outcome.winner,
            turns = outcome.turns,
            first_life = outcome.life[0],
            second_life = outcome.life[1],
            "duel finished"
        );
        Ok(outcome)
    }

    /// Tries every ability card in slot order, then attacks with whatever
    /// budget is left.
    fn play_turn(&mut self) {
        let owner = self.battle.current_owner();
        let ability_slots: Vec<usize> = self
            .battle
            .combatant(owner)
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, card)| matches!(card.payload, CardPayload::Ability(_)))
            .map(|(slot, _)| slot)
            .collect();

        for slot in ability_slots {
            if self.battle.is_over() || self.battle.turn().locked {
                return;
            }
            if let Err(err) = self.battle.use_card(slot) {
                debug!(%owner, slot, error = %err, "card skipped");
            }
        }

        if self.battle.is_over() || self.battle.turn().locked {
            return;
        }
        if let Err(err) = self.battle.normal_attack(false) {
            debug!(%owner, error = %err, "attack skipped");
        }
    }
}
