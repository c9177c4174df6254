//! Listener that writes notifications to stdout.

use duel_core::{BattleEvent, BattleListener, DamageOrigin};
use tracing::warn;

use crate::config::EventFormat;

/// Prints every notification as it is emitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventPrinter {
    format: EventFormat,
}

impl EventPrinter {
    pub fn new(format: EventFormat) -> Self {
        Self { format }
    }

    /// Renders one notification in this printer's format.
    pub fn render(&self, event: &BattleEvent) -> Option<String> {
        match self.format {
            EventFormat::Text => Some(describe(event)),
            EventFormat::Json => match serde_json::to_string(event) {
                Ok(line) => Some(line),
                Err(err) => {
                    warn!(error = %err, "failed to serialize event");
                    None
                }
            },
        }
    }
}

impl BattleListener for EventPrinter {
    fn on_event(&mut self, event: &BattleEvent) {
        if let Some(line) = self.render(event) {
            println!("{line}");
        }
    }
}

/// One-line human-readable description of a notification.
pub fn describe(event: &BattleEvent) -> String {
    match event {
        BattleEvent::FactorApplied {
            target,
            effect,
            duration,
            replaced,
        } => {
            let verb = if *replaced { "refreshed" } else { "gained" };
            format!("{target} {verb} {effect} for {duration} turn(s)")
        }
        BattleEvent::FactorRemoved {
            target,
            effect,
            index,
        } => format!("{target} lost {effect} #{index}"),
        BattleEvent::FactorCleared { target, effect } => format!("{target} is no longer under {effect}"),
        BattleEvent::FactorsAged {
            target,
            expired,
            remaining,
        } => format!("{target}: {expired} factor(s) expired, {remaining} remaining"),
        BattleEvent::FactorBlocked {
            target,
            effect,
            reason,
        } => format!("{effect} on {target} blocked by {reason}"),
        BattleEvent::TurnStarted { owner, turn } => format!("-- turn {turn}: {owner} --"),
        BattleEvent::TurnEnded { owner, turn } => format!("{owner} ends turn {turn}"),
        BattleEvent::ActionsChanged { owner, remaining } => {
            format!("{owner} has {remaining} action(s) left")
        }
        BattleEvent::ActionsLocked { owner } => format!("{owner} is out of actions"),
        BattleEvent::DamageDealt {
            source,
            target,
            origin,
            amount,
            absorbed,
            critical,
        } => {
            let attacker = source.map_or_else(|| "effect".to_string(), |id| id.to_string());
            let origin = match origin {
                DamageOrigin::Weapon { slot } => format!("weapon {slot}"),
                DamageOrigin::Unarmed => "bare hands".to_string(),
                DamageOrigin::Ability => "ability".to_string(),
                DamageOrigin::Factor(effect) => effect.to_string(),
            };
            let crit = if *critical { " (critical)" } else { "" };
            format!("{attacker} hits {target} with {origin} for {amount}{crit}, {absorbed} absorbed")
        }
        BattleEvent::HealingReceived { target, amount } => format!("{target} heals {amount}"),
        BattleEvent::ResourceGained {
            target,
            kind,
            amount,
        } => format!("{target} +{amount} {kind}"),
        BattleEvent::ResourceLost {
            target,
            kind,
            amount,
        } => format!("{target} -{amount} {kind}"),
        BattleEvent::ResourceStolen {
            from,
            to,
            kind,
            amount,
        } => format!("{to} steals {amount} {kind} from {from}"),
        BattleEvent::CardLocked { owner, slot, turns } => {
            format!("{owner}'s card {slot} frozen for {turns} turn(s)")
        }
        BattleEvent::CardUnlocked { owner, slot } => format!("{owner}'s card {slot} thawed"),
        BattleEvent::CardLockBlocked {
            owner,
            slot,
            reason,
        } => format!("freeze on {owner}'s card {slot} blocked by {reason}"),
        BattleEvent::Defeated { target } => format!("{target} is defeated"),
        BattleEvent::Victory { winner } => format!("{winner} wins"),
    }
}
