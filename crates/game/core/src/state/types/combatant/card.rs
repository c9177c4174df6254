//! Equipped cards.
//!
//! A card occupies one equipment slot of a combatant and is either a weapon
//! (consulted by normal attacks) or an ability (executed through the action
//! scheduler). Cards carry their own lockdown countdown, independent of the
//! factor store.

use std::fmt;
use std::sync::Arc;

use crate::combat::DamageFamily;
use crate::engine::{AbilityContext, ActionError};
use crate::stats::{ResourceCost, StatBonuses};

/// Slot type a card is equipped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CardSlot {
    Weapon,
    Skill,
    Ultimate,
}

/// Scripted effect of an ability card.
///
/// The core only calls [`Ability::execute`]; the narrative content of an
/// ability lives entirely in its implementation.
pub trait Ability: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Runs the ability for the acting combatant.
    fn execute(&self, ctx: &mut AbilityContext<'_>) -> Result<(), ActionError>;
}

/// Damage profile of a weapon card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub base_damage: u32,
    pub family: DamageFamily,
}

/// What a card does when used.
#[derive(Clone)]
pub enum CardPayload {
    Weapon(WeaponProfile),
    Ability(Arc<dyn Ability>),
}

impl fmt::Debug for CardPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardPayload::Weapon(profile) => f.debug_tuple("Weapon").field(profile).finish(),
            CardPayload::Ability(ability) => f.debug_tuple("Ability").field(&ability.name()).finish(),
        }
    }
}

/// An equipped card.
#[derive(Clone, Debug)]
pub struct Card {
    pub name: String,
    pub slot: CardSlot,
    pub cost: ResourceCost,
    /// Swift cards do not consume the per-turn action budget.
    pub swift: bool,
    bonuses: StatBonuses,
    pub payload: CardPayload,
    frozen_turns: u32,
}

impl Card {
    /// Creates a weapon card.
    pub fn weapon(name: impl Into<String>, profile: WeaponProfile) -> Self {
        Self {
            name: name.into(),
            slot: CardSlot::Weapon,
            cost: ResourceCost::FREE,
            swift: false,
            bonuses: StatBonuses::default(),
            payload: CardPayload::Weapon(profile),
            frozen_turns: 0,
        }
    }

    /// Creates an ability card for the given slot.
    pub fn ability(
        name: impl Into<String>,
        slot: CardSlot,
        cost: ResourceCost,
        ability: Arc<dyn Ability>,
    ) -> Self {
        Self {
            name: name.into(),
            slot,
            cost,
            swift: false,
            bonuses: StatBonuses::default(),
            payload: CardPayload::Ability(ability),
            frozen_turns: 0,
        }
    }

    pub fn with_swift(mut self, swift: bool) -> Self {
        self.swift = swift;
        self
    }

    pub fn with_bonuses(mut self, bonuses: StatBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    /// Passive contribution folded into the holder's effective stats.
    pub fn bonuses(&self) -> &StatBonuses {
        &self.bonuses
    }

    /// Weapon profile, if this is a weapon card.
    pub fn weapon_profile(&self) -> Option<WeaponProfile> {
        match &self.payload {
            CardPayload::Weapon(profile) => Some(*profile),
            CardPayload::Ability(_) => None,
        }
    }

    // ========================================================================
    // Lockdown
    // ========================================================================

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.frozen_turns > 0
    }

    /// Remaining lockdown turns (0 when usable).
    #[inline]
    pub fn frozen_turns(&self) -> u32 {
        self.frozen_turns
    }

    /// Freezes the card for `turns`. A longer existing freeze is kept.
    pub fn lock(&mut self, turns: u32) {
        self.frozen_turns = self.frozen_turns.max(turns);
    }

    pub fn unlock(&mut self) {
        self.frozen_turns = 0;
    }

    /// Advances the countdown by one turn. Returns true if the card thawed.
    pub fn tick_lock(&mut self) -> bool {
        if self.frozen_turns == 0 {
            return false;
        }
        self.frozen_turns -= 1;
        self.frozen_turns == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Card {
        Card::weapon(
            "sword",
            WeaponProfile {
                base_damage: 10,
                family: DamageFamily::Physical,
            },
        )
    }

    #[test]
    fn lock_keeps_longer_freeze() {
        let mut card = sword();
        card.lock(3);
        card.lock(1);
        assert_eq!(card.frozen_turns(), 3);
        assert!(card.is_locked());
    }

    #[test]
    fn tick_lock_reports_thaw_once() {
        let mut card = sword();
        card.lock(2);
        assert!(!card.tick_lock());
        assert!(card.tick_lock());
        assert!(!card.tick_lock());
        assert!(!card.is_locked());
    }

    #[test]
    fn unlock_clears_countdown() {
        let mut card = sword();
        card.lock(5);
        card.unlock();
        assert!(!card.is_locked());
    }
}
