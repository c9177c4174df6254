//! Additive stat bonuses contributed by the equipment/charm layer.
//!
//! The core never inspects where a bonus comes from; every contribution is
//! folded into a single [`StatBonuses`] record and added on top of the
//! combatant's base stats when an effective accessor is read.

use std::ops::AddAssign;

use strum::EnumCount;

use super::resources::ResourceKind;
use crate::state::Element;

/// Additive contributions to combatant stats.
///
/// All fields are flat additions. Percent-valued fields say so in their docs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonuses {
    pub attack: u32,
    pub defense: u32,
    pub elemental_attack: u32,
    pub elemental_defense: u32,

    pub max_life: u32,
    pub max_mana: u32,
    pub max_stamina: u32,
    pub max_charge: u32,

    /// Critical hit chance, in percent points.
    pub crit_rate: u32,
    /// Critical damage, in percent of the target's maximum life.
    pub crit_damage: u32,

    /// Extra damage on physical (weapon) hits.
    pub weapon_damage: u32,
    /// Extra damage per element family.
    pub element_damage: [u32; Element::COUNT],

    /// Turns added to every card lockdown this combatant applies.
    pub lockdown_duration: u32,
    /// Percent amplification of Burn damage this combatant inflicts.
    pub burn_amplification: u32,
}

impl StatBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bonus to the maximum of a resource pool.
    pub fn max_for(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Life => self.max_life,
            ResourceKind::Mana => self.max_mana,
            ResourceKind::Stamina => self.max_stamina,
            ResourceKind::Charge => self.max_charge,
        }
    }

    /// Bonus damage for a specific element family.
    pub fn element(&self, element: Element) -> u32 {
        self.element_damage[element.index()]
    }

    pub fn with_element(mut self, element: Element, amount: u32) -> Self {
        self.element_damage[element.index()] = amount;
        self
    }
}

impl AddAssign<&StatBonuses> for StatBonuses {
    fn add_assign(&mut self, rhs: &StatBonuses) {
        self.attack = self.attack.saturating_add(rhs.attack);
        self.defense = self.defense.saturating_add(rhs.defense);
        self.elemental_attack = self.elemental_attack.saturating_add(rhs.elemental_attack);
        self.elemental_defense = self.elemental_defense.saturating_add(rhs.elemental_defense);
        self.max_life = self.max_life.saturating_add(rhs.max_life);
        self.max_mana = self.max_mana.saturating_add(rhs.max_mana);
        self.max_stamina = self.max_stamina.saturating_add(rhs.max_stamina);
        self.max_charge = self.max_charge.saturating_add(rhs.max_charge);
        self.crit_rate = self.crit_rate.saturating_add(rhs.crit_rate);
        self.crit_damage = self.crit_damage.saturating_add(rhs.crit_damage);
        self.weapon_damage = self.weapon_damage.saturating_add(rhs.weapon_damage);
        for (mine, theirs) in self.element_damage.iter_mut().zip(rhs.element_damage) {
            *mine = mine.saturating_add(theirs);
        }
        self.lockdown_duration = self.lockdown_duration.saturating_add(rhs.lockdown_duration);
        self.burn_amplification = self
            .burn_amplification
            .saturating_add(rhs.burn_amplification);
    }
}

/// A passive trinket whose only effect is a stat contribution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Charm {
    pub name: String,
    pub bonuses: StatBonuses,
}

impl Charm {
    pub fn new(name: impl Into<String>, bonuses: StatBonuses) -> Self {
        Self {
            name: name.into(),
            bonuses,
        }
    }
}
