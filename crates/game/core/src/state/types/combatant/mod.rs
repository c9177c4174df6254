//! Combatant state.
//!
//! This module contains all types specific to a combatant:
//! - Combatant: stats, resource pools, equipped cards and charms
//! - Cards: weapon and ability cards with their own lockdown countdown
//! - CharacterState: named flags and counters for character-specific scripts

pub mod card;

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

pub use card::{Ability, Card, CardPayload, CardSlot, WeaponProfile};

use super::{CombatantId, Element, WeaponClass};
use crate::config::BattleConfig;
use crate::stats::{Charm, ResourceCost, ResourceKind, Resources, StatBonuses};

/// Base (unbuffed) offensive and defensive stats.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub attack: u32,
    pub defense: u32,
    pub elemental_attack: u32,
    pub elemental_defense: u32,
    /// Critical hit chance in percent (0-100).
    pub crit_rate: u32,
    /// Critical damage in percent of the target's maximum life.
    pub crit_damage: u32,
}

/// Character-specific scratch state used by ability scripts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    flags: BTreeMap<String, bool>,
    counters: BTreeMap<String, i64>,
}

impl CharacterState {
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.flags.insert(key.into(), value);
    }

    pub fn counter(&self, key: &str) -> i64 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    /// Adds `delta` to a counter and returns the new value.
    pub fn add_counter(&mut self, key: impl Into<String>, delta: i64) -> i64 {
        let value = self.counters.entry(key.into()).or_insert(0);
        *value += delta;
        *value
    }
}

/// Complete combatant state.
///
/// # Design Principles
///
/// 1. **Stored**: base stats, pool current values, equipment
/// 2. **Derived**: effective stats and maximums are recomputed from base +
///    card/charm bonuses on every read, never cached
/// 3. **Not here**: the status bitfield. It is owned by the factor store,
///    which is its only mutation path
///
/// # Invariants
///
/// - `current <= effective max` for every pool, at all times
/// - Resource changes go through [`Combatant::gain`] / [`Combatant::lose`]
#[derive(Clone, Debug)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub tier: u8,
    pub affinity: Element,
    pub weapon_class: WeaponClass,
    pub stats: BaseStats,
    resources: Resources,
    cards: ArrayVec<Card, { BattleConfig::MAX_CARDS }>,
    charms: ArrayVec<Charm, { BattleConfig::MAX_CHARMS }>,
    pub character: CharacterState,
}

impl Combatant {
    pub fn new(id: CombatantId, name: impl Into<String>, stats: BaseStats, resources: Resources) -> Self {
        let mut combatant = Self {
            id,
            name: name.into(),
            tier: 1,
            affinity: Element::Fire,
            weapon_class: WeaponClass::default(),
            stats,
            resources,
            cards: ArrayVec::new(),
            charms: ArrayVec::new(),
            character: CharacterState::default(),
        };
        combatant.clamp_pools();
        combatant
    }

    pub fn with_affinity(mut self, affinity: Element) -> Self {
        self.affinity = affinity;
        self
    }

    pub fn with_weapon_class(mut self, weapon_class: WeaponClass) -> Self {
        self.weapon_class = weapon_class;
        self
    }

    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    // ========================================================================
    // Effective stats
    // ========================================================================

    /// Sum of every card and charm contribution.
    pub fn bonuses(&self) -> StatBonuses {
        let mut total = StatBonuses::default();
        for card in &self.cards {
            total += card.bonuses();
        }
        for charm in &self.charms {
            total += &charm.bonuses;
        }
        total
    }

    pub fn attack(&self) -> u32 {
        self.stats.attack.saturating_add(self.bonuses().attack)
    }

    pub fn defense(&self) -> u32 {
        self.stats.defense.saturating_add(self.bonuses().defense)
    }

    pub fn elemental_attack(&self) -> u32 {
        self.stats
            .elemental_attack
            .saturating_add(self.bonuses().elemental_attack)
    }

    pub fn elemental_defense(&self) -> u32 {
        self.stats
            .elemental_defense
            .saturating_add(self.bonuses().elemental_defense)
    }

    /// Critical chance in percent, capped at 100.
    pub fn crit_rate(&self) -> u32 {
        self.stats
            .crit_rate
            .saturating_add(self.bonuses().crit_rate)
            .min(100)
    }

    pub fn crit_damage(&self) -> u32 {
        self.stats.crit_damage.saturating_add(self.bonuses().crit_damage)
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn current(&self, kind: ResourceKind) -> u32 {
        self.resources.pool(kind).current
    }

    /// Effective maximum (base + bonus), recomputed on every call.
    pub fn max(&self, kind: ResourceKind) -> u32 {
        self.resources.effective_max(kind, &self.bonuses())
    }

    #[inline]
    pub fn life(&self) -> u32 {
        self.current(ResourceKind::Life)
    }

    #[inline]
    pub fn max_life(&self) -> u32 {
        self.max(ResourceKind::Life)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life() > 0
    }

    /// Adds to a pool up to its effective maximum. Returns the amount gained.
    pub fn gain(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let max = self.max(kind);
        self.resources.pool_mut(kind).gain(amount, max)
    }

    /// Removes from a pool down to zero. Returns the amount lost.
    pub fn lose(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        self.resources.pool_mut(kind).lose(amount)
    }

    pub fn can_afford(&self, cost: &ResourceCost) -> bool {
        cost.entries()
            .all(|(kind, amount)| self.current(kind) >= amount)
    }

    /// Deducts a cost. Returns false (and changes nothing) if unaffordable.
    pub fn pay(&mut self, cost: &ResourceCost) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for (kind, amount) in cost.entries() {
            self.resources.pool_mut(kind).lose(amount);
        }
        true
    }

    fn clamp_pools(&mut self) {
        let bonuses = self.bonuses();
        for kind in [
            ResourceKind::Life,
            ResourceKind::Mana,
            ResourceKind::Stamina,
            ResourceKind::Charge,
        ] {
            let max = self.resources.effective_max(kind, &bonuses);
            self.resources.pool_mut(kind).clamp(max);
        }
    }

    // ========================================================================
    // Equipment
    // ========================================================================

    /// Equips a card. Returns the slot index, or the card back if every slot is taken.
    pub fn equip_card(&mut self, card: Card) -> Result<usize, Card> {
        match self.cards.try_push(card) {
            Ok(()) => Ok(self.cards.len() - 1),
            Err(err) => Err(err.element()),
        }
    }

    /// Removes a card and clamps pools to the reduced maximums.
    pub fn unequip_card(&mut self, index: usize) -> Option<Card> {
        if index >= self.cards.len() {
            return None;
        }
        let card = self.cards.remove(index);
        self.clamp_pools();
        Some(card)
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Equipped cards in slot order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Fixed-length view for lockdown countdowns.
    pub(crate) fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    pub fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// Indices of equipped weapon cards, in slot order.
    pub fn weapon_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.weapon_profile().is_some())
            .map(|(index, _)| index)
    }

    /// Returns true if any equipped card is currently frozen.
    pub fn has_frozen_card(&self) -> bool {
        self.cards.iter().any(Card::is_locked)
    }

    pub fn charms(&self) -> &[Charm] {
        &self.charms
    }

    /// Equips a charm. Returns the charm back if every charm slot is taken.
    pub fn equip_charm(&mut self, charm: Charm) -> Result<(), Charm> {
        self.charms.try_push(charm).map_err(|err| err.element())
    }

    /// Removes a charm and clamps pools to the reduced maximums.
    pub fn unequip_charm(&mut self, index: usize) -> Option<Charm> {
        if index >= self.charms.len() {
            return None;
        }
        let charm = self.charms.remove(index);
        self.clamp_pools();
        Some(charm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Pool;

    fn fighter() -> Combatant {
        Combatant::new(
            CombatantId(1),
            "fighter",
            BaseStats {
                attack: 20,
                defense: 5,
                crit_rate: 10,
                ..BaseStats::default()
            },
            Resources::new(
                Pool::full(500),
                Pool::new(50, 100),
                Pool::full(80),
                Pool::new(0, 100),
            ),
        )
    }

    #[test]
    fn charm_raises_effective_stats() {
        let mut combatant = fighter();
        let charm = Charm::new(
            "ruby",
            StatBonuses {
                attack: 7,
                max_life: 100,
                crit_rate: 95,
                ..StatBonuses::default()
            },
        );
        combatant.equip_charm(charm).unwrap();

        assert_eq!(combatant.attack(), 27);
        assert_eq!(combatant.max_life(), 600);
        // Chance is capped
        assert_eq!(combatant.crit_rate(), 100);
    }

    #[test]
    fn unequipping_charm_clamps_current_to_new_max() {
        let mut combatant = fighter();
        combatant
            .equip_charm(Charm::new(
                "vital",
                StatBonuses {
                    max_life: 100,
                    ..StatBonuses::default()
                },
            ))
            .unwrap();
        combatant.gain(ResourceKind::Life, 100);
        assert_eq!(combatant.life(), 600);

        combatant.unequip_charm(0).unwrap();

        assert_eq!(combatant.max_life(), 500);
        assert_eq!(combatant.life(), 500);
    }

    #[test]
    fn unequipping_card_clamps_current_to_new_max() {
        let mut combatant = fighter();
        let focus = Card::weapon(
            "focus rod",
            WeaponProfile {
                base_damage: 4,
                family: crate::combat::DamageFamily::Elemental(Element::Water),
            },
        )
        .with_bonuses(StatBonuses {
            max_mana: 40,
            ..StatBonuses::default()
        });
        let slot = combatant.equip_card(focus).unwrap();
        combatant.gain(ResourceKind::Mana, 90);
        assert_eq!(combatant.current(ResourceKind::Mana), 140);
        assert_eq!(combatant.cards()[slot].bonuses().max_mana, 40);

        combatant.unequip_card(slot).unwrap();

        assert!(combatant.cards().is_empty());
        assert_eq!(combatant.max(ResourceKind::Mana), 100);
        assert_eq!(combatant.current(ResourceKind::Mana), 100);
    }

    #[test]
    fn pay_is_all_or_nothing() {
        let mut combatant = fighter();
        let cost = ResourceCost {
            mana: 40,
            stamina: 0,
            charge: 10,
        };

        assert!(!combatant.pay(&cost));
        assert_eq!(combatant.current(ResourceKind::Mana), 50);

        combatant.gain(ResourceKind::Charge, 10);
        assert!(combatant.pay(&cost));
        assert_eq!(combatant.current(ResourceKind::Mana), 10);
        assert_eq!(combatant.current(ResourceKind::Charge), 0);
    }

    #[test]
    fn character_counters_accumulate() {
        let mut combatant = fighter();
        assert_eq!(combatant.character.add_counter("combo", 2), 2);
        assert_eq!(combatant.character.add_counter("combo", 1), 3);
        assert!(!combatant.character.flag("enraged"));
        combatant.character.set_flag("enraged", true);
        assert!(combatant.character.flag("enraged"));
    }
}
