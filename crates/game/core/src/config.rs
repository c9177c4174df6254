use crate::state::Element;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Standard actions granted to the owner at the start of each turn.
    pub actions_per_turn: u8,
    /// Mana restored at turn start, in percent of the effective maximum (rounded).
    pub mana_regen_percent: u32,
    /// Stamina restored at turn start, in percent of the effective maximum (rounded).
    pub stamina_regen_percent: u32,
    /// Ultimate charge gained by each normal attack.
    pub charge_per_attack: u32,
    /// Element family boosted while the attacker holds a live Shield.
    pub shield_element: Element,
    /// Flat bonus added to `shield_element` damage while shielded.
    pub shield_element_bonus: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Equipped cards per combatant (weapons, skills and the ultimate).
    pub const MAX_CARDS: usize = 6;
    pub const MAX_CHARMS: usize = 4;
    /// Weapon cards consulted by a single normal attack.
    pub const MAX_WEAPONS_PER_ATTACK: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ACTIONS_PER_TURN: u8 = 1;
    pub const DEFAULT_MANA_REGEN_PERCENT: u32 = 10;
    pub const DEFAULT_STAMINA_REGEN_PERCENT: u32 = 10;
    pub const DEFAULT_CHARGE_PER_ATTACK: u32 = 10;
    pub const DEFAULT_SHIELD_ELEMENT: Element = Element::Water;
    pub const DEFAULT_SHIELD_ELEMENT_BONUS: u32 = 5;

    pub fn new() -> Self {
        Self {
            actions_per_turn: Self::DEFAULT_ACTIONS_PER_TURN,
            mana_regen_percent: Self::DEFAULT_MANA_REGEN_PERCENT,
            stamina_regen_percent: Self::DEFAULT_STAMINA_REGEN_PERCENT,
            charge_per_attack: Self::DEFAULT_CHARGE_PER_ATTACK,
            shield_element: Self::DEFAULT_SHIELD_ELEMENT,
            shield_element_bonus: Self::DEFAULT_SHIELD_ELEMENT_BONUS,
        }
    }

    pub fn with_regen_percents(mut self, mana: u32, stamina: u32) -> Self {
        self.mana_regen_percent = mana;
        self.stamina_regen_percent = stamina;
        self
    }

    pub fn with_shield_bonus(mut self, element: Element, bonus: u32) -> Self {
        self.shield_element = element;
        self.shield_element_bonus = bonus;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
