//! Pre-shield damage calculation.

use crate::state::Combatant;

use super::{DamageFamily, DamageMode, DamageRequest};

/// Calculate the damage of a hit before critical bonus and shields.
///
/// # Formula
///
/// ```text
/// Standard:
///   total = base + offense + family bonus
///   total = max(1, total - defense)
///
/// Bypass / Direct:
///   total = base
/// ```
///
/// - Physical: offense = attack, bonus = weapon damage, defense = defense
/// - Elemental: offense = elemental attack, bonus = element bonus plus
///   `situational_bonus` (e.g. the shield element bonus), defense = elemental
///   defense
///
/// With no attacker (environmental damage) offense and card bonuses are zero.
pub fn compute_damage(
    attacker: Option<&Combatant>,
    target: &Combatant,
    request: &DamageRequest,
    situational_bonus: u32,
) -> u32 {
    if request.mode != DamageMode::Standard {
        return request.base;
    }

    let bonuses = attacker.map(Combatant::bonuses).unwrap_or_default();
    let (offense, bonus, defense) = match request.family {
        DamageFamily::Physical => (
            attacker.map_or(0, Combatant::attack),
            bonuses.weapon_damage,
            target.defense(),
        ),
        DamageFamily::Elemental(element) => (
            attacker.map_or(0, Combatant::elemental_attack),
            bonuses.element(element).saturating_add(situational_bonus),
            target.elemental_defense(),
        ),
    };

    request
        .base
        .saturating_add(offense)
        .saturating_add(bonus)
        .saturating_sub(defense)
        .max(1)
}
