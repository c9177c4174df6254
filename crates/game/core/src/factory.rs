//! Combatant templates and the factory interface.
//!
//! Loading templates from disk is out of scope; callers build a
//! [`CombatantTemplate`] in code (or deserialize one with the `serde`
//! feature) and hand it to a [`CombatantFactory`].

use crate::state::{BaseStats, Combatant, CombatantId, Element, WeaponClass};
use crate::stats::{Pool, Resources};

/// Data needed to spawn a combatant, minus its id and equipment.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    pub tier: u8,
    pub affinity: Element,
    pub weapon_class: WeaponClass,
    pub stats: BaseStats,
    pub max_life: u32,
    pub max_mana: u32,
    pub max_stamina: u32,
    /// Capacity of the ultimate charge pool, which starts empty.
    pub max_charge: u32,
}

impl CombatantTemplate {
    pub fn builder(name: impl Into<String>) -> CombatantTemplateBuilder {
        CombatantTemplateBuilder {
            name: name.into(),
            ..CombatantTemplateBuilder::default()
        }
    }
}

/// Builder for constructing combatant templates.
#[derive(Default)]
pub struct CombatantTemplateBuilder {
    name: String,
    tier: Option<u8>,
    affinity: Option<Element>,
    weapon_class: Option<WeaponClass>,
    stats: Option<BaseStats>,
    life: Option<u32>,
    mana: Option<u32>,
    stamina: Option<u32>,
    charge: Option<u32>,
}

impl CombatantTemplateBuilder {
    pub fn tier(mut self, tier: u8) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn affinity(mut self, affinity: Element) -> Self {
        self.affinity = Some(affinity);
        self
    }

    pub fn weapon_class(mut self, weapon_class: WeaponClass) -> Self {
        self.weapon_class = Some(weapon_class);
        self
    }

    pub fn stats(mut self, stats: BaseStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set maximum life, mana and stamina
    pub fn pools(mut self, life: u32, mana: u32, stamina: u32) -> Self {
        self.life = Some(life);
        self.mana = Some(mana);
        self.stamina = Some(stamina);
        self
    }

    pub fn charge(mut self, max_charge: u32) -> Self {
        self.charge = Some(max_charge);
        self
    }

    pub fn build(self) -> CombatantTemplate {
        CombatantTemplate {
            name: self.name,
            tier: self.tier.unwrap_or(1),
            affinity: self.affinity.unwrap_or(Element::Fire),
            weapon_class: self.weapon_class.unwrap_or_default(),
            stats: self.stats.unwrap_or_default(),
            max_life: self.life.unwrap_or(1000),
            max_mana: self.mana.unwrap_or(100),
            max_stamina: self.stamina.unwrap_or(100),
            max_charge: self.charge.unwrap_or(100),
        }
    }
}

/// Produces combatants from template data.
pub trait CombatantFactory {
    fn create(&self, id: CombatantId, template: &CombatantTemplate) -> Combatant;
}

/// Spawns with life, mana and stamina full and charge empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardFactory;

impl CombatantFactory for StandardFactory {
    fn create(&self, id: CombatantId, template: &CombatantTemplate) -> Combatant {
        let resources = Resources::new(
            Pool::full(template.max_life),
            Pool::full(template.max_mana),
            Pool::full(template.max_stamina),
            Pool::new(0, template.max_charge),
        );
        Combatant::new(id, template.name.clone(), template.stats.clone(), resources)
            .with_tier(template.tier)
            .with_affinity(template.affinity)
            .with_weapon_class(template.weapon_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ResourceKind;

    #[test]
    fn standard_factory_fills_pools_except_charge() {
        let template = CombatantTemplate::builder("warden")
            .tier(2)
            .affinity(Element::Earth)
            .pools(800, 60, 40)
            .build();

        let combatant = StandardFactory.create(CombatantId(5), &template);

        assert_eq!(combatant.id, CombatantId(5));
        assert_eq!(combatant.tier, 2);
        assert_eq!(combatant.affinity, Element::Earth);
        assert_eq!(combatant.life(), 800);
        assert_eq!(combatant.current(ResourceKind::Mana), 60);
        assert_eq!(combatant.current(ResourceKind::Charge), 0);
        assert_eq!(combatant.max(ResourceKind::Charge), 100);
    }
}
