//! Built-in combatants and the abilities on their cards.

use std::sync::Arc;

use tracing::debug;

use duel_core::{
    Ability, AbilityContext, ActionError, ApplyOutcome, BaseStats, Card, CardSlot, Charm,
    Combatant, CombatantFactory, CombatantId, CombatantTemplate, DamageFamily, DamageRequest,
    Element, FactorParams, FreezeOutcome, ResourceCost, StandardFactory, StatBonuses, WeaponClass,
    WeaponProfile,
};

// ============================================================================
// Abilities
// ============================================================================

/// Wraps the caster in a Shield.
pub struct Barrier {
    pub points: u32,
    pub turns: u32,
}

impl Ability for Barrier {
    fn name(&self) -> &str {
        "barrier"
    }

    fn execute(&self, ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
        let actor = ctx.actor();
        ctx.apply_factor(actor, FactorParams::Shield { points: self.points }, self.turns);
        Ok(())
    }
}

/// Sets the opponent on fire.
pub struct Ignite {
    pub percent: u32,
    pub turns: u32,
}

impl Ability for Ignite {
    fn name(&self) -> &str {
        "ignite"
    }

    fn execute(&self, ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
        let target = ctx.opponent();
        let outcome = ctx.apply_factor(target, FactorParams::Burn { percent: self.percent }, self.turns);
        if let ApplyOutcome::Blocked(reason) = outcome {
            debug!(%reason, "ignite fizzled");
        }
        Ok(())
    }
}

/// Heals now and leaves a Regeneration behind.
pub struct Mend {
    pub heal: u32,
    pub per_turn: u32,
    pub turns: u32,
}

impl Ability for Mend {
    fn name(&self) -> &str {
        "mend"
    }

    fn execute(&self, ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
        let actor = ctx.actor();
        ctx.heal(actor, self.heal);
        ctx.apply_factor(actor, FactorParams::Regeneration { amount: self.per_turn }, self.turns);
        Ok(())
    }
}

/// Starts draining the opponent's mana every turn.
pub struct Leech {
    pub rate: u32,
    pub turns: u32,
}

impl Ability for Leech {
    fn name(&self) -> &str {
        "leech"
    }

    fn execute(&self, ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
        let actor = ctx.actor();
        ctx.apply_factor(actor, FactorParams::ManaSiphon { rate: self.rate }, self.turns);
        Ok(())
    }
}

/// Freezes the opponent's first usable weapon.
pub struct Frostbite {
    pub turns: u32,
}

impl Ability for Frostbite {
    fn name(&self) -> &str {
        "frostbite"
    }

    fn execute(&self, ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
        let target = ctx.opponent();
        let opponent = ctx.combatant(target);
        let slot = opponent
            .weapon_slots()
            .find(|&slot| opponent.card(slot).is_some_and(|card| !card.is_locked()));
        let Some(slot) = slot else {
            return Err(ActionError::AbilityFailed("no weapon to freeze".into()));
        };

        match ctx.freeze_card(target, slot, self.turns) {
            FreezeOutcome::Frozen { .. } => Ok(()),
            FreezeOutcome::Blocked(reason) => Err(ActionError::LockBlocked { reason }),
            FreezeOutcome::NoSuchCard | FreezeOutcome::Ignored => {
                Err(ActionError::AbilityFailed("freeze had no effect".into()))
            }
        }
    }
}

/// Ultimate: a wind strike that leaves a Storm on the opponent.
pub struct Tempest {
    pub strike: u32,
    pub storm_damage: u32,
    pub turns: u32,
}

impl Ability for Tempest {
    fn name(&self) -> &str {
        "tempest"
    }

    fn execute(&self, ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
        let target = ctx.opponent();
        ctx.deal_damage(target, DamageRequest::elemental(self.strike, Element::Wind));
        ctx.apply_factor(target, FactorParams::Storm { damage: self.storm_damage }, self.turns);
        Ok(())
    }
}

// ============================================================================
// Combatants
// ============================================================================

pub fn ember_template() -> CombatantTemplate {
    CombatantTemplate::builder("Ember Duelist")
        .tier(2)
        .affinity(Element::Fire)
        .weapon_class(WeaponClass::Blade)
        .stats(BaseStats {
            attack: 40,
            defense: 15,
            elemental_attack: 25,
            elemental_defense: 10,
            crit_rate: 20,
            crit_damage: 5,
        })
        .pools(1200, 120, 100)
        .charge(60)
        .build()
}

pub fn tide_template() -> CombatantTemplate {
    CombatantTemplate::builder("Tide Warden")
        .tier(2)
        .affinity(Element::Water)
        .weapon_class(WeaponClass::Staff)
        .stats(BaseStats {
            attack: 25,
            defense: 25,
            elemental_attack: 45,
            elemental_defense: 20,
            crit_rate: 10,
            crit_damage: 8,
        })
        .pools(1100, 160, 80)
        .charge(60)
        .build()
}

/// The fire-and-blade fighter: freezes (swift), then storms or burns.
pub fn ember(id: CombatantId) -> Combatant {
    let mut combatant = StandardFactory.create(id, &ember_template());
    let cards = [
        Card::weapon("twin fang", WeaponProfile {
            base_damage: 35,
            family: DamageFamily::Physical,
        }),
        Card::weapon("cinder edge", WeaponProfile {
            base_damage: 20,
            family: DamageFamily::Elemental(Element::Fire),
        }),
        Card::ability("frostbite", CardSlot::Skill, ResourceCost::stamina(30), Arc::new(Frostbite {
            turns: 1,
        }))
        .with_swift(true),
        Card::ability("tempest", CardSlot::Ultimate, ResourceCost::charge(60), Arc::new(Tempest {
            strike: 60,
            storm_damage: 30,
            turns: 2,
        })),
        Card::ability("ignite", CardSlot::Skill, ResourceCost::mana(40), Arc::new(Ignite {
            percent: 3,
            turns: 3,
        })),
    ];
    equip(&mut combatant, cards);
    let sigil = Charm::new("ember sigil", StatBonuses {
        burn_amplification: 50,
        weapon_damage: 5,
        ..StatBonuses::default()
    });
    if let Err(charm) = combatant.equip_charm(sigil) {
        debug!(charm = %charm.name, "no free charm slot");
    }
    combatant
}

/// The water caster: shields, sustains and steals mana.
pub fn tide(id: CombatantId) -> Combatant {
    let mut combatant = StandardFactory.create(id, &tide_template());
    let cards = [
        Card::weapon("coral staff", WeaponProfile {
            base_damage: 25,
            family: DamageFamily::Elemental(Element::Water),
        }),
        Card::ability("barrier", CardSlot::Skill, ResourceCost::mana(50), Arc::new(Barrier {
            points: 120,
            turns: 3,
        })),
        Card::ability("mend", CardSlot::Skill, ResourceCost::mana(40), Arc::new(Mend {
            heal: 60,
            per_turn: 40,
            turns: 3,
        })),
        Card::ability("leech", CardSlot::Skill, ResourceCost::stamina(40), Arc::new(Leech {
            rate: 20,
            turns: 3,
        }))
        .with_bonuses(StatBonuses {
            max_mana: 20,
            ..StatBonuses::default()
        }),
    ];
    equip(&mut combatant, cards);
    combatant
}

fn equip(combatant: &mut Combatant, cards: impl IntoIterator<Item = Card>) {
    for card in cards {
        if let Err(card) = combatant.equip_card(card) {
            debug!(card = %card.name, "no free card slot");
        }
    }
}
