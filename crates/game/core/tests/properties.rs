//! Invariants that must hold across arbitrary sequences of operations.

mod common;

use common::{FIRST_ID, SECOND_ID, duel, fighter};
use duel_core::{
    ApplyOutcome, Battle, BattleEvent, BlockReason, Card, CombatantId, DamageFamily, DamageOrigin,
    DamageRequest, EffectType, FactorParams, FactorStore, FreezeOutcome, PcgRng, RngOracle, Side,
    WeaponProfile,
};
use strum::IntoEnumIterator;

const HOLDER: CombatantId = CombatantId(9);

fn params_for(effect: EffectType, magnitude: u32) -> FactorParams {
    match effect {
        EffectType::Shield => FactorParams::Shield { points: magnitude },
        EffectType::Regeneration => FactorParams::Regeneration { amount: magnitude },
        EffectType::ManaSiphon => FactorParams::ManaSiphon { rate: magnitude },
        EffectType::StaminaSiphon => FactorParams::StaminaSiphon { rate: magnitude },
        EffectType::Storm => FactorParams::Storm { damage: magnitude },
        EffectType::Burn => FactorParams::Burn { percent: magnitude },
        EffectType::Immunity => FactorParams::Immunity,
    }
}

fn assert_bits_match_slots(store: &FactorStore, id: CombatantId) {
    let flags = store.flags(id);
    for effect in EffectType::iter() {
        assert_eq!(
            flags.contains(effect.flag()),
            !store.query(id, effect).is_empty(),
            "bit and slot disagree for {effect}"
        );
    }
    assert!(store.is_consistent(id));
}

// ============================================================================
// Bitfield mirror
// ============================================================================

#[test]
fn bitfield_mirrors_slots_through_mixed_operations() {
    let effects: Vec<EffectType> = EffectType::iter().collect();
    let rng = PcgRng;

    for run in 0..20u64 {
        let mut store = FactorStore::new();
        store.register(HOLDER);
        let mut events = Vec::new();

        for step in 0..200u64 {
            let roll = rng.next_u32(run * 1_000 + step);
            let effect = effects[(roll as usize / 7) % effects.len()];
            match roll % 5 {
                0 | 1 => {
                    let duration = rng.next_u32(u64::from(roll)) % 5;
                    store.apply(HOLDER, params_for(effect, roll % 50), duration, &mut events);
                }
                2 => {
                    store.remove_instance(HOLDER, effect, (roll as usize) % 3, &mut events);
                }
                3 => {
                    store.remove_all(HOLDER, effect, &mut events);
                }
                _ => {
                    store.age_all(HOLDER, &mut events);
                }
            }
            assert_bits_match_slots(&store, HOLDER);
        }
    }
}

#[test]
fn stacking_burn_accumulates_in_order() {
    let mut store = FactorStore::new();
    store.register(HOLDER);
    for percent in [2, 3, 1] {
        let outcome = store.apply(HOLDER, FactorParams::Burn { percent }, 2, &mut Vec::new());
        assert_eq!(outcome, ApplyOutcome::Applied);
    }

    let percents: Vec<u32> = store
        .query(HOLDER, EffectType::Burn)
        .iter()
        .map(|instance| instance.magnitude())
        .collect();
    assert_eq!(percents, vec![2, 3, 1]);
    assert_eq!(store.total(HOLDER, EffectType::Burn), 6);
}

#[test]
fn overwrite_class_keeps_only_the_latest() {
    let mut store = FactorStore::new();
    store.register(HOLDER);
    let mut events = Vec::new();

    store.apply(HOLDER, FactorParams::Immunity, 2, &mut events);
    let outcome = store.apply(HOLDER, FactorParams::Immunity, 5, &mut events);

    assert_eq!(outcome, ApplyOutcome::Replaced);
    let slot = store.query(HOLDER, EffectType::Immunity);
    assert_eq!(slot.len(), 1);
    assert_eq!(slot[0].remaining_turns(), 5);

    store.apply(HOLDER, FactorParams::Storm { damage: 10 }, 2, &mut events);
    store.apply(HOLDER, FactorParams::Storm { damage: 40 }, 3, &mut events);
    let storm = store.query(HOLDER, EffectType::Storm);
    assert_eq!(storm.len(), 1);
    assert_eq!(storm[0].magnitude(), 40);
    assert_bits_match_slots(&store, HOLDER);
}

#[test]
fn storm_rejects_every_other_effect() {
    let mut store = FactorStore::new();
    store.register(HOLDER);
    store.apply(HOLDER, FactorParams::Storm { damage: 10 }, 3, &mut Vec::new());

    for effect in EffectType::iter().filter(|effect| *effect != EffectType::Storm) {
        let mut events = Vec::new();
        let outcome = store.apply(HOLDER, params_for(effect, 5), 2, &mut events);

        assert_eq!(outcome, ApplyOutcome::Blocked(BlockReason::Storm));
        assert!(store.query(HOLDER, effect).is_empty());
        assert_eq!(events, vec![BattleEvent::FactorBlocked {
            target: HOLDER,
            effect,
            reason: BlockReason::Storm,
        }]);
    }
}

// ============================================================================
// Damage conservation
// ============================================================================

#[test]
fn shields_and_life_account_for_every_point() {
    for incoming in [1, 29, 30, 31, 55, 200] {
        let (mut battle, _recorder) = duel(fighter(FIRST_ID, 1000), fighter(SECOND_ID, 1000));
        battle.apply_factor(Side::Second, FactorParams::Shield { points: 30 }, 3);
        battle.apply_factor(Side::Second, FactorParams::Shield { points: 25 }, 3);
        battle.start().expect("battle starts");

        let report = battle
            .try_action(false, |ctx| {
                Ok(ctx.deal_damage(
                    Side::Second,
                    DamageRequest::fixed(incoming, DamageOrigin::Ability),
                ))
            })
            .expect("hit resolves");

        let pool = battle.state().factors().total(SECOND_ID, EffectType::Shield);
        assert_eq!(report.absorbed + report.dealt, incoming);
        assert_eq!(pool, 55 - report.absorbed);
        assert_eq!(battle.combatant(Side::Second).life(), 1000 - report.dealt);
    }
}

#[test]
fn stacked_burn_deals_floor_of_summed_percent() {
    let (mut battle, recorder) = duel(fighter(FIRST_ID, 1234), fighter(SECOND_ID, 1000));
    for percent in [2, 3, 1] {
        battle.apply_factor(Side::First, FactorParams::Burn { percent }, 2);
    }

    battle.start().expect("battle starts");

    // floor(1234 * 6 / 100)
    assert_eq!(battle.combatant(Side::First).life(), 1234 - 74);
    let burns = recorder.count(|event| {
        matches!(
            event,
            BattleEvent::DamageDealt {
                origin: DamageOrigin::Factor(EffectType::Burn),
                amount: 74,
                source: None,
                critical: false,
                ..
            }
        )
    });
    assert_eq!(burns, 1);
}

// ============================================================================
// Turn-start timing
// ============================================================================

#[test]
fn factors_age_only_on_their_owners_turn() {
    let (mut battle, _recorder) = duel(fighter(FIRST_ID, 1000), fighter(SECOND_ID, 1000));
    battle.apply_factor(Side::Second, FactorParams::Burn { percent: 1 }, 1);

    battle.start().expect("first turn");
    assert!(battle.state().factors().has(SECOND_ID, EffectType::Burn));
    assert_eq!(battle.combatant(Side::Second).life(), 1000);

    battle.next_turn().expect("second turn");
    // Resolved once, then aged out in the same turn start
    assert_eq!(battle.combatant(Side::Second).life(), 990);
    assert!(!battle.state().factors().has(SECOND_ID, EffectType::Burn));
}

#[test]
fn freeze_countdown_is_independent_of_factor_aging() {
    let mut owner = fighter(SECOND_ID, 1000);
    owner
        .equip_card(Card::weapon("axe", WeaponProfile {
            base_damage: 5,
            family: DamageFamily::Physical,
        }))
        .expect("slot free");
    let (mut battle, recorder) = duel(fighter(FIRST_ID, 1000), owner);
    battle.apply_factor(Side::Second, FactorParams::Shield { points: 10 }, 1);

    assert_eq!(
        battle.freeze_card(Side::First, Side::Second, 0, 2),
        FreezeOutcome::Frozen { turns: 2 }
    );
    let frozen_turns = |battle: &Battle| {
        battle.combatant(Side::Second).card(0).map(Card::frozen_turns)
    };

    battle.start().expect("first turn");
    assert_eq!(frozen_turns(&battle), Some(2));

    battle.next_turn().expect("second turn");
    // The shield aged out at turn start; the card keeps both owner turns
    assert!(!battle.state().factors().has(SECOND_ID, EffectType::Shield));
    assert_eq!(frozen_turns(&battle), Some(2));

    battle.next_turn().expect("third turn");
    assert_eq!(frozen_turns(&battle), Some(1));

    battle.next_turn().expect("fourth turn");
    assert_eq!(frozen_turns(&battle), Some(1));
    assert!(!recorder.events().contains(&BattleEvent::CardUnlocked {
        owner: SECOND_ID,
        slot: 0,
    }));

    battle.next_turn().expect("fifth turn");
    assert_eq!(frozen_turns(&battle), Some(0));
    assert!(recorder.events().contains(&BattleEvent::CardUnlocked {
        owner: SECOND_ID,
        slot: 0,
    }));
}

#[test]
fn immunity_blocks_freeze_and_hostile_factors() {
    let mut owner = fighter(SECOND_ID, 1000);
    owner
        .equip_card(Card::weapon("bow", WeaponProfile {
            base_damage: 5,
            family: DamageFamily::Physical,
        }))
        .expect("slot free");
    let (mut battle, recorder) = duel(fighter(FIRST_ID, 1000), owner);
    battle.apply_factor(Side::Second, FactorParams::Immunity, 3);

    assert_eq!(
        battle.freeze_card(Side::First, Side::Second, 0, 2),
        FreezeOutcome::Blocked(BlockReason::Immunity)
    );
    assert_eq!(
        battle.apply_factor(Side::Second, FactorParams::Burn { percent: 5 }, 2),
        ApplyOutcome::Blocked(BlockReason::Immunity)
    );
    // Friendly effects still land
    assert!(
        battle
            .apply_factor(Side::Second, FactorParams::Shield { points: 5 }, 2)
            .is_applied()
    );
    assert!(recorder.events().contains(&BattleEvent::CardLockBlocked {
        owner: SECOND_ID,
        slot: 0,
        reason: BlockReason::Immunity,
    }));
}
