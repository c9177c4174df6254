//! Turn scheduling and the per-turn action budget.

mod common;

use std::sync::Arc;

use common::{FIRST_ID, Fizzle, SECOND_ID, Smite, duel, duel_with, fighter};
use duel_core::{
    ActionError, Battle, BattleConfig, BattleEvent, BuildError, Card, CardSlot, Combatant,
    CombatantId, DamageFamily, DamageOrigin, DamageRequest, EffectType, FactorParams, FixedRoll,
    FreezeOutcome, ResourceCost, ResourceKind, Side, TurnError, WeaponProfile,
};

fn with_card(id: CombatantId, card: Card) -> Combatant {
    let mut combatant = fighter(id, 1000);
    combatant.equip_card(card).expect("slot free");
    combatant
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn scheduler_rejects_out_of_order_calls() {
    let (mut battle, _recorder) = duel(fighter(FIRST_ID, 1000), fighter(SECOND_ID, 1000));

    assert_eq!(battle.next_turn(), Err(TurnError::NotStarted));
    assert_eq!(battle.normal_attack(false).unwrap_err(), ActionError::NotStarted);

    battle.start().expect("battle starts");
    assert_eq!(battle.start(), Err(TurnError::AlreadyStarted));
}

#[test]
fn builder_requires_two_distinct_combatants() {
    let missing = Battle::builder().first(fighter(FIRST_ID, 100)).build();
    assert_eq!(missing.unwrap_err(), BuildError::MissingCombatant(Side::Second));

    let duplicate = Battle::builder()
        .first(fighter(FIRST_ID, 100))
        .second(fighter(FIRST_ID, 100))
        .build();
    assert_eq!(duplicate.unwrap_err(), BuildError::DuplicateId(FIRST_ID));
}

#[test]
fn battle_runs_without_listeners() {
    let mut battle = Battle::builder()
        .first(fighter(FIRST_ID, 1000))
        .second(fighter(SECOND_ID, 1000))
        .first_turn(Side::Second)
        .build()
        .expect("both combatants are present");
    battle.apply_factor(Side::First, FactorParams::Burn { percent: 10 }, 2);

    assert_eq!(battle.start().expect("battle starts"), Side::Second);
    battle.normal_attack(false).expect("attack resolves");
    battle.next_turn().expect("next turn");

    assert_eq!(battle.combatant(Side::First).life(), 900 - 1);
}

#[test]
fn turn_start_steps_run_in_fixed_order() {
    let mut owner = fighter(FIRST_ID, 1000);
    owner.lose(ResourceKind::Life, 500);
    owner.lose(ResourceKind::Mana, 100);
    owner.lose(ResourceKind::Stamina, 50);

    let config = BattleConfig::default().with_regen_percents(10, 0);
    let (mut battle, recorder) =
        duel_with(owner, fighter(SECOND_ID, 1000), config, FixedRoll(100));
    battle.apply_factor(Side::First, FactorParams::Regeneration { amount: 20 }, 2);
    battle.apply_factor(Side::First, FactorParams::StaminaSiphon { rate: 10 }, 2);
    battle.apply_factor(Side::First, FactorParams::Burn { percent: 1 }, 2);
    battle.apply_factor(Side::First, FactorParams::Storm { damage: 5 }, 2);
    recorder.take();

    battle.start().expect("battle starts");

    let labels: Vec<&str> = recorder
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::HealingReceived { .. } => Some("heal"),
            BattleEvent::ResourceStolen { .. } => Some("siphon"),
            BattleEvent::DamageDealt {
                origin: DamageOrigin::Factor(EffectType::Burn),
                ..
            } => Some("burn"),
            BattleEvent::DamageDealt {
                origin: DamageOrigin::Factor(EffectType::Storm),
                ..
            } => Some("storm"),
            BattleEvent::FactorsAged { .. } => Some("aging"),
            BattleEvent::ResourceGained {
                kind: ResourceKind::Mana,
                ..
            } => Some("regen"),
            BattleEvent::TurnStarted { .. } => Some("started"),
            BattleEvent::ActionsChanged { .. } => Some("budget"),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec![
        "heal", "siphon", "burn", "storm", "aging", "regen", "started", "budget",
    ]);
}

// ============================================================================
// Action budget
// ============================================================================

#[test]
fn budget_locks_after_last_standard_action() {
    let (mut battle, recorder) = duel(fighter(FIRST_ID, 1000), fighter(SECOND_ID, 1000));
    battle.start().expect("battle starts");

    battle.normal_attack(false).expect("first action");

    assert!(battle.turn().locked);
    assert_eq!(
        recorder.count(|event| matches!(event, BattleEvent::ActionsLocked { owner: Side::First })),
        1
    );
    assert_eq!(battle.normal_attack(false).unwrap_err(), ActionError::ActionsLocked);
    assert_eq!(battle.turn().actions_remaining, 0);
}

#[test]
fn failed_action_still_spends_the_budget() {
    let (mut battle, recorder) = duel(fighter(FIRST_ID, 1000), fighter(SECOND_ID, 1000));
    battle.start().expect("battle starts");

    let mut strike_then_fail = || {
        battle.try_action(false, |ctx| -> Result<(), ActionError> {
            ctx.deal_damage(Side::Second, DamageRequest::physical(50));
            Err(ActionError::AbilityFailed("recoil".into()))
        })
    };
    let first = strike_then_fail();
    let second = strike_then_fail();

    assert!(matches!(first, Err(ActionError::AbilityFailed(_))));
    assert_eq!(second, Err(ActionError::ActionsLocked));
    // Only the first attempt ran; its damage stays
    assert_eq!(battle.combatant(Side::Second).life(), 950);
    assert_eq!(battle.turn().actions_remaining, 0);
    assert!(battle.turn().locked);
    assert_eq!(
        recorder.count(|event| matches!(event, BattleEvent::ActionsLocked { owner: Side::First })),
        1
    );
}

#[test]
fn rejected_action_runs_nothing() {
    let (mut battle, _recorder) = duel(fighter(FIRST_ID, 1000), fighter(SECOND_ID, 1000));
    battle.start().expect("battle starts");
    battle.normal_attack(false).expect("first action");
    let life = battle.combatant(Side::Second).life();

    let result = battle.try_action(false, |ctx| {
        ctx.deal_damage(Side::Second, DamageRequest::physical(50));
        Ok(())
    });

    assert_eq!(result, Err(ActionError::ActionsLocked));
    assert_eq!(battle.combatant(Side::Second).life(), life);
}

// ============================================================================
// Cards
// ============================================================================

#[test]
fn ability_card_pays_and_hits() {
    let card = Card::ability("smite", CardSlot::Skill, ResourceCost::mana(30), Arc::new(Smite(40)));
    let (mut battle, recorder) = duel(with_card(FIRST_ID, card), fighter(SECOND_ID, 1000));
    battle.start().expect("battle starts");

    battle.use_card(0).expect("card resolves");

    assert_eq!(battle.combatant(Side::First).current(ResourceKind::Mana), 70);
    assert_eq!(battle.combatant(Side::Second).life(), 960);
    assert_eq!(battle.turn().actions_remaining, 0);
    assert!(recorder.events().contains(&BattleEvent::ResourceLost {
        target: FIRST_ID,
        kind: ResourceKind::Mana,
        amount: 30,
    }));
}

#[test]
fn failing_ability_refunds_cost() {
    let card = Card::ability("fizzle", CardSlot::Skill, ResourceCost::mana(30), Arc::new(Fizzle));
    let (mut battle, _recorder) = duel(with_card(FIRST_ID, card), fighter(SECOND_ID, 1000));
    battle.start().expect("battle starts");

    let err = battle.use_card(0).unwrap_err();

    assert!(matches!(err, ActionError::AbilityFailed(_)));
    assert_eq!(battle.combatant(Side::First).current(ResourceKind::Mana), 100);
    assert_eq!(battle.turn().actions_remaining, 0);
    assert!(battle.turn().locked);
}

#[test]
fn unaffordable_card_is_rejected_up_front() {
    let card = Card::ability(
        "ultimate",
        CardSlot::Ultimate,
        ResourceCost::charge(100),
        Arc::new(Smite(500)),
    );
    let (mut battle, _recorder) = duel(with_card(FIRST_ID, card), fighter(SECOND_ID, 1000));
    battle.start().expect("battle starts");

    assert_eq!(
        battle.use_card(0).unwrap_err(),
        ActionError::InsufficientResources { slot: 0 }
    );
    assert_eq!(battle.combatant(Side::Second).life(), 1000);
    assert_eq!(battle.turn().actions_remaining, 1);
}

#[test]
fn card_slot_errors() {
    let weapon = Card::weapon("knife", WeaponProfile {
        base_damage: 3,
        family: DamageFamily::Physical,
    });
    let (mut battle, _recorder) = duel(with_card(FIRST_ID, weapon), fighter(SECOND_ID, 1000));
    battle.start().expect("battle starts");

    assert_eq!(battle.use_card(0).unwrap_err(), ActionError::NotAnAbility { slot: 0 });
    assert_eq!(battle.use_card(4).unwrap_err(), ActionError::CardNotFound { slot: 4 });
}

#[test]
fn frozen_card_cannot_be_used() {
    let card = Card::ability("smite", CardSlot::Skill, ResourceCost::FREE, Arc::new(Smite(10)));
    let (mut battle, _recorder) = duel(with_card(FIRST_ID, card), fighter(SECOND_ID, 1000));
    battle.freeze_card(Side::Second, Side::First, 0, 2);
    battle.start().expect("battle starts");

    assert_eq!(
        battle.use_card(0).unwrap_err(),
        ActionError::CardFrozen { slot: 0, turns: 2 }
    );
}

#[test]
fn swift_card_keeps_the_budget() {
    let card = Card::ability("jab", CardSlot::Skill, ResourceCost::stamina(10), Arc::new(Smite(10)))
        .with_swift(true);
    let (mut battle, _recorder) = duel(with_card(FIRST_ID, card), fighter(SECOND_ID, 1000));
    battle.start().expect("battle starts");

    battle.use_card(0).expect("first jab");
    battle.use_card(0).expect("second jab");

    assert_eq!(battle.turn().actions_remaining, 1);
    assert_eq!(battle.combatant(Side::Second).life(), 980);
    assert_eq!(battle.combatant(Side::First).current(ResourceKind::Stamina), 80);
}

#[test]
fn freeze_from_opponent_covers_the_owners_next_turn() {
    let card = Card::ability("smite", CardSlot::Skill, ResourceCost::FREE, Arc::new(Smite(10)));
    let (mut battle, recorder) = duel(fighter(FIRST_ID, 1000), with_card(SECOND_ID, card));
    battle.start().expect("battle starts");

    let outcome = battle
        .try_action(false, |ctx| Ok(ctx.freeze_card(Side::Second, 0, 1)))
        .expect("freeze lands");
    assert_eq!(outcome, FreezeOutcome::Frozen { turns: 1 });

    battle.next_turn().expect("second turn");
    assert_eq!(
        battle.use_card(0).unwrap_err(),
        ActionError::CardFrozen { slot: 0, turns: 1 }
    );
    assert_eq!(battle.turn().actions_remaining, 1);

    recorder.take();
    battle.next_turn().expect("third turn");
    // Thaws as the owner's turn closes, before the turn hand-off
    let thaw = recorder
        .events()
        .iter()
        .position(|event| matches!(event, BattleEvent::CardUnlocked { owner: SECOND_ID, slot: 0 }));
    let ended = recorder
        .events()
        .iter()
        .position(|event| matches!(event, BattleEvent::TurnEnded { owner: Side::Second, .. }));
    assert!(thaw.is_some());
    assert!(thaw < ended);

    battle.next_turn().expect("fourth turn");
    battle.use_card(0).expect("card usable again");
    assert_eq!(battle.combatant(Side::First).life(), 990);
}
