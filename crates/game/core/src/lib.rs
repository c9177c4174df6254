//! Deterministic battle logic for two-combatant, turn-based duels.
//!
//! `duel-core` holds the canonical rules: the factor (status-effect) store and
//! its per-family resolution, the damage pipeline, and the turn/action
//! scheduler. All state mutation flows through [`engine::Battle`]; every
//! observable change is reported as an [`event::BattleEvent`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod factor;
pub mod factory;
pub mod state;
pub mod stats;

pub use combat::{DamageFamily, DamageMode, DamageOrigin, DamageReport, DamageRequest};
pub use config::BattleConfig;
pub use engine::{
    AbilityContext, ActionError, Battle, BattleBuilder, BuildError, ResolveError, TurnError,
    TurnStep,
};
pub use env::{FixedRoll, PcgRng, RngOracle};
pub use error::{BattleError, ErrorSeverity};
pub use event::{BattleEvent, BattleListener, EventRecorder, EventSink, ListenerRegistry};
pub use factor::rules::{FreezeOutcome, ShieldReport};
pub use factor::{
    ApplyOutcome, BlockReason, EffectType, FactorInstance, FactorParams, FactorStore,
    StackingClass, StatusFlags,
};
pub use factory::{CombatantFactory, CombatantTemplate, StandardFactory};
pub use state::{
    Ability, BaseStats, BattleState, Card, CardPayload, CardSlot, CharacterState, Combatant,
    CombatantId, Element, Side, TurnPhase, TurnState, WeaponClass, WeaponProfile,
};
pub use stats::{Charm, Pool, ResourceCost, ResourceKind, Resources, StatBonuses};
