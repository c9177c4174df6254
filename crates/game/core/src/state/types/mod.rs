pub mod combatant;
pub mod common;
pub mod turn;

// Re-export combatant-related types
pub use combatant::{
    // Cards
    Ability,
    // Main combatant state
    BaseStats,
    Card,
    CardPayload,
    CardSlot,
    CharacterState,
    Combatant,
    WeaponProfile,
};

// Re-export common types
pub use common::{CombatantId, Element, Side, WeaponClass};

// Re-export turn state
pub use turn::{TurnPhase, TurnState};
