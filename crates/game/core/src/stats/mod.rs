//! Stat model for combatants.
//!
//! Two layers:
//! - **Resources**: stored pools (life, mana, stamina, charge) whose effective
//!   maximum is recomputed from base + bonus on every read
//! - **Bonuses**: opaque additive contributions from cards and charms
//!
//! # Invariant
//!
//! A pool's current value never exceeds its effective maximum. Every mutation
//! goes through [`Pool::gain`]/[`Pool::lose`]/[`Pool::clamp`] with the maximum
//! computed at that moment.

pub mod bonus;
pub mod resources;

pub use bonus::{Charm, StatBonuses};
pub use resources::{Pool, ResourceCost, ResourceKind, Resources};
