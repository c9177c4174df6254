//! Timed status effects ("factors").
//!
//! # Architecture
//!
//! - [`EffectType`]: closed set of effect kinds, each mapped to one status bit
//!   and one stacking class
//! - [`FactorParams`]: strongly-typed parameters, one variant per effect type
//! - [`FactorStore`]: owns every live instance per combatant and the bitfield
//!   mirror; the only code path allowed to change either
//! - [`rules`]: per-family resolution (shield drain, burn, storm, siphons,
//!   regeneration, card lockdown)
//!
//! # Invariant
//!
//! For every registered combatant and effect type, the status bit is set iff
//! at least one live instance of that type exists.

pub mod rules;
pub mod store;

use bitflags::bitflags;

pub use store::{ApplyOutcome, FactorStore};

// ============================================================================
// Status bitfield
// ============================================================================

bitflags! {
    /// Per-combatant mirror of which effect types have live instances.
    ///
    /// Derived data: maintained exclusively by [`FactorStore`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u16 {
        const SHIELD         = 1 << 0;
        const REGENERATION   = 1 << 1;
        const MANA_SIPHON    = 1 << 2;
        const STAMINA_SIPHON = 1 << 3;
        const STORM          = 1 << 4;
        const BURN           = 1 << 5;
        const IMMUNITY       = 1 << 6;
    }
}

// ============================================================================
// Effect type
// ============================================================================

/// Whether an effect type allows concurrent instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackingClass {
    /// Many independent instances may be live at once.
    Stacking,
    /// At most one instance; reapplication replaces it.
    Overwrite,
}

/// Closed set of factor kinds.
///
/// The discriminant is the dense ordinal used to index the store's table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum EffectType {
    /// Consumable damage-prevention pool.
    Shield = 0,
    /// Heal-over-time with a life-loss side channel on the opponent.
    Regeneration = 1,
    /// Steals mana from the opponent each turn.
    ManaSiphon = 2,
    /// Steals stamina from the opponent each turn.
    StaminaSiphon = 3,
    /// Area denial: per-turn damage, blocks every other application.
    Storm = 4,
    /// Damage-over-time in percent of maximum life.
    Burn = 5,
    /// Rejects hostile factors and card lockdown.
    Immunity = 6,
}

impl EffectType {
    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub const fn class(self) -> StackingClass {
        match self {
            EffectType::Storm | EffectType::Immunity => StackingClass::Overwrite,
            EffectType::Shield
            | EffectType::Regeneration
            | EffectType::ManaSiphon
            | EffectType::StaminaSiphon
            | EffectType::Burn => StackingClass::Stacking,
        }
    }

    pub const fn is_stacking(self) -> bool {
        matches!(self.class(), StackingClass::Stacking)
    }

    /// Effects that harm their holder; Immunity rejects these.
    pub const fn is_hostile(self) -> bool {
        matches!(self, EffectType::Burn | EffectType::Storm)
    }

    pub const fn flag(self) -> StatusFlags {
        match self {
            EffectType::Shield => StatusFlags::SHIELD,
            EffectType::Regeneration => StatusFlags::REGENERATION,
            EffectType::ManaSiphon => StatusFlags::MANA_SIPHON,
            EffectType::StaminaSiphon => StatusFlags::STAMINA_SIPHON,
            EffectType::Storm => StatusFlags::STORM,
            EffectType::Burn => StatusFlags::BURN,
            EffectType::Immunity => StatusFlags::IMMUNITY,
        }
    }
}

/// Why an application was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BlockReason {
    /// The target is inside an active Storm.
    Storm,
    /// The target holds Immunity.
    Immunity,
}

// ============================================================================
// Parameters and instances
// ============================================================================

/// Parameters of a factor, one variant per effect type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FactorParams {
    Shield { points: u32 },
    Regeneration { amount: u32 },
    ManaSiphon { rate: u32 },
    StaminaSiphon { rate: u32 },
    Storm { damage: u32 },
    Burn { percent: u32 },
    Immunity,
}

impl FactorParams {
    pub const fn effect(&self) -> EffectType {
        match self {
            FactorParams::Shield { .. } => EffectType::Shield,
            FactorParams::Regeneration { .. } => EffectType::Regeneration,
            FactorParams::ManaSiphon { .. } => EffectType::ManaSiphon,
            FactorParams::StaminaSiphon { .. } => EffectType::StaminaSiphon,
            FactorParams::Storm { .. } => EffectType::Storm,
            FactorParams::Burn { .. } => EffectType::Burn,
            FactorParams::Immunity => EffectType::Immunity,
        }
    }

    /// The single integer parameter of the variant (0 for Immunity).
    pub const fn magnitude(&self) -> u32 {
        match *self {
            FactorParams::Shield { points } => points,
            FactorParams::Regeneration { amount } => amount,
            FactorParams::ManaSiphon { rate } | FactorParams::StaminaSiphon { rate } => rate,
            FactorParams::Storm { damage } => damage,
            FactorParams::Burn { percent } => percent,
            FactorParams::Immunity => 0,
        }
    }
}

/// A live factor owned by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorInstance {
    params: FactorParams,
    remaining_turns: u32,
}

impl FactorInstance {
    pub(crate) const fn new(params: FactorParams, remaining_turns: u32) -> Self {
        Self {
            params,
            remaining_turns,
        }
    }

    #[inline]
    pub const fn effect(&self) -> EffectType {
        self.params.effect()
    }

    #[inline]
    pub const fn params(&self) -> &FactorParams {
        &self.params
    }

    #[inline]
    pub const fn remaining_turns(&self) -> u32 {
        self.remaining_turns
    }

    #[inline]
    pub const fn magnitude(&self) -> u32 {
        self.params.magnitude()
    }
}
