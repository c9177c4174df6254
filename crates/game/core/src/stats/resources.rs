//! Resource pools (life, two ability-cost pools, ultimate charge).
//!
//! Pools are partially stored:
//! - Base maximum and current value: combatant state (stored)
//! - Effective maximum: base + external bonus, recomputed on every read

use super::bonus::StatBonuses;

// ============================================================================
// Resource Kind
// ============================================================================

/// Individual resource pools tracked per combatant.
///
/// Used in costs, siphons, regeneration and notifications.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ResourceKind {
    /// Health. Reaching zero defeats the combatant.
    Life = 0,
    /// First ability-cost pool.
    Mana = 1,
    /// Second ability-cost pool.
    Stamina = 2,
    /// Ultimate charge, filled by attacking.
    Charge = 3,
}

impl ResourceKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Pool
// ============================================================================

/// A single resource pool.
///
/// `current` is never allowed to exceed the effective maximum; callers pass the
/// bonus-adjusted maximum into every mutating method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    pub current: u32,
    pub base_max: u32,
}

impl Pool {
    /// Creates a pool filled to its base maximum.
    pub const fn full(base_max: u32) -> Self {
        Self {
            current: base_max,
            base_max,
        }
    }

    /// Creates a pool with an explicit current value (clamped to `base_max`).
    pub const fn new(current: u32, base_max: u32) -> Self {
        let current = if current > base_max { base_max } else { current };
        Self { current, base_max }
    }

    /// Adds up to `amount`, stopping at `effective_max`. Returns the amount gained.
    pub fn gain(&mut self, amount: u32, effective_max: u32) -> u32 {
        let room = effective_max.saturating_sub(self.current);
        let gained = amount.min(room);
        self.current += gained;
        gained
    }

    /// Removes up to `amount`, stopping at zero. Returns the amount lost.
    pub fn lose(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// Clamps `current` down to `effective_max`.
    pub fn clamp(&mut self, effective_max: u32) {
        self.current = self.current.min(effective_max);
    }
}

/// The four pools of a combatant, indexed by [`ResourceKind`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pools: [Pool; 4],
}

impl Resources {
    pub const fn new(life: Pool, mana: Pool, stamina: Pool, charge: Pool) -> Self {
        Self {
            pools: [life, mana, stamina, charge],
        }
    }

    #[inline]
    pub fn pool(&self, kind: ResourceKind) -> &Pool {
        &self.pools[kind.index()]
    }

    #[inline]
    pub fn pool_mut(&mut self, kind: ResourceKind) -> &mut Pool {
        &mut self.pools[kind.index()]
    }

    /// Effective maximum: base plus the external bonus for that pool.
    pub fn effective_max(&self, kind: ResourceKind, bonuses: &StatBonuses) -> u32 {
        self.pool(kind)
            .base_max
            .saturating_add(bonuses.max_for(kind))
    }
}

// ============================================================================
// Resource Cost
// ============================================================================

/// Resource requirement map of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub mana: u32,
    pub stamina: u32,
    pub charge: u32,
}

impl ResourceCost {
    pub const FREE: Self = Self {
        mana: 0,
        stamina: 0,
        charge: 0,
    };

    pub const fn mana(amount: u32) -> Self {
        Self {
            mana: amount,
            stamina: 0,
            charge: 0,
        }
    }

    pub const fn stamina(amount: u32) -> Self {
        Self {
            mana: 0,
            stamina: amount,
            charge: 0,
        }
    }

    pub const fn charge(amount: u32) -> Self {
        Self {
            mana: 0,
            stamina: 0,
            charge: amount,
        }
    }

    /// Iterates non-zero requirements.
    pub fn entries(&self) -> impl Iterator<Item = (ResourceKind, u32)> {
        [
            (ResourceKind::Mana, self.mana),
            (ResourceKind::Stamina, self.stamina),
            (ResourceKind::Charge, self.charge),
        ]
        .into_iter()
        .filter(|&(_, amount)| amount > 0)
    }
}
