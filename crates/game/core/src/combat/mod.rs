//! Damage resolution.
//!
//! - [`damage`]: pure pre-shield arithmetic (offense, bonuses, defense)
//! - [`critical`]: critical roll and bonus
//! - [`pipeline`]: applies a request to the battle state (shields, life loss,
//!   defeat) and reports what happened
//!
//! # Modes
//!
//! | Mode       | Offense/defense | Shields |
//! |------------|-----------------|---------|
//! | `Standard` | yes             | yes     |
//! | `Bypass`   | no              | yes     |
//! | `Direct`   | no              | no      |

pub mod critical;
pub mod damage;
pub mod pipeline;

use crate::factor::EffectType;
use crate::state::{Element, WeaponProfile};

pub use critical::{critical_bonus, is_critical};
pub use damage::compute_damage;
pub use pipeline::DamageReport;

/// Which stat family a hit draws on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageFamily {
    /// Attack vs defense, plus the attacker's weapon bonus.
    Physical,
    /// Elemental attack vs elemental defense, plus the attacker's bonus for
    /// this element.
    Elemental(Element),
}

/// Which pipeline steps a hit skips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageMode {
    #[default]
    Standard,
    /// Fixed or percent-based amount: no offense, no defense. Shields apply.
    Bypass,
    /// Like `Bypass`, and shields are skipped too.
    Direct,
}

/// What produced a hit, carried into notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOrigin {
    /// A weapon card (by slot) during a normal attack.
    Weapon { slot: usize },
    /// A normal attack with no usable weapon.
    Unarmed,
    Ability,
    /// Turn-start resolution of a factor.
    Factor(EffectType),
}

/// A single hit to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRequest {
    /// Base amount. For `Bypass`/`Direct` this is the whole pre-critical total.
    pub base: u32,
    pub family: DamageFamily,
    pub mode: DamageMode,
    pub origin: DamageOrigin,
    /// Whether the attacker rolls for a critical hit.
    pub can_crit: bool,
}

impl DamageRequest {
    pub const fn physical(base: u32) -> Self {
        Self {
            base,
            family: DamageFamily::Physical,
            mode: DamageMode::Standard,
            origin: DamageOrigin::Ability,
            can_crit: true,
        }
    }

    pub const fn elemental(base: u32, element: Element) -> Self {
        Self {
            base,
            family: DamageFamily::Elemental(element),
            mode: DamageMode::Standard,
            origin: DamageOrigin::Ability,
            can_crit: true,
        }
    }

    /// A weapon hit from the card in `slot`.
    pub const fn weapon(profile: WeaponProfile, slot: usize) -> Self {
        Self {
            base: profile.base_damage,
            family: profile.family,
            mode: DamageMode::Standard,
            origin: DamageOrigin::Weapon { slot },
            can_crit: true,
        }
    }

    /// A precomputed amount (percent-based or fixed) that skips defense and
    /// never crits.
    pub const fn fixed(amount: u32, origin: DamageOrigin) -> Self {
        Self {
            base: amount,
            family: DamageFamily::Physical,
            mode: DamageMode::Bypass,
            origin,
            can_crit: false,
        }
    }

    pub const fn bypass(mut self) -> Self {
        self.mode = DamageMode::Bypass;
        self
    }

    pub const fn direct(mut self) -> Self {
        self.mode = DamageMode::Direct;
        self
    }

    pub const fn with_origin(mut self, origin: DamageOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub const fn without_crit(mut self) -> Self {
        self.can_crit = false;
        self
    }
}
