//! Common error infrastructure for duel-core.
//!
//! Domain-specific errors (`ActionError`, `TurnError`, `ResolveError`,
//! `BuildError`) live next to the code that produces them. This module
//! provides the severity classification and the trait they all implement.
//!
//! Expected domain conditions (locked card, empty action budget, blocked
//! factor) are returned as `Err` values and logged. They never panic.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request may succeed later or with another action
/// - **Validation**: the request itself is malformed
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: the battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: no actions left this turn, card frozen, not enough mana.
    Recoverable,

    /// Examples: unknown card slot, ability on an empty slot.
    Validation,

    /// Examples: bitfield out of sync with the factor table, arithmetic overflow.
    Internal,

    /// Examples: battle built without both combatants.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all duel-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by recoverability, not impact
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_internal_and_fatal_are_bugs() {
        assert!(!ErrorSeverity::Recoverable.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Recoverable.is_recoverable());
    }
}
