//! Error types for the turn scheduler and action execution.

use crate::error::{BattleError, ErrorSeverity};
use crate::factor::{BlockReason, EffectType};
use crate::state::{CombatantId, Side, TurnPhase};

/// Errors returned by scheduler calls (`start`, `next_turn`).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("scheduler re-entered while {phase}")]
    Reentrant { phase: TurnPhase },

    #[error("battle has not started")]
    NotStarted,

    #[error("battle has already started")]
    AlreadyStarted,

    #[error("battle is over")]
    BattleOver,
}

impl BattleError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::Reentrant { .. } => ErrorSeverity::Internal,
            TurnError::NotStarted | TurnError::AlreadyStarted => ErrorSeverity::Validation,
            TurnError::BattleOver => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::Reentrant { .. } => "TURN_REENTRANT",
            TurnError::NotStarted => "TURN_NOT_STARTED",
            TurnError::AlreadyStarted => "TURN_ALREADY_STARTED",
            TurnError::BattleOver => "TURN_BATTLE_OVER",
        }
    }
}

/// Errors that reject an action. The battle state is unchanged when one is
/// returned, except for effects an ability applied before failing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("action attempted while {phase}")]
    Reentrant { phase: TurnPhase },

    #[error("battle has not started")]
    NotStarted,

    #[error("battle is over")]
    BattleOver,

    #[error("no actions remaining this turn")]
    NoActionsRemaining,

    #[error("standard actions are locked until the next turn")]
    ActionsLocked,

    #[error("no card in slot {slot}")]
    CardNotFound { slot: usize },

    #[error("card in slot {slot} is frozen for {turns} more turn(s)")]
    CardFrozen { slot: usize, turns: u32 },

    #[error("card in slot {slot} is not an ability")]
    NotAnAbility { slot: usize },

    #[error("insufficient resources for card in slot {slot}")]
    InsufficientResources { slot: usize },

    #[error("card lockdown blocked by {reason}")]
    LockBlocked { reason: BlockReason },

    /// Raised by ability scripts for their own preconditions. The action
    /// still counts against the budget.
    #[error("ability failed: {0}")]
    AbilityFailed(String),
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            Reentrant { .. } => ErrorSeverity::Internal,
            NotStarted | CardNotFound { .. } | NotAnAbility { .. } => ErrorSeverity::Validation,
            BattleOver | NoActionsRemaining | ActionsLocked => ErrorSeverity::Recoverable,
            CardFrozen { .. } | InsufficientResources { .. } | LockBlocked { .. } => {
                ErrorSeverity::Recoverable
            }
            AbilityFailed(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            Reentrant { .. } => "ACTION_REENTRANT",
            NotStarted => "ACTION_NOT_STARTED",
            BattleOver => "ACTION_BATTLE_OVER",
            NoActionsRemaining => "ACTION_NO_ACTIONS_REMAINING",
            ActionsLocked => "ACTION_LOCKED",
            CardNotFound { .. } => "ACTION_CARD_NOT_FOUND",
            CardFrozen { .. } => "ACTION_CARD_FROZEN",
            NotAnAbility { .. } => "ACTION_NOT_AN_ABILITY",
            InsufficientResources { .. } => "ACTION_INSUFFICIENT_RESOURCES",
            LockBlocked { .. } => "ACTION_LOCK_BLOCKED",
            AbilityFailed(_) => "ACTION_ABILITY_FAILED",
        }
    }
}

/// Internal faults raised by a turn-start resolution step.
///
/// These indicate bugs. The scheduler logs them and runs the remaining steps.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("status bit for {effect} on {combatant} disagrees with its factor table")]
    Inconsistent {
        combatant: CombatantId,
        effect: EffectType,
    },

    #[error("{effect} amount overflowed")]
    Overflow { effect: EffectType },
}

impl BattleError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            ResolveError::Inconsistent { .. } => "RESOLVE_INCONSISTENT",
            ResolveError::Overflow { .. } => "RESOLVE_OVERFLOW",
        }
    }
}

/// Errors raised while assembling a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("no combatant for side {0}")]
    MissingCombatant(Side),

    #[error("both combatants use id {0}")]
    DuplicateId(CombatantId),
}

impl BattleError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            BuildError::MissingCombatant(_) => "BUILD_MISSING_COMBATANT",
            BuildError::DuplicateId(_) => "BUILD_DUPLICATE_ID",
        }
    }
}
