use super::Side;

/// What the scheduler is currently doing.
///
/// Used to reject re-entrant calls into turn resolution or action execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    Idle,
    /// Turn-start factor resolution is running.
    Resolving,
    /// An action is executing.
    Acting,
}

/// Turn bookkeeping for the two alternating owners.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// The side whose turn it is.
    pub owner: Side,

    /// Number of turns started so far (1 after the first turn begins).
    pub number: u32,

    /// Standard actions the owner may still take this turn.
    pub actions_remaining: u8,

    /// Set once the budget reaches zero; cleared only by the next turn.
    pub locked: bool,

    pub phase: TurnPhase,

    /// Monotonic counter advanced by every random roll, mixed into RNG seeds.
    pub nonce: u64,
}

impl TurnState {
    /// Creates a turn state that has not started yet.
    ///
    /// `first` becomes the owner when the battle starts.
    pub fn new(first: Side) -> Self {
        Self {
            owner: first,
            number: 0,
            actions_remaining: 0,
            locked: true,
            phase: TurnPhase::Idle,
            nonce: 0,
        }
    }

    /// Whether the battle has begun its first turn.
    pub fn started(&self) -> bool {
        self.number > 0
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new(Side::First)
    }
}
