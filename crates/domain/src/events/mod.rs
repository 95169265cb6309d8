//! Outcome types returned from `ConversationState` mutations.

use crate::entities::Turn;

/// Why a submission was turned away without touching the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Input was empty or whitespace-only.
    EmptyInput,
    /// A turn is already in flight.
    Busy,
    /// The game has ended; only a restart is accepted.
    GameOver,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::EmptyInput => "input is empty",
            RejectReason::Busy => "a turn is already in flight",
            RejectReason::GameOver => "the game is over",
        };
        f.write_str(s)
    }
}

/// Result of committing a narrator turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnCommitted {
    /// Index of the narrator turn in the log.
    pub index: usize,
    pub had_image: bool,
    pub game_over: bool,
}

/// Result of failing a turn during text generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRolledBack {
    /// The optimistic player turn removed from the log, if there was one.
    /// Opening turns have none.
    pub removed: Option<Turn>,
}
