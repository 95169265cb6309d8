//! Conversation aggregate - the narrative log and everything derived from it
//!
//! # Turn state machine
//!
//! Every turn moves through explicit phases:
//!
//! ```text
//! Idle --begin_submission/begin_opening--> AwaitingText
//! AwaitingText --text_resolved--> AwaitingImage --commit_turn--> Idle
//! AwaitingText --fail_turn--> Idle   (optimistic player turn removed)
//! ```
//!
//! Transitions called from the wrong phase return
//! `DomainError::InvalidStateTransition` and leave the state untouched.
//! While a turn is in flight (`is_loading()`), new submissions are rejected
//! with `RejectReason::Busy`.
//!
//! # Invariants
//!
//! - `turns` is in chronological order; the only removal is the rollback of
//!   the pending player turn.
//! - `is_game_over()` implies a non-empty `game_over_reason()`.
//! - Once the game is over, submissions are rejected until a new opening.

use crate::entities::Turn;
use crate::error::DomainError;
use crate::events::{RejectReason, TurnCommitted, TurnRolledBack};
use crate::value_objects::{SceneImage, TurnResult};

/// Stored when the model ends the game without saying why.
pub const GAME_OVER_PLACEHOLDER: &str = "The adventure has ended.";

/// Where the current turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    AwaitingText,
    AwaitingImage,
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TurnPhase::Idle => "Idle",
            TurnPhase::AwaitingText => "AwaitingText",
            TurnPhase::AwaitingImage => "AwaitingImage",
        };
        f.write_str(s)
    }
}

/// The whole session as the player sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    turns: Vec<Turn>,
    current_location: String,
    is_game_over: bool,
    game_over_reason: String,
    phase: TurnPhase,
    last_error: Option<String>,
    // Set while the last entry of `turns` is an optimistic player turn.
    pending_player_turn: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn current_location(&self) -> &str {
        &self.current_location
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Empty unless the game is over.
    pub fn game_over_reason(&self) -> &str {
        &self.game_over_reason
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase != TurnPhase::Idle
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Illustration of the most recent turn that has one.
    pub fn latest_image(&self) -> Option<&SceneImage> {
        self.turns.iter().rev().find_map(Turn::image)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Check whether `input` would be accepted, without changing anything.
    pub fn check_submission(&self, input: &str) -> Result<(), RejectReason> {
        if input.trim().is_empty() {
            return Err(RejectReason::EmptyInput);
        }
        if self.is_loading() {
            return Err(RejectReason::Busy);
        }
        if self.is_game_over {
            return Err(RejectReason::GameOver);
        }
        Ok(())
    }

    /// Optimistically append the player's turn and enter `AwaitingText`.
    ///
    /// Returns the history as it was before the append; that is what the
    /// narrator is shown alongside the new input.
    pub fn begin_submission(&mut self, input: &str) -> Result<Vec<Turn>, RejectReason> {
        self.check_submission(input)?;

        let history = self.turns.clone();
        self.last_error = None;
        self.turns.push(Turn::player(input));
        self.pending_player_turn = true;
        self.phase = TurnPhase::AwaitingText;
        Ok(history)
    }

    /// Reset everything and enter `AwaitingText` for the scripted opening.
    pub fn begin_opening(&mut self) -> Result<(), RejectReason> {
        if self.is_loading() {
            return Err(RejectReason::Busy);
        }
        *self = Self {
            phase: TurnPhase::AwaitingText,
            ..Self::default()
        };
        Ok(())
    }

    /// Text generation succeeded; the image is next.
    pub fn text_resolved(&mut self) -> Result<(), DomainError> {
        self.expect_phase(TurnPhase::AwaitingText, TurnPhase::AwaitingImage)?;
        self.phase = TurnPhase::AwaitingImage;
        Ok(())
    }

    /// Append the narrator turn and fold the model's result into the state.
    pub fn commit_turn(
        &mut self,
        result: &TurnResult,
        image: Option<SceneImage>,
    ) -> Result<TurnCommitted, DomainError> {
        self.expect_phase(TurnPhase::AwaitingImage, TurnPhase::Idle)?;

        let had_image = image.is_some();
        self.turns
            .push(Turn::narrator(result.scene_description.clone(), image));
        self.current_location = result.location.clone();
        if result.is_game_over {
            self.is_game_over = true;
            self.game_over_reason = result
                .reason()
                .unwrap_or(GAME_OVER_PLACEHOLDER)
                .to_string();
        }
        self.pending_player_turn = false;
        self.phase = TurnPhase::Idle;

        Ok(TurnCommitted {
            index: self.turns.len() - 1,
            had_image,
            game_over: self.is_game_over,
        })
    }

    /// Text generation failed: drop the optimistic player turn, surface
    /// `message`, and return to `Idle`.
    pub fn fail_turn(&mut self, message: impl Into<String>) -> Result<TurnRolledBack, DomainError> {
        self.expect_phase(TurnPhase::AwaitingText, TurnPhase::Idle)?;

        let removed = if self.pending_player_turn {
            self.turns.pop()
        } else {
            None
        };
        self.pending_player_turn = false;
        self.last_error = Some(message.into());
        self.phase = TurnPhase::Idle;

        Ok(TurnRolledBack { removed })
    }

    /// Surface a non-fatal message without touching the log.
    pub fn record_advisory(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    fn expect_phase(&self, expected: TurnPhase, next: TurnPhase) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DomainError::invalid_transition(format!(
                "{} -> {} (expected {})",
                self.phase, next, expected
            )))
        }
    }
}
