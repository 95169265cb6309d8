//! Turn orchestrator use case.
//!
//! Runs one submission through text generation, image generation, and the
//! commit or rollback of `ConversationState`.
//!
//! The state lives behind a `tokio::sync::RwLock` so a renderer can take
//! snapshots while a turn is in flight. The lock is never held across a
//! backend call; the state's own phase is what keeps turns from overlapping.

use std::sync::Arc;

use tokio::sync::RwLock;
use wanderer_domain::{
    ConversationState, DomainError, RejectReason, TurnCommitted, TurnResult,
};

use super::client::{NarrativeClient, NarrativeError};

/// Shown when a player turn fails during text generation.
pub const TURN_FAILED_MESSAGE: &str =
    "The castle whispers are confusing... The connection was lost. Please try again.";

/// Shown when the opening turn of a session fails.
pub const OPENING_FAILED_MESSAGE: &str = "Could not initialize the magic. Please refresh the page.";

/// Advisory shown when a turn committed without its illustration.
pub const IMAGE_FAILED_MESSAGE: &str = "The magic of vision failed. Please try again.";

/// Why an accepted turn did not commit.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Narrative(#[from] NarrativeError),
    #[error(transparent)]
    State(#[from] DomainError),
}

/// What happened to a submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A narrator turn was appended.
    Committed(TurnCommitted),
    /// Text generation failed and the state was rolled back.
    Failed(TurnError),
    /// Turned away before anything changed.
    Rejected(RejectReason),
}

/// Turn orchestrator.
///
/// Orchestrates: submission guards, optimistic append, text then image
/// generation, commit or rollback.
pub struct TurnOrchestrator {
    narrative: Arc<NarrativeClient>,
    state: Arc<RwLock<ConversationState>>,
}

impl TurnOrchestrator {
    pub fn new(narrative: Arc<NarrativeClient>) -> Self {
        Self {
            narrative,
            state: Arc::new(RwLock::new(ConversationState::new())),
        }
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> ConversationState {
        self.state.read().await.clone()
    }

    /// Submit a player action.
    ///
    /// Empty input, a turn already in flight, or a finished game reject the
    /// submission without changing the state.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let history = {
            let mut state = self.state.write().await;
            match state.begin_submission(input) {
                Ok(history) => history,
                Err(reason) => {
                    tracing::debug!(reason = %reason, "Submission rejected");
                    return SubmitOutcome::Rejected(reason);
                }
            }
        };

        tracing::info!(history_len = history.len(), "Player turn submitted");
        let result = self
            .narrative
            .generate_structured_turn(&history, input)
            .await;
        self.finish_turn(result, TURN_FAILED_MESSAGE).await
    }

    /// Reset the session and play the scripted opening turn.
    ///
    /// Rejected with `Busy` while a turn is in flight.
    pub async fn start_session(&self) -> SubmitOutcome {
        {
            let mut state = self.state.write().await;
            if let Err(reason) = state.begin_opening() {
                tracing::debug!(reason = %reason, "Restart rejected");
                return SubmitOutcome::Rejected(reason);
            }
        }

        tracing::info!("Starting new session");
        let result = self.narrative.generate_opening_turn().await;
        self.finish_turn(result, OPENING_FAILED_MESSAGE).await
    }

    async fn finish_turn(
        &self,
        result: Result<TurnResult, NarrativeError>,
        failure_message: &str,
    ) -> SubmitOutcome {
        let turn = match result {
            Ok(turn) => turn,
            Err(e) => {
                tracing::error!(error = %e, "Narrative generation failed, rolling back turn");
                let mut state = self.state.write().await;
                if let Err(state_err) = state.fail_turn(failure_message) {
                    return SubmitOutcome::Failed(state_err.into());
                }
                return SubmitOutcome::Failed(e.into());
            }
        };

        if let Err(e) = self.state.write().await.text_resolved() {
            return SubmitOutcome::Failed(e.into());
        }

        let image = self
            .narrative
            .generate_scene_image(&turn.prompt_for_image)
            .await;

        let mut state = self.state.write().await;
        if image.is_none() {
            state.record_advisory(IMAGE_FAILED_MESSAGE);
        }
        match state.commit_turn(&turn, image) {
            Ok(committed) => {
                tracing::info!(
                    location = %turn.location,
                    had_image = committed.had_image,
                    game_over = committed.game_over,
                    "Narrator turn committed"
                );
                SubmitOutcome::Committed(committed)
            }
            Err(e) => SubmitOutcome::Failed(e.into()),
        }
    }
}
