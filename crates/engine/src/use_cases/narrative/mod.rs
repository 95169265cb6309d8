//! Narrative use cases: the narrator client and the turn orchestrator.

pub mod client;
pub mod orchestrator;

pub use client::{NarrativeClient, NarrativeError};
pub use orchestrator::{
    SubmitOutcome, TurnError, TurnOrchestrator, IMAGE_FAILED_MESSAGE, OPENING_FAILED_MESSAGE,
    TURN_FAILED_MESSAGE,
};
