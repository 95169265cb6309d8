//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate keeps its fields private, exposes behavior through methods,
//! and returns outcome types from mutations.

pub mod conversation;

pub use conversation::{ConversationState, TurnPhase, GAME_OVER_PLACEHOLDER};
