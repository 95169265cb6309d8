//! Midnight Wanderer domain.
//!
//! Pure types for the narrative log and the model response contract. No I/O.
//!
//! ## Structure
//!
//! - `entities/` - `Turn`, one entry of the log
//! - `value_objects/` - `SceneImage`, `TurnResult`
//! - `aggregates/` - `ConversationState` and its turn state machine
//! - `events/` - outcome types returned from state mutations

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod value_objects;

pub use aggregates::{ConversationState, TurnPhase, GAME_OVER_PLACEHOLDER};
pub use entities::Turn;
pub use error::DomainError;
pub use events::{RejectReason, TurnCommitted, TurnRolledBack};
pub use value_objects::{SceneImage, TurnResult};
