//! Wanderer Engine library.
//!
//! Turn loop, generative backends and terminal front end for the midnight
//! Hogwarts text adventure.
//!
//! ## Structure
//!
//! - `use_cases/` - Narrative client and turn orchestration
//! - `infrastructure/` - Configuration plus Gemini and Imagen adapters (ports + adapters)
//! - `presentation/` - Terminal rendering and the stdin loop
//! - `prompt_templates` - Fixed prompts sent to the backends
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod presentation;
pub mod prompt_templates;
pub mod use_cases;

/// Test fixtures shared by unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
