//! The narrator's structured reply for one turn.
//!
//! The language model is instructed to answer with exactly one JSON object:
//!
//! ```json
//! { "sceneDescription": "...", "location": "...", "promptForImage": "...",
//!   "isGameOver": false, "gameOverReason": null }
//! ```
//!
//! [`TurnResult::parse`] is the only way in: it decodes the object and checks it
//! against that contract, so no partially filled result ever reaches the
//! conversation state.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Decoded and validated model response for a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    pub scene_description: String,
    pub location: String,
    pub prompt_for_image: String,
    pub is_game_over: bool,
    /// `null` or absent unless `is_game_over` is set.
    #[serde(default)]
    pub game_over_reason: Option<String>,
}

impl TurnResult {
    /// Parse raw model output into a `TurnResult`.
    ///
    /// Tolerates a surrounding Markdown code fence (```` ```json ... ``` ````),
    /// which some models emit even when asked for bare JSON. Anything else
    /// that does not match the contract is an error.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let body = strip_code_fence(raw);
        if body.is_empty() {
            return Err(DomainError::parse("model reply was empty"));
        }

        let result: TurnResult =
            serde_json::from_str(body).map_err(|e| DomainError::parse(e.to_string()))?;
        result.validate()?;
        Ok(result)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.scene_description.trim().is_empty() {
            return Err(DomainError::validation("sceneDescription must not be empty"));
        }
        Ok(())
    }

    /// The game-over reason with blank strings treated as absent.
    pub fn reason(&self) -> Option<&str> {
        self.game_over_reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    rest.trim()
}
