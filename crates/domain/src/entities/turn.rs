//! A single entry in the narrative log.

use serde::{Deserialize, Serialize};

use crate::value_objects::SceneImage;

/// One exchange unit: either the player's action or the narrator's response.
///
/// Narrator turns may carry the illustration generated for them; player turns
/// never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    text: String,
    image: Option<SceneImage>,
    is_player_input: bool,
}

impl Turn {
    /// A player action as typed.
    pub fn player(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
            is_player_input: true,
        }
    }

    /// A narrator response with its illustration, if one was produced.
    pub fn narrator(text: impl Into<String>, image: Option<SceneImage>) -> Self {
        Self {
            text: text.into(),
            image,
            is_player_input: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&SceneImage> {
        self.image.as_ref()
    }

    pub fn is_player_input(&self) -> bool {
        self.is_player_input
    }
}
