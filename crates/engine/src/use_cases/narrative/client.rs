//! Narrative client: the two remote calls behind every turn.
//!
//! Text generation is fatal to a turn when it fails; image generation never
//! is. That asymmetry is visible in the signatures: text returns a `Result`,
//! images return an `Option`.

use std::sync::Arc;

use wanderer_domain::{SceneImage, Turn, TurnResult};

use crate::infrastructure::ports::{
    ChatMessage, FinishReason, ImageGenPort, ImageRequest, LlmError, LlmPort, LlmRequest,
    ResponseFormat,
};
use crate::prompt_templates::{
    scene_image_prompt, OPENING_PROMPT, SCENE_IMAGE_ASPECT_RATIO, SCENE_IMAGE_MIME_TYPE,
    SYSTEM_INSTRUCTION,
};

/// Failure of the text-generation step of a turn.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NarrativeError {
    /// Backend unreachable or answered with an error status.
    #[error("Narrative backend request failed: {0}")]
    Transport(String),
    /// Backend answered, but not with a valid `TurnResult`.
    #[error("Malformed narrative response: {0}")]
    MalformedResponse(String),
}

impl From<LlmError> for NarrativeError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::RequestFailed(msg) => Self::Transport(msg),
            LlmError::InvalidResponse(msg) => Self::MalformedResponse(msg),
        }
    }
}

/// Issues text and image requests through the backend ports. Holds no
/// conversation state of its own.
pub struct NarrativeClient {
    llm: Arc<dyn LlmPort>,
    image_gen: Arc<dyn ImageGenPort>,
}

impl NarrativeClient {
    pub fn new(llm: Arc<dyn LlmPort>, image_gen: Arc<dyn ImageGenPort>) -> Self {
        Self { llm, image_gen }
    }

    /// Ask the narrator for the next beat.
    ///
    /// `history` is replayed in order (player turns as user messages, narrator
    /// turns as model messages) and `latest_input` is appended as the final
    /// user message.
    pub async fn generate_structured_turn(
        &self,
        history: &[Turn],
        latest_input: &str,
    ) -> Result<TurnResult, NarrativeError> {
        let request = LlmRequest::new(build_messages(history, latest_input))
            .with_system_prompt(SYSTEM_INSTRUCTION)
            .with_response_format(ResponseFormat::Json);

        let response = self.llm.generate(request).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Narrator reply received"
            );
        }
        if response.finish_reason != FinishReason::Stop {
            tracing::warn!(
                finish_reason = ?response.finish_reason,
                "Narrator reply did not finish normally"
            );
        }

        TurnResult::parse(&response.content)
            .map_err(|e| NarrativeError::MalformedResponse(e.to_string()))
    }

    /// The scripted first beat of a new session.
    pub async fn generate_opening_turn(&self) -> Result<TurnResult, NarrativeError> {
        self.generate_structured_turn(&[], OPENING_PROMPT).await
    }

    /// Illustrate a scene. Returns `None` on any failure; the caller decides
    /// how to surface that.
    pub async fn generate_scene_image(&self, prompt: &str) -> Option<SceneImage> {
        if prompt.trim().is_empty() {
            tracing::warn!("Narrator gave no image prompt, skipping illustration");
            return None;
        }

        let request = ImageRequest {
            prompt: scene_image_prompt(prompt),
            count: 1,
            mime_type: SCENE_IMAGE_MIME_TYPE.to_string(),
            aspect_ratio: SCENE_IMAGE_ASPECT_RATIO.to_string(),
        };

        match self.image_gen.generate(request).await {
            Ok(image) => Some(SceneImage::new(image.mime_type, image.base64_data)),
            Err(e) => {
                tracing::warn!(error = %e, "Scene image generation failed");
                None
            }
        }
    }
}

fn build_messages(history: &[Turn], latest_input: &str) -> Vec<ChatMessage> {
    history
        .iter()
        .map(|turn| {
            if turn.is_player_input() {
                ChatMessage::user(turn.text())
            } else {
                ChatMessage::assistant(turn.text())
            }
        })
        .chain(std::iter::once(ChatMessage::user(latest_input)))
        .collect()
}
