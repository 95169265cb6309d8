//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::AppConfig,
    gemini::GeminiClient,
    imagen::ImagenClient,
    ports::{ImageGenPort, LlmPort},
};
use crate::use_cases::{NarrativeClient, TurnOrchestrator};

/// Main application state.
///
/// Holds the backend ports and the turn orchestrator the console drives.
pub struct App {
    pub llm: Arc<dyn LlmPort>,
    pub image_gen: Arc<dyn ImageGenPort>,
    pub orchestrator: Arc<TurnOrchestrator>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(llm: Arc<dyn LlmPort>, image_gen: Arc<dyn ImageGenPort>) -> Self {
        let narrative = Arc::new(NarrativeClient::new(llm.clone(), image_gen.clone()));
        let orchestrator = Arc::new(TurnOrchestrator::new(narrative));

        Self {
            llm,
            image_gen,
            orchestrator,
        }
    }

    /// Build the Gemini and Imagen clients described by `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        tracing::info!(
            base_url = %config.base_url,
            text_model = %config.text_model,
            image_model = %config.image_model,
            "Configuring generative backends"
        );

        let llm: Arc<dyn LlmPort> = Arc::new(GeminiClient::new(
            &config.base_url,
            &config.text_model,
            &config.api_key,
        ));
        let image_gen: Arc<dyn ImageGenPort> = Arc::new(ImagenClient::new(
            &config.base_url,
            &config.image_model,
            &config.api_key,
        ));

        Self::new(llm, image_gen)
    }
}
