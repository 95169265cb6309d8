//! Imagen image generation client
//!
//! Implements the ImageGenPort trait using the Gemini API's Imagen `predict` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{ImageGenError, ImageGenPort, ImageRequest, ImageResult};

/// Default image model.
pub const DEFAULT_IMAGEN_MODEL: &str = "imagen-4.0-generate-001";

/// Client for the Imagen API
#[derive(Clone)]
pub struct ImagenClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ImagenClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self::with_timeout(base_url, model, api_key, 300) // 5 minute timeout for generation
    }

    pub fn with_timeout(base_url: &str, model: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:predict", self.base_url, self.model)
    }
}

#[async_trait]
impl ImageGenPort for ImagenClient {
    async fn generate(&self, request: ImageRequest) -> Result<ImageResult, ImageGenError> {
        let api_request = PredictRequest {
            instances: vec![Instance {
                prompt: request.prompt,
            }],
            parameters: Parameters {
                sample_count: request.count,
                aspect_ratio: request.aspect_ratio,
                output_options: OutputOptions {
                    mime_type: request.mime_type.clone(),
                },
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ImageGenError::Unavailable
                } else {
                    ImageGenError::GenerationFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ImageGenError::GenerationFailed(format!(
                "{status}: {error_text}"
            )));
        }

        let api_response: PredictResponse = response
            .json()
            .await
            .map_err(|e| ImageGenError::GenerationFailed(e.to_string()))?;

        // Filtered prompts come back as predictions without image bytes.
        let prediction = api_response
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.is_some())
            .ok_or_else(|| ImageGenError::GenerationFailed("No images in output".to_string()))?;

        Ok(ImageResult {
            base64_data: prediction.bytes_base64_encoded.unwrap_or_default(),
            mime_type: prediction.mime_type.unwrap_or(request.mime_type),
        })
    }
}

// =============================================================================
// Imagen API types
// =============================================================================

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<Instance>,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Instance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
    aspect_ratio: String,
    output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::test_fixtures::spawn_stub_backend;

    fn request() -> ImageRequest {
        ImageRequest {
            prompt: "a student hiding behind armor".to_string(),
            count: 1,
            mime_type: "image/jpeg".to_string(),
            aspect_ratio: "16:9".to_string(),
        }
    }

    #[tokio::test]
    async fn sends_generation_options_and_returns_first_image() {
        let captured: Arc<Mutex<Option<Value>>> = Arc::default();
        let router = Router::new()
            .route(
                "/v1beta/models/{action}",
                post(
                    |State(captured): State<Arc<Mutex<Option<Value>>>>,
                     Json(body): Json<Value>| async move {
                        *captured.lock().expect("lock") = Some(body);
                        Json(json!({
                            "predictions": [
                                { "bytesBase64Encoded": "/9j/4AAQ", "mimeType": "image/jpeg" }
                            ]
                        }))
                    },
                ),
            )
            .with_state(captured.clone());
        let (base_url, _server) = spawn_stub_backend(router).await;

        let client = ImagenClient::with_timeout(&base_url, "imagen-test", "secret", 5);
        let image = client.generate(request()).await.expect("stub replies");

        assert_eq!(image.base64_data, "/9j/4AAQ");
        assert_eq!(image.mime_type, "image/jpeg");

        let body = captured.lock().expect("lock").clone().expect("request captured");
        assert_eq!(body["instances"][0]["prompt"], "a student hiding behind armor");
        assert_eq!(body["parameters"]["sampleCount"], 1);
        assert_eq!(body["parameters"]["aspectRatio"], "16:9");
        assert_eq!(body["parameters"]["outputOptions"]["mimeType"], "image/jpeg");
    }

    #[tokio::test]
    async fn empty_predictions_is_generation_failure() {
        let router = Router::new().route(
            "/v1beta/models/{action}",
            post(|| async { Json(json!({ "predictions": [{ "raiFilteredReason": "x" }] })) }),
        );
        let (base_url, _server) = spawn_stub_backend(router).await;

        let client = ImagenClient::with_timeout(&base_url, "imagen-test", "secret", 5);
        let err = client.generate(request()).await.unwrap_err();
        assert!(matches!(err, ImageGenError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        let client = ImagenClient::with_timeout("http://127.0.0.1:9", "imagen-test", "secret", 2);
        let err = client.generate(request()).await.unwrap_err();
        assert!(matches!(err, ImageGenError::Unavailable));
    }
}
