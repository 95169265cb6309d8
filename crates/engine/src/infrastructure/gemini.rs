//! Gemini LLM client (`generateContent` REST API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{
    FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse, MessageRole, ResponseFormat,
    TokenUsage,
};

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default text model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Client for Gemini's `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        // Use 120 second timeout for LLM requests (they can be slow)
        Self::with_timeout(base_url, model, api_key, 120)
    }

    /// Create client with custom timeout (for testing).
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
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LlmPort for GeminiClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_request = build_request(&request);

        tracing::debug!(
            model = %self.model,
            messages = api_request.contents.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::RequestFailed(format!("{status}: {error_text}")));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn build_request(request: &LlmRequest) -> GenerateContentRequest {
    let contents = request
        .messages
        .iter()
        .map(|msg| Content {
            role: Some(
                match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "model",
                }
                .to_string(),
            ),
            parts: vec![Part {
                text: Some(msg.content.clone()),
            }],
        })
        .collect();

    let system_instruction = request.system_prompt.as_ref().map(|system| Content {
        role: None,
        parts: vec![Part {
            text: Some(system.clone()),
        }],
    });

    let generation_config = match request.response_format {
        ResponseFormat::Json => Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
        }),
        ResponseFormat::Text => None,
    };

    GenerateContentRequest {
        contents,
        system_instruction,
        generation_config,
    }
}

fn convert_response(response: GenerateContentResponse) -> Result<LlmResponse, LlmError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(LlmError::InvalidResponse(format!(
            "No candidates in Gemini response ({reason})"
        )));
    };

    let content: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
            FinishReason::ContentFilter
        }
        Some(_) => FinishReason::Unknown,
    };

    Ok(LlmResponse {
        content,
        finish_reason,
        usage: response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        }),
    })
}

// =============================================================================
// Gemini API types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::infrastructure::ports::ChatMessage;
    use crate::test_fixtures::spawn_stub_backend;

    #[derive(Clone, Default)]
    struct Captured {
        bodies: Arc<Mutex<Vec<Value>>>,
        keys: Arc<Mutex<Vec<String>>>,
    }

    async fn ok_handler(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        captured.bodies.lock().expect("lock").push(body);
        if let Some(key) = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) {
            captured.keys.lock().expect("lock").push(key.to_string());
        }
        Json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "{\"sceneDescription\":" }, { "text": "\"x\"}" }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 5,
                "totalTokenCount": 15
            }
        }))
    }

    fn sample_request() -> LlmRequest {
        LlmRequest::new(vec![
            ChatMessage::user("look around"),
            ChatMessage::assistant("The dormitory is dark."),
            ChatMessage::user("light my wand"),
        ])
        .with_system_prompt("You are a dungeon master.")
        .with_response_format(ResponseFormat::Json)
    }

    #[tokio::test]
    async fn sends_roles_system_instruction_and_json_mime_type() {
        let captured = Captured::default();
        let router = Router::new()
            .route("/v1beta/models/{action}", post(ok_handler))
            .with_state(captured.clone());
        let (base_url, _server) = spawn_stub_backend(router).await;

        let client = GeminiClient::with_timeout(&base_url, "gemini-test", "secret", 5);
        let response = client.generate(sample_request()).await.expect("stub replies");

        assert_eq!(response.content, "{\"sceneDescription\":\"x\"}");
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(15));

        let bodies = captured.bodies.lock().expect("lock").clone();
        assert_eq!(bodies.len(), 1);
        let body = &bodies[0];
        let roles: Vec<&str> = body["contents"]
            .as_array()
            .expect("contents array")
            .iter()
            .map(|c| c["role"].as_str().expect("role"))
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(body["contents"][2]["parts"][0]["text"], "light my wand");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are a dungeon master."
        );
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(*captured.keys.lock().expect("lock"), vec!["secret".to_string()]);
    }

    #[tokio::test]
    async fn http_error_is_request_failed() {
        let router = Router::new().route(
            "/v1beta/models/{action}",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        );
        let (base_url, _server) = spawn_stub_backend(router).await;

        let client = GeminiClient::with_timeout(&base_url, "gemini-test", "secret", 5);
        let err = client.generate(sample_request()).await.unwrap_err();

        match err {
            LlmError::RequestFailed(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("overloaded"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_request_failed() {
        // Port 9 (discard) is not listening on loopback in test environments.
        let client = GeminiClient::with_timeout("http://127.0.0.1:9", "gemini-test", "secret", 2);
        let err = client.generate(sample_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn blocked_prompt_is_invalid_response() {
        let router = Router::new().route(
            "/v1beta/models/{action}",
            post(|| async { Json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })) }),
        );
        let (base_url, _server) = spawn_stub_backend(router).await;

        let client = GeminiClient::with_timeout(&base_url, "gemini-test", "secret", 5);
        let err = client.generate(sample_request()).await.unwrap_err();

        match err {
            LlmError::InvalidResponse(msg) => assert!(msg.contains("SAFETY")),
            other => panic!("expected InvalidResponse, got {other:?}"),
        }
    }

    #[test]
    fn text_format_omits_generation_config() {
        let request = LlmRequest::new(vec![ChatMessage::user("hi")]);
        let body = serde_json::to_value(build_request(&request)).expect("serializable");
        assert!(body.get("generationConfig").is_none());
        assert!(body.get("systemInstruction").is_none());
    }
}
