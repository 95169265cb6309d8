//! Test fixtures and common test helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{llm_reply, turn_result_json};
//!
//! let mut llm = MockLlmPort::new();
//! llm.expect_generate().returning(|_| {
//!     Ok(llm_reply(&turn_result_json("You wait.", "Dormitory", "a room", false, None)))
//! });
//! ```

pub mod image_mocks;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::infrastructure::ports::{FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse};

// =============================================================================
// Model replies
// =============================================================================

/// A narrator reply in the JSON shape the system instruction asks for.
pub fn turn_result_json(
    scene: &str,
    location: &str,
    image_prompt: &str,
    game_over: bool,
    reason: Option<&str>,
) -> String {
    serde_json::json!({
        "sceneDescription": scene,
        "location": location,
        "promptForImage": image_prompt,
        "isGameOver": game_over,
        "gameOverReason": reason,
    })
    .to_string()
}

/// Wrap raw text as a completed LLM response.
pub fn llm_reply(content: &str) -> LlmResponse {
    LlmResponse {
        content: content.to_string(),
        finish_reason: FinishReason::Stop,
        usage: None,
    }
}

// =============================================================================
// Gated LLM
// =============================================================================

/// LLM double that blocks inside `generate` until released, so tests can act
/// while a turn is in flight.
pub struct GatedLlm {
    reply: String,
    called: Notify,
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedLlm {
    pub fn new(reply: String) -> Self {
        Self {
            reply,
            called: Notify::new(),
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Resolves once `generate` has been entered.
    pub async fn wait_until_called(&self) {
        self.called.notified().await;
    }

    /// Let the pending (or next) `generate` call return.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmPort for GatedLlm {
    async fn generate(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.called.notify_one();
        self.gate.notified().await;
        Ok(llm_reply(&self.reply))
    }
}

// =============================================================================
// Stub HTTP backends
// =============================================================================

/// Serve `router` on an ephemeral loopback port and return its base URL.
pub async fn spawn_stub_backend(
    router: axum::Router,
) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    (format!("http://{addr}"), handle)
}
