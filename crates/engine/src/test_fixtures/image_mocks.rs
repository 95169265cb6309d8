//! Mock image generation for testing.
//!
//! Provides a placeholder image generator for tests when the image backend is
//! not available.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::image_mocks::PlaceholderImageGen;
//!
//! #[tokio::test]
//! async fn test_image_flow() {
//!     let gen = PlaceholderImageGen::new();
//!     let result = gen.generate(request).await.unwrap();
//!     assert!(!result.base64_data.is_empty());
//! }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::infrastructure::ports::{ImageGenError, ImageGenPort, ImageRequest, ImageResult};

/// Minimal 1x1 transparent PNG, base64-encoded.
pub const MINIMAL_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Mock image generator that always returns the minimal PNG and records the
/// prompts it was given.
pub struct PlaceholderImageGen {
    call_count: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl PlaceholderImageGen {
    pub fn new() -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Get the number of generate calls made.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("lock").clone()
    }
}

impl Default for PlaceholderImageGen {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenPort for PlaceholderImageGen {
    async fn generate(&self, request: ImageRequest) -> Result<ImageResult, ImageGenError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.prompts.lock().expect("lock").push(request.prompt);

        Ok(ImageResult {
            base64_data: MINIMAL_PNG_BASE64.to_string(),
            mime_type: "image/png".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_prompts_and_counts_calls() {
        let gen = PlaceholderImageGen::new();
        let request = ImageRequest {
            prompt: "a torch-lit corridor".to_string(),
            count: 1,
            mime_type: "image/jpeg".to_string(),
            aspect_ratio: "16:9".to_string(),
        };

        let result = gen.generate(request).await.expect("placeholder never fails");

        assert_eq!(result.base64_data, MINIMAL_PNG_BASE64);
        assert_eq!(gen.call_count(), 1);
        assert_eq!(gen.prompts(), vec!["a torch-lit corridor".to_string()]);
    }
}
