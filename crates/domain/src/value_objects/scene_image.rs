//! Encoded scene illustration.

use serde::{Deserialize, Serialize};

/// An illustration returned by the image backend, kept in its transport
/// encoding (base64) so it can be handed to a renderer as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneImage {
    mime_type: String,
    base64_data: String,
}

impl SceneImage {
    pub fn new(mime_type: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64_data: base64_data.into(),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn base64_data(&self) -> &str {
        &self.base64_data
    }

    /// `data:<mime>;base64,<payload>`, ready for an `<img src>` or similar.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }

    /// Decoded size estimate in bytes, without decoding the payload.
    pub fn approx_byte_len(&self) -> usize {
        let padding = self
            .base64_data
            .bytes()
            .rev()
            .take_while(|b| *b == b'=')
            .count();
        (self.base64_data.len() / 4 * 3).saturating_sub(padding)
    }
}
