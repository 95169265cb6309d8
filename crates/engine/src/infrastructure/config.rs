//! Startup configuration read from the process environment.
//!
//! `main` loads `.env` with `dotenvy` before calling [`AppConfig::from_env`],
//! so either source works. The API credential is the only required value.

use crate::infrastructure::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::infrastructure::imagen::DEFAULT_IMAGEN_MODEL;

/// Primary credential variable.
pub const API_KEY_VAR: &str = "API_KEY";
/// Accepted when `API_KEY` is unset.
pub const FALLBACK_API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing credential: set {primary} (or {fallback}) in the environment or .env")]
    MissingCredential {
        primary: &'static str,
        fallback: &'static str,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR)
            .or_else(|| get(FALLBACK_API_KEY_VAR))
            .ok_or(ConfigError::MissingCredential {
                primary: API_KEY_VAR,
                fallback: FALLBACK_API_KEY_VAR,
            })?;

        Ok(Self {
            api_key,
            base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
            text_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            image_model: get("IMAGEN_MODEL").unwrap_or_else(|| DEFAULT_IMAGEN_MODEL.into()),
        })
    }
}
