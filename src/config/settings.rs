// Configuration structs

use super::constants::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_HTTP_ADDR};

/// Process configuration, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gemini client settings
    pub gemini: GeminiConfig,

    /// Rule store base URL (e.g. `https://xyz.supabase.co`)
    pub supabase_url: Option<String>,

    /// Rule store API key, sent both as `apikey` and as a bearer token
    pub supabase_key: Option<String>,

    /// HTTP server settings
    pub server: ServerConfig,
}

impl Config {
    /// Rule store settings, or `None` when either the URL or the key is missing.
    pub fn rule_store(&self) -> Option<RuleStoreConfig> {
        match (&self.supabase_url, &self.supabase_key) {
            (Some(url), Some(key)) => Some(RuleStoreConfig {
                base_url: url.clone(),
                api_key: key.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key. When absent the client still runs and upstream rejects each call.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Fully specified rule store connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStoreConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000")
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}
