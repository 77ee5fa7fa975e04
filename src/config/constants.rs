// Project-wide constants
//
// Environment variable names, default addresses and upstream endpoints live
// here so there is one source of truth. Import via `use crate::config::constants::*;`.

/// Credential for the Gemini generative-text API.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Optional Gemini model override.
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";

/// Optional Gemini API base URL override (used by tests and proxies).
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";

/// Base URL of the rule store (Supabase project URL).
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";

/// API key for the rule store.
pub const ENV_SUPABASE_KEY: &str = "SUPABASE_KEY";

/// Port assigned by the hosting platform. When set, the server binds
/// `0.0.0.0:$PORT`.
pub const ENV_PORT: &str = "PORT";

/// Default bind address for the HTTP server (all interfaces).
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8000";

/// Default generation model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";

/// Default Gemini REST API base.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Timeout for a single Gemini request.
pub const GEMINI_TIMEOUT_SECS: u64 = 60;

/// Timeout for the rule store lookup. Rules are optional, so this stays short.
pub const RULE_FETCH_TIMEOUT_SECS: u64 = 5;
