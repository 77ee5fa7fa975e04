// Configuration loader
// Reads credentials and endpoints from the process environment

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::constants::*;
use super::settings::{Config, GeminiConfig, ServerConfig};

/// Load configuration from the process environment.
///
/// A `.env` file in the working directory (or a parent) is applied first;
/// variables already set in the environment win. Missing settings never abort
/// startup: a missing Gemini key is logged and a missing rule store disables
/// rule fetching.
pub fn load_config() -> Result<Config> {
    load_env_file(None);
    load_config_from(|name| std::env::var(name).ok())
}

/// Apply a dotenv file to the process environment.
///
/// `None` searches for `.env` from the working directory upwards. A missing
/// file is silently ignored; an unreadable one is logged. Returns the path
/// that was loaded.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match result {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Ignoring unreadable .env file: {}", e);
            None
        }
    }
}

/// Load configuration through an arbitrary variable lookup.
///
/// Empty values are treated the same as unset ones.
pub fn load_config_from<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let api_key = get(ENV_GEMINI_API_KEY);
    if api_key.is_none() {
        tracing::warn!(
            "{} not set; generation requests will be rejected upstream",
            ENV_GEMINI_API_KEY
        );
    }

    let gemini = GeminiConfig {
        api_key,
        model: get(ENV_GEMINI_MODEL).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        base_url: get(ENV_GEMINI_BASE_URL)
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
    };

    let server = match get(ENV_PORT) {
        Some(port) => {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {} value '{}': {}", ENV_PORT, port, e))?;
            ServerConfig {
                bind_address: format!("0.0.0.0:{}", port),
            }
        }
        None => ServerConfig::default(),
    };

    let config = Config {
        gemini,
        supabase_url: get(ENV_SUPABASE_URL),
        supabase_key: get(ENV_SUPABASE_KEY),
        server,
    };

    if config.rule_store().is_none() {
        tracing::info!(
            "{} / {} not set; rule fetching disabled",
            ENV_SUPABASE_URL,
            ENV_SUPABASE_KEY
        );
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_config_from(|name| env.get(name).cloned())
    }

    #[test]
    fn test_empty_environment_still_loads() {
        let config = load(&[]).unwrap();
        assert!(config.gemini.api_key.is_none());
        assert!(config.rule_store().is_none());
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.server.bind_address, DEFAULT_HTTP_ADDR);
    }

    #[test]
    fn test_reads_all_settings() {
        let config = load(&[
            ("GEMINI_API_KEY", "g-key"),
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "s-key"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("PORT", "10000"),
        ])
        .unwrap();

        assert_eq!(config.gemini.api_key.as_deref(), Some("g-key"));
        assert_eq!(config.gemini.model, "gemini-pro");
        assert_eq!(config.server.bind_address, "0.0.0.0:10000");
        let store = config.rule_store().unwrap();
        assert_eq!(store.base_url, "https://abc.supabase.co");
        assert_eq!(store.api_key, "s-key");
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let config = load(&[
            ("GEMINI_API_KEY", ""),
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "  "),
        ])
        .unwrap();
        assert!(config.gemini.api_key.is_none());
        assert!(config.rule_store().is_none());
    }

    #[test]
    fn test_env_file_populates_process_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "SARA_TEST_DOTENV_KEY=from-file\n").unwrap();

        assert_eq!(load_env_file(Some(&path)), Some(path.clone()));
        assert_eq!(
            std::env::var("SARA_TEST_DOTENV_KEY").as_deref(),
            Ok("from-file")
        );
    }

    #[test]
    fn test_missing_env_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_env_file(Some(&dir.path().join(".env"))), None);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
