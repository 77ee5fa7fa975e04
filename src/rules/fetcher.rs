// Rule store client
//
// One GET against the PostgREST endpoint per call. Any failure is collapsed
// to "no rules" at the public boundary; `try_fetch_rules` keeps the reason.

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::Rule;
use crate::config::constants::RULE_FETCH_TIMEOUT_SECS;
use crate::config::{Config, RuleStoreConfig};

const RULES_PATH: &str = "/rest/v1/corporate_rules?select=rule_content";

/// Why a rule lookup produced nothing.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("rule store is not configured")]
    NotConfigured,

    #[error("rule store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rule store returned status {0}")]
    Status(StatusCode),

    #[error("rule store payload could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    rule_content: Rule,
}

/// Fetches governance rules from the configured store.
#[derive(Clone)]
pub struct RuleFetcher {
    client: Client,
    store: Option<RuleStoreConfig>,
}

impl RuleFetcher {
    /// Build a fetcher from the process configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_store(config.rule_store())
    }

    /// Build a fetcher for an explicit store (or none).
    pub fn with_store(store: Option<RuleStoreConfig>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(RULE_FETCH_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, store })
    }

    /// Whether a store is configured at all.
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// Fetch rules, returning an empty list on any failure.
    pub async fn fetch_rules(&self) -> Vec<Rule> {
        match self.try_fetch_rules().await {
            Ok(rules) => {
                tracing::debug!("Fetched {} rules", rules.len());
                rules
            }
            Err(FetchError::NotConfigured) => Vec::new(),
            Err(e) => {
                tracing::debug!("Continuing without rules: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch rules, reporting why nothing came back.
    pub async fn try_fetch_rules(&self) -> Result<Vec<Rule>, FetchError> {
        let store = self.store.as_ref().ok_or(FetchError::NotConfigured)?;
        let url = format!("{}{}", store.base_url.trim_end_matches('/'), RULES_PATH);

        let response = self
            .client
            .get(&url)
            .header("apikey", &store.api_key)
            .header("Authorization", format!("Bearer {}", store.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let rows: Vec<RuleRow> = serde_json::from_str(&body)?;
        Ok(rows.into_iter().map(|row| row.rule_content).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn store_for(url: &str) -> Option<RuleStoreConfig> {
        Some(RuleStoreConfig {
            base_url: url.to_string(),
            api_key: "anon-key".to_string(),
        })
    }

    #[tokio::test]
    async fn test_fetches_rules_in_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/corporate_rules")
            .match_query(Matcher::UrlEncoded("select".into(), "rule_content".into()))
            .match_header("apikey", "anon-key")
            .match_header("authorization", "Bearer anon-key")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"rule_content":"禁止低价倾销"},{"rule_content":"No bulk SMS"}]"#)
            .expect(1)
            .create_async()
            .await;

        let fetcher = RuleFetcher::with_store(store_for(&server.url())).unwrap();
        let rules = fetcher.fetch_rules().await;

        assert_eq!(rules, vec!["禁止低价倾销".to_string(), "No bulk SMS".to_string()]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/corporate_rules")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let fetcher = RuleFetcher::with_store(store_for(&format!("{}/", server.url()))).unwrap();
        assert_eq!(fetcher.try_fetch_rules().await.unwrap(), Vec::<Rule>::new());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_200_yields_empty() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/corporate_rules")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message":"Invalid API key"}"#)
            .expect(1)
            .create_async()
            .await;

        let fetcher = RuleFetcher::with_store(store_for(&server.url())).unwrap();
        assert!(matches!(
            fetcher.try_fetch_rules().await,
            Err(FetchError::Status(StatusCode::UNAUTHORIZED))
        ));
        assert!(fetcher.fetch_rules().await.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_other_2xx_is_not_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/v1/corporate_rules")
            .match_query(Matcher::Any)
            .with_status(206)
            .with_body(r#"[{"rule_content":"partial"}]"#)
            .create_async()
            .await;

        let fetcher = RuleFetcher::with_store(store_for(&server.url())).unwrap();
        assert!(fetcher.fetch_rules().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_yields_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/v1/corporate_rules")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"content":"wrong field"}]"#)
            .create_async()
            .await;

        let fetcher = RuleFetcher::with_store(store_for(&server.url())).unwrap();
        assert!(matches!(
            fetcher.try_fetch_rules().await,
            Err(FetchError::Parse(_))
        ));
        assert!(fetcher.fetch_rules().await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_yields_empty() {
        // Nothing listens on port 1.
        let fetcher = RuleFetcher::with_store(store_for("http://127.0.0.1:1")).unwrap();
        assert!(matches!(
            fetcher.try_fetch_rules().await,
            Err(FetchError::Transport(_))
        ));
        assert!(fetcher.fetch_rules().await.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_store_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        // URL present but key missing: still unconfigured.
        let config = Config {
            supabase_url: Some(server.url()),
            supabase_key: None,
            ..Default::default()
        };
        let fetcher = RuleFetcher::new(&config).unwrap();

        assert!(!fetcher.is_configured());
        assert!(matches!(
            fetcher.try_fetch_rules().await,
            Err(FetchError::NotConfigured)
        ));
        assert!(fetcher.fetch_rules().await.is_empty());
        mock.assert_async().await;
    }
}
