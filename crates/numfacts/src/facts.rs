use crate::prelude::{eyre, Error, Result};
use serde::{Deserialize, Serialize};

/// Numbers API configuration from environment variables
#[derive(Debug, Clone)]
pub struct FactsConfig {
    pub base_url: String,
    pub timeout: u64,
}

impl FactsConfig {
    /// Default public Numbers API base URL
    pub const DEFAULT_BASE_URL: &'static str = "http://numbersapi.com";

    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT: u64 = 10;

    /// Load configuration from environment variables
    /// Uses NUMBERS_API_BASE_URL with the public API as fallback
    /// Uses NUMBERS_API_TIMEOUT (seconds) with a 10 second fallback
    pub fn from_env() -> Self {
        let base_url = std::env::var("NUMBERS_API_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("NUMBERS_API_TIMEOUT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT);

        Self { base_url, timeout }
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }
}

/// Trivia fact payload from the Numbers API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NumbersApiFact {
    pub text: String,
    pub number: Option<f64>,
    pub found: Option<bool>,
    #[serde(rename = "type")]
    pub fact_type: Option<String>,
}

/// Create an HTTP client carrying the configured request timeout.
///
/// Every outbound call shares the deadline; no enrichment lookup waits
/// unbounded.
pub fn create_client(config: &FactsConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout))
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Fetch a trivia fact for `number` from the Numbers API.
///
/// Queries `GET <base>/<number>?json` and extracts the free-text fact field.
/// Timeouts, network errors, non-2xx statuses, and malformed payloads each
/// map to their own [`Error`] variant.
pub async fn fetch_fun_fact(
    client: &reqwest::Client,
    config: &FactsConfig,
    number: i64,
) -> std::result::Result<String, Error> {
    let url = format!("{}/{number}?json", config.base_url);

    let response = client.get(&url).send().await.map_err(|e| {
        if e.is_timeout() {
            Error::Timeout(config.timeout)
        } else {
            Error::Network(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(Error::Status(response.status().as_u16()));
    }

    let fact: NumbersApiFact = response
        .json()
        .await
        .map_err(|e| Error::MalformedFact(e.to_string()))?;

    Ok(fact.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_config(base_url: String) -> FactsConfig {
        FactsConfig {
            base_url,
            timeout: 5,
        }
    }

    #[test]
    fn test_fact_deserialization() {
        let raw = r#"{"text":"28 is a perfect number.","number":28,"found":true,"type":"trivia"}"#;

        let fact: NumbersApiFact = serde_json::from_str(raw).unwrap();

        assert_eq!(fact.text, "28 is a perfect number.");
        assert_eq!(fact.number, Some(28.0));
        assert_eq!(fact.found, Some(true));
        assert_eq!(fact.fact_type.as_deref(), Some("trivia"));
    }

    #[test]
    fn test_fact_deserialization_text_only() {
        let fact: NumbersApiFact = serde_json::from_str(r#"{"text":"42 is the answer."}"#).unwrap();

        assert_eq!(fact.text, "42 is the answer.");
        assert_eq!(fact.number, None);
    }

    #[test]
    fn test_config_overrides() {
        let config = test_config("http://example.com".to_string())
            .with_overrides(Some("http://override.test".to_string()));
        assert_eq!(config.base_url, "http://override.test");

        let config = test_config("http://example.com".to_string()).with_overrides(None);
        assert_eq!(config.base_url, "http://example.com");
    }

    #[tokio::test]
    async fn test_fetch_fun_fact_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/28");
            then.status(200).json_body(serde_json::json!({
                "text": "28 is a perfect number.",
                "number": 28,
                "found": true,
                "type": "trivia"
            }));
        });

        let config = test_config(server.base_url());
        let client = create_client(&config).unwrap();

        let fact = fetch_fun_fact(&client, &config, 28).await.unwrap();

        mock.assert();
        assert_eq!(fact, "28 is a perfect number.");
    }

    #[tokio::test]
    async fn test_fetch_fun_fact_negative_number_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/-7");
            then.status(200)
                .json_body(serde_json::json!({ "text": "-7 is a boring number." }));
        });

        let config = test_config(server.base_url());
        let client = create_client(&config).unwrap();

        let fact = fetch_fun_fact(&client, &config, -7).await.unwrap();

        mock.assert();
        assert_eq!(fact, "-7 is a boring number.");
    }

    #[tokio::test]
    async fn test_fetch_fun_fact_bad_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/28");
            then.status(503);
        });

        let config = test_config(server.base_url());
        let client = create_client(&config).unwrap();

        let err = fetch_fun_fact(&client, &config, 28).await.unwrap_err();

        assert!(matches!(err, Error::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_fun_fact_malformed_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/28");
            then.status(200).body("not json at all");
        });

        let config = test_config(server.base_url());
        let client = create_client(&config).unwrap();

        let err = fetch_fun_fact(&client, &config, 28).await.unwrap_err();

        assert!(matches!(err, Error::MalformedFact(_)));
    }

    #[tokio::test]
    async fn test_fetch_fun_fact_connection_refused() {
        // Nothing listens on this port; the connect error maps to Network.
        let config = test_config("http://127.0.0.1:1".to_string());
        let client = create_client(&config).unwrap();

        let err = fetch_fun_fact(&client, &config, 28).await.unwrap_err();

        assert!(matches!(err, Error::Network(_)));
    }
}
