//! LUIS v2 recognizer
//!
//! Queries a published LUIS application over its v2 prediction endpoint:
//! `https://{host}/luis/v2.0/apps/{app_id}?subscription-key=...&q=...`
//!
//! # Example
//!
//! ```no_run
//! use range_nlu::Recognizer;
//! use range_nlu::providers::{LuisConfig, LuisRecognizer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LuisConfig::new("app-id", "subscription-key").with_timeout(10);
//!     let recognizer = LuisRecognizer::with_config(config)?;
//!
//!     let recognition = recognizer.recognize("pick a number between 1 and 6").await?;
//!     println!("{:?} ({})", recognition.intent, recognition.score);
//!     Ok(())
//! }
//! ```

use crate::{NluError, Recognition, Recognizer, Result};
use async_trait::async_trait;
use range_core::Entity;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const DEFAULT_LUIS_HOST: &str = "westus.api.cognitive.microsoft.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const NUMBER_ENTITY: &str = "builtin.number";
const BOUNDARY_ENTITY: &str = "boundary";

/// Configuration for the LUIS recognizer
#[derive(Debug, Clone)]
pub struct LuisConfig {
    /// Published LUIS application id
    pub app_id: String,

    /// Subscription key for the prediction endpoint
    pub api_key: String,

    /// Endpoint host (default: "westus.api.cognitive.microsoft.com").
    /// A value with an explicit `http://` or `https://` scheme is used as is.
    pub host_name: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Ask for the scores of all intents, not only the top one
    pub verbose: bool,
}

impl LuisConfig {
    /// Create a new config with the given app id and key and default settings
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            host_name: DEFAULT_LUIS_HOST.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verbose: false,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads `LuisAppId`, `LuisAPIKey` and the optional `LuisAPIHostName`.
    /// The upper-snake forms `LUIS_APP_ID`, `LUIS_API_KEY` and
    /// `LUIS_API_HOST_NAME` are accepted as well.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |names: [&str; 2]| {
            names
                .into_iter()
                .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
        };

        let app_id = read(["LuisAppId", "LUIS_APP_ID"]).ok_or_else(|| {
            NluError::ConfigurationError("LuisAppId environment variable not set".to_string())
        })?;
        let api_key = read(["LuisAPIKey", "LUIS_API_KEY"]).ok_or_else(|| {
            NluError::ConfigurationError("LuisAPIKey environment variable not set".to_string())
        })?;

        let mut config = Self::new(app_id, api_key);
        if let Some(host) = read(["LuisAPIHostName", "LUIS_API_HOST_NAME"]) {
            config.host_name = host;
        }
        Ok(config)
    }

    /// Set the endpoint host
    pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = host_name.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Prediction endpoint for this application, without query parameters
    pub fn endpoint(&self) -> Result<Url> {
        let host = self.host_name.trim_end_matches('/');
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };

        Url::parse(&format!("{base}/luis/v2.0/apps/{}", self.app_id))
            .map_err(|e| NluError::ConfigurationError(format!("Invalid LUIS endpoint: {e}")))
    }
}

/// LUIS recognizer
pub struct LuisRecognizer {
    client: Client,
    config: LuisConfig,
}

impl LuisRecognizer {
    /// Create a recognizer from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(LuisConfig::from_env()?)
    }

    /// Create a recognizer with the given configuration
    pub fn with_config(config: LuisConfig) -> Result<Self> {
        // Fail fast on an unusable host or app id
        config.endpoint()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LuisConfig {
        &self.config
    }

    fn request_url(&self, utterance: &str) -> Result<Url> {
        let mut url = self.config.endpoint()?;
        url.query_pairs_mut()
            .append_pair("subscription-key", &self.config.api_key)
            .append_pair("verbose", if self.config.verbose { "true" } else { "false" })
            .append_pair("q", utterance);
        Ok(url)
    }
}

/// Map a non-success prediction status onto an error
fn status_error(status: StatusCode, body: String) -> NluError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NluError::AuthenticationFailed,
        StatusCode::TOO_MANY_REQUESTS => NluError::RateLimitExceeded(body),
        _ => NluError::RequestFailed(format!("HTTP {status}: {body}")),
    }
}

#[async_trait]
impl Recognizer for LuisRecognizer {
    #[instrument(skip(self, utterance), fields(app_id = %self.config.app_id))]
    async fn recognize(&self, utterance: &str) -> Result<Recognition> {
        debug!("Sending utterance to LUIS");

        let response = self.client.get(self.request_url(utterance)?).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(status_error(status, error_text));
        }

        let body = response.text().await?;
        let luis_response: LuisResponse = serde_json::from_str(&body).map_err(|e| {
            NluError::UnexpectedResponse(format!("Failed to parse LUIS response: {e}"))
        })?;

        let recognition = luis_response.into_recognition(utterance);
        debug!(
            intent = ?recognition.intent,
            score = recognition.score,
            entities = recognition.entities.len(),
            "Received LUIS prediction"
        );
        Ok(recognition)
    }

    fn name(&self) -> &'static str {
        "luis"
    }
}

// LUIS v2 wire types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisResponse {
    query: Option<String>,
    top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    intents: Vec<LuisIntent>,
    #[serde(default)]
    entities: Vec<LuisEntity>,
}

#[derive(Debug, Clone, Deserialize)]
struct LuisIntent {
    intent: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisEntity {
    entity: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    start_index: usize,
}

impl LuisResponse {
    fn into_recognition(self, utterance: &str) -> Recognition {
        let top = self.top_scoring_intent.or_else(|| {
            self.intents
                .into_iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
        });

        let mut entities = self.entities;
        entities.sort_by_key(|e| e.start_index);

        Recognition {
            query: self.query.unwrap_or_else(|| utterance.to_string()),
            score: top.as_ref().map_or(0.0, |i| i.score),
            intent: top.map(|i| i.intent),
            entities: entities.into_iter().filter_map(LuisEntity::into_entity).collect(),
        }
    }
}

impl LuisEntity {
    fn into_entity(self) -> Option<Entity> {
        match self.kind.as_str() {
            NUMBER_ENTITY => Some(Entity::number(self.entity)),
            BOUNDARY_ENTITY => Some(Entity::boundary(&self.entity)),
            other => {
                debug!("Ignoring LUIS entity of type {other}");
                None
            }
        }
    }
}
