//! Configuration for the range bot

use crate::error::{BotError, Result};
use range_core::{DEFAULT_INTENT_THRESHOLD, RangeState};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What happens on the first utterance of a new conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeginBehavior {
    /// Send the greeting; the first utterance is not dispatched
    #[default]
    Greet,
    /// Send the greeting, then dispatch the first utterance as usual
    GreetAndContinue,
    /// No greeting; dispatch the first utterance as usual
    Silent,
}

impl BeginBehavior {
    pub fn greets(self) -> bool {
        !matches!(self, BeginBehavior::Silent)
    }

    pub fn dispatches_first_utterance(self) -> bool {
        !matches!(self, BeginBehavior::Greet)
    }
}

impl FromStr for BeginBehavior {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "greet" => Ok(BeginBehavior::Greet),
            "greet-and-continue" | "continue" => Ok(BeginBehavior::GreetAndContinue),
            "silent" => Ok(BeginBehavior::Silent),
            other => Err(BotError::Config(format!("Unknown begin behavior: {other}"))),
        }
    }
}

/// Configuration for the range bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Minimum NLU score for an intent to be dispatched
    pub intent_threshold: f64,

    /// Conversation start behavior
    pub begin: BeginBehavior,

    /// Mirror every reply into the speech variant for voice channels
    pub voice: bool,

    /// Idle seconds after which a conversation starts over
    pub session_ttl_secs: i64,

    /// Range a new conversation starts with
    pub default_range: RangeState,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            intent_threshold: DEFAULT_INTENT_THRESHOLD,
            begin: BeginBehavior::Greet,
            voice: false,
            session_ttl_secs: 3600,
            default_range: RangeState::default(),
        }
    }
}

impl BotConfig {
    /// Create a new configuration builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads `RANGE_BOT_BEGIN`, `RANGE_BOT_VOICE` and
    /// `RANGE_BOT_INTENT_THRESHOLD`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(begin) = lookup("RANGE_BOT_BEGIN") {
            builder = builder.begin(begin.parse()?);
        }
        if let Some(voice) = lookup("RANGE_BOT_VOICE") {
            builder = builder.voice(matches!(
                voice.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ));
        }
        if let Some(threshold) = lookup("RANGE_BOT_INTENT_THRESHOLD") {
            let threshold = threshold.trim().parse::<f64>().map_err(|e| {
                BotError::Config(format!("Invalid RANGE_BOT_INTENT_THRESHOLD: {e}"))
            })?;
            builder = builder.intent_threshold(threshold);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.intent_threshold) {
            return Err(BotError::Config(
                "intent_threshold must be within [0, 1]".to_string(),
            ));
        }

        if !self.default_range.is_ordered() {
            return Err(BotError::Config(format!(
                "default range {}..={} is out of order",
                self.default_range.lower_limit, self.default_range.upper_limit
            )));
        }

        if self.session_ttl_secs <= 0 {
            return Err(BotError::Config(
                "session_ttl_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    intent_threshold: Option<f64>,
    begin: Option<BeginBehavior>,
    voice: Option<bool>,
    session_ttl_secs: Option<i64>,
    default_range: Option<RangeState>,
}

impl BotConfigBuilder {
    /// Set the intent score threshold
    pub fn intent_threshold(mut self, threshold: f64) -> Self {
        self.intent_threshold = Some(threshold);
        self
    }

    /// Set conversation start behavior
    pub fn begin(mut self, begin: BeginBehavior) -> Self {
        self.begin = Some(begin);
        self
    }

    /// Enable speech variants
    pub fn voice(mut self, voice: bool) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Set session idle timeout
    pub fn session_ttl_secs(mut self, ttl: i64) -> Self {
        self.session_ttl_secs = Some(ttl);
        self
    }

    /// Set the starting range for new conversations
    pub fn default_range(mut self, lower_limit: i64, upper_limit: i64) -> Self {
        self.default_range = Some(RangeState::new(lower_limit, upper_limit));
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BotConfig> {
        let defaults = BotConfig::default();

        let config = BotConfig {
            intent_threshold: self.intent_threshold.unwrap_or(defaults.intent_threshold),
            begin: self.begin.unwrap_or(defaults.begin),
            voice: self.voice.unwrap_or(defaults.voice),
            session_ttl_secs: self.session_ttl_secs.unwrap_or(defaults.session_ttl_secs),
            default_range: self.default_range.unwrap_or(defaults.default_range),
        };

        config.validate()?;
        Ok(config)
    }
}
