//! Range bot
//!
//! Ties the pieces together for one turn: load the conversation's session,
//! classify the utterance, dispatch it against the session's range, save the
//! session and hand back the replies.
//!
//! # Example
//!
//! ```rust,ignore
//! use range_bot::bot::RangeBot;
//! use range_bot::BotConfig;
//! use range_nlu::providers::LuisRecognizer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let recognizer = Arc::new(LuisRecognizer::from_env()?);
//!     let bot = RangeBot::new(recognizer, BotConfig::from_env()?)?;
//!
//!     for reply in bot.on_message("conversation-1", "roll a number").await? {
//!         println!("{}", reply.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;

use crate::config::BotConfig;
use crate::error::Result;
use crate::interface::{BotResponse, ConversationSession, SessionManager};
use range_core::{IntentDispatcher, RandomSource};
use range_nlu::Recognizer;
use std::sync::Arc;
use tracing::{debug, info};

pub use commands::Command;

/// Range bot
pub struct RangeBot {
    /// External NLU classifier
    recognizer: Arc<dyn Recognizer>,
    /// Intent handlers
    dispatcher: IntentDispatcher,
    /// Per-conversation state
    sessions: SessionManager,
    /// Bot configuration
    config: BotConfig,
}

impl RangeBot {
    /// Create a new bot with an in-memory session store
    ///
    /// The configuration is validated first, since its fields are public.
    pub fn new(recognizer: Arc<dyn Recognizer>, config: BotConfig) -> Result<Self> {
        config.validate()?;

        let dispatcher = IntentDispatcher::default().with_initial_range(
            config.default_range.lower_limit,
            config.default_range.upper_limit,
        );
        let sessions = SessionManager::new().with_ttl(config.session_ttl_secs);

        Ok(Self {
            recognizer,
            dispatcher,
            sessions,
            config,
        })
    }

    /// Replace the random source used for RandomNumber
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.dispatcher = IntentDispatcher::new(random).with_initial_range(
            self.config.default_range.lower_limit,
            self.config.default_range.upper_limit,
        );
        self
    }

    /// Replace the session manager
    pub fn with_sessions(mut self, sessions: SessionManager) -> Self {
        self.sessions = sessions.with_ttl(self.config.session_ttl_secs);
        self
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Handle one inbound utterance and return the replies in send order
    ///
    /// A conversation without a live session begins here, and beginning one
    /// also sweeps expired sessions out of the store. On error the session is
    /// left as it was before the turn.
    pub async fn on_message(&self, conversation_id: &str, text: &str) -> Result<Vec<BotResponse>> {
        let mut replies = Vec::new();

        let (mut session, begun) = match self.sessions.load(conversation_id)? {
            Some(session) => (session, false),
            None => {
                info!(conversation_id, "beginning conversation");
                let swept = self.sessions.cleanup_expired()?;
                if swept > 0 {
                    debug!(swept, "removed expired sessions");
                }
                let mut session =
                    ConversationSession::new(conversation_id, self.dispatcher.initial_state());
                let greeting = self.dispatcher.begin(&mut session.range);
                if self.config.begin.greets() {
                    replies.push(BotResponse::greeting(greeting));
                }
                (session, true)
            }
        };

        if !begun || self.config.begin.dispatches_first_utterance() {
            let recognition = self.recognizer.recognize(text).await?;
            let utterance = recognition.into_utterance(text, self.config.intent_threshold);
            debug!(conversation_id, intent = %utterance.intent, "classified utterance");

            replies.extend(
                self.dispatcher
                    .dispatch(&mut session.range, &utterance)
                    .into_iter()
                    .map(BotResponse::text),
            );
        } else {
            debug!(conversation_id, "first utterance consumed by greeting");
        }

        self.sessions.save(session)?;

        if self.config.voice {
            replies = replies.into_iter().map(BotResponse::spoken).collect();
        }
        Ok(replies)
    }

    /// End a conversation; the next utterance begins a new one
    pub fn end_conversation(&self, conversation_id: &str) -> Result<bool> {
        info!(conversation_id, "ending conversation");
        self.sessions.end(conversation_id)
    }
}
