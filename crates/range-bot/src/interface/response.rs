//! Outbound bot responses

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Type of bot response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Conversation-start greeting
    Greeting,

    /// Reply to an utterance
    Text,
}

/// One message handed to the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotResponse {
    /// Response content
    pub text: String,

    /// Spoken variant for voice-capable channels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speak: Option<String>,

    /// Response type
    pub response_type: ResponseType,
}

impl BotResponse {
    /// Create a simple text response
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speak: None,
            response_type: ResponseType::Text,
        }
    }

    /// Create a greeting response
    pub fn greeting(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Greeting,
            ..Self::text(text)
        }
    }

    /// Set the spoken variant
    pub fn with_speech(mut self, speak: impl Into<String>) -> Self {
        self.speak = Some(speak.into());
        self
    }

    /// Mirror the text into the spoken variant
    pub fn spoken(self) -> Self {
        let speak = self.text.clone();
        self.with_speech(speak)
    }

    /// Serialize as a single JSON line
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
