//! Classification results returned by a [`Recognizer`](crate::Recognizer)

use range_core::{Entity, Intent, Utterance};
use serde::{Deserialize, Serialize};

/// What the NLU service made of one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    /// The utterance text as classified
    pub query: String,

    /// Name of the top scoring intent, if the service returned one
    pub intent: Option<String>,

    /// Confidence of the top intent, 0.0 to 1.0
    pub score: f64,

    /// Entities the dispatcher cares about, in utterance order
    pub entities: Vec<Entity>,
}

impl Recognition {
    /// A recognition with no intent, as for an empty reply
    pub fn unrecognized(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            intent: None,
            score: 0.0,
            entities: Vec::new(),
        }
    }

    pub fn with_intent(mut self, name: impl Into<String>, score: f64) -> Self {
        self.intent = Some(name.into());
        self.score = score;
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Resolve the intent against `threshold`
    pub fn intent(&self, threshold: f64) -> Intent {
        Intent::classify(self.intent.as_deref(), self.score, threshold)
    }

    /// Build the dispatcher input, keeping the user's original text
    pub fn into_utterance(self, text: impl Into<String>, threshold: f64) -> Utterance {
        let intent = self.intent(threshold);
        Utterance::new(text, intent).with_entities(self.entities)
    }
}
