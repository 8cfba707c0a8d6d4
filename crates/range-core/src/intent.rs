//! Intents understood by the dispatcher

use serde::{Deserialize, Serialize};
use std::fmt;

/// Threshold below which a classification falls back to [`Intent::None`]
pub const DEFAULT_INTENT_THRESHOLD: f64 = 0.1;

/// A classified user request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// "Give me a random number", optionally with a new range
    RandomNumber,
    /// "What is the upper limit?"
    RangeQuery,
    /// "Set the range to 5 through 10"
    SetRange,
    /// Nothing matched above the threshold
    None,
}

impl Intent {
    /// Look up an intent by its NLU model name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "RandomNumber" => Some(Intent::RandomNumber),
            "RangeQuery" => Some(Intent::RangeQuery),
            "SetRange" => Some(Intent::SetRange),
            "None" => Some(Intent::None),
            _ => None,
        }
    }

    /// Resolve an NLU classification against a score threshold
    ///
    /// Unknown names and scores under `threshold` resolve to `Intent::None`.
    pub fn classify(name: Option<&str>, score: f64, threshold: f64) -> Self {
        match name.and_then(Self::from_name) {
            Some(intent) if score >= threshold => intent,
            _ => Intent::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::RandomNumber => "RandomNumber",
            Intent::RangeQuery => "RangeQuery",
            Intent::SetRange => "SetRange",
            Intent::None => "None",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
