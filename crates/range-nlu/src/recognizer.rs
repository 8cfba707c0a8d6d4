//! Recognizer trait definition

use crate::{Recognition, Result};
use async_trait::async_trait;

/// Trait for NLU services that classify utterances
///
/// Implementations send the raw utterance to an external service and return
/// its top intent, score and entities. Thresholding is left to the caller.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Classify one utterance
    async fn recognize(&self, utterance: &str) -> Result<Recognition>;

    /// Get the recognizer name (e.g., "luis")
    fn name(&self) -> &str;
}
