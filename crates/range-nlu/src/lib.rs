//! Intent recognition layer for range-bot
//!
//! This crate is the boundary between the bot and the external NLU service.
//! It includes:
//!
//! - The [`Recognizer`] trait an NLU client implements
//! - The [`Recognition`] result (intent, score, entities)
//! - A LUIS v2 provider (behind the `luis` feature, on by default)

pub mod error;
pub mod recognition;
pub mod recognizer;

// Re-export main types
pub use error::{NluError, Result};
pub use recognition::Recognition;
pub use recognizer::Recognizer;

// Provider implementations (feature-gated)
#[cfg(feature = "luis")]
pub mod providers;
