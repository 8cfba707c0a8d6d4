//! Concrete recognizer implementations
//!
//! This module contains implementations of the Recognizer trait for
//! external NLU services.

#[cfg(feature = "luis")]
pub mod luis;

#[cfg(feature = "luis")]
pub use luis::{LuisConfig, LuisRecognizer};
