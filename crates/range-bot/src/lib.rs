//! Conversational range bot
//!
//! This crate hosts the range dialog behind an external NLU service. It
//! includes:
//!
//! - `RangeBot`, which runs one turn: session load, classification, dispatch
//!   and session save
//! - Bot configuration (intent threshold, conversation start behavior, voice)
//! - A conversation session store with idle expiry
//! - `BotResponse`, the text and optional speech handed to the transport
//!
//! The range logic itself lives in `range-core`; classification lives in
//! `range-nlu`.

pub mod bot;
pub mod config;
pub mod error;
pub mod interface;

// Re-export main types for convenience
pub use bot::{Command, RangeBot};
pub use config::{BeginBehavior, BotConfig};
pub use error::{BotError, Result};
pub use interface::{BotResponse, ResponseType, SessionManager};
