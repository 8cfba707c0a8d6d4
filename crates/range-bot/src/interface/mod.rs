//! Bot-facing interfaces
//!
//! The outbound response type and the conversation session store

pub mod response;
pub mod session;

pub use response::{BotResponse, ResponseType};
pub use session::{ConversationSession, InMemoryStore, SessionManager, SessionStore};
