//! Range-state dialog logic for range-bot
//!
//! This crate holds everything the bot decides for itself once an utterance
//! has been classified: entity normalization, range validation, and dispatch
//! of the RandomNumber, RangeQuery and SetRange intents. It performs no I/O;
//! classification and transport live in `range-nlu` and `range-bot`.
//!
//! # Example
//!
//! ```
//! use range_core::{Entity, Intent, IntentDispatcher, RangeState, Utterance};
//!
//! let dispatcher = IntentDispatcher::default();
//! let mut state = RangeState::default();
//!
//! let utterance = Utterance::new("between 50 and 10", Intent::SetRange)
//!     .with_entities([Entity::number("50"), Entity::number("10")]);
//! let replies = dispatcher.dispatch(&mut state, &utterance);
//!
//! assert_eq!(replies, vec!["The range is now between 10 and 50."]);
//! assert_eq!((state.lower_limit, state.upper_limit), (10, 50));
//! ```

pub mod dispatcher;
pub mod entity;
pub mod error;
pub mod intent;
pub mod limits;
pub mod random;
pub mod state;
pub mod validator;

pub use dispatcher::{IntentDispatcher, Utterance};
pub use entity::{Boundary, Entity, normalize_number};
pub use error::{NotANumber, RangeError, Result};
pub use intent::{DEFAULT_INTENT_THRESHOLD, Intent};
pub use limits::set_limits;
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use state::RangeState;
pub use validator::{ProposalMode, check_range, propose_range};
