//! Per-conversation range state

use serde::{Deserialize, Serialize};

/// Default inclusive lower limit for a new conversation
pub const DEFAULT_LOWER_LIMIT: i64 = 1;

/// Default inclusive upper limit for a new conversation
pub const DEFAULT_UPPER_LIMIT: i64 = 100;

/// The mutable record behind one conversation
///
/// Both limits are inclusive. After any accepted update
/// `lower_limit <= upper_limit` holds.
///
/// # Example
///
/// ```
/// use range_core::RangeState;
///
/// let state = RangeState::default();
/// assert_eq!(state.lower_limit, 1);
/// assert_eq!(state.upper_limit, 100);
/// assert!(state.last_random_number.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeState {
    pub lower_limit: i64,
    pub upper_limit: i64,
    pub last_random_number: Option<i64>,
}

impl Default for RangeState {
    fn default() -> Self {
        Self::new(DEFAULT_LOWER_LIMIT, DEFAULT_UPPER_LIMIT)
    }
}

impl RangeState {
    /// Create a state with the given limits and no random number yet
    pub fn new(lower_limit: i64, upper_limit: i64) -> Self {
        Self {
            lower_limit,
            upper_limit,
            last_random_number: None,
        }
    }

    /// Copy of this state with new limits, keeping the last random number
    pub fn with_limits(&self, lower_limit: i64, upper_limit: i64) -> Self {
        Self {
            lower_limit,
            upper_limit,
            ..*self
        }
    }

    /// Check whether `value` lies inside the inclusive range
    pub fn contains(&self, value: i64) -> bool {
        (self.lower_limit..=self.upper_limit).contains(&value)
    }

    pub fn is_ordered(&self) -> bool {
        self.lower_limit <= self.upper_limit
    }
}
