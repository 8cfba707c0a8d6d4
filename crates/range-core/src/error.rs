//! Error types for range-core
//!
//! None of these are fatal. Each one ends the current turn with a message to
//! the user, and the `Display` text of a [`RangeError`] is that message.

use thiserror::Error;

/// Result type alias for range-core
pub type Result<T> = std::result::Result<T, RangeError>;

/// A proposed range update or query that was turned down
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// A limit failed to parse, or the entity set was ambiguous
    #[error("That was not a valid range limit.")]
    InvalidLimit,

    /// A new lower limit would sit above the unchanged upper limit
    #[error("The lower limit of {lower} cannot be greater than the upper limit of {upper}.")]
    LowerAboveUpper { lower: i64, upper: i64 },

    /// A new upper limit would sit below the unchanged lower limit
    #[error("The upper limit of {upper} cannot be less than the lower limit of {lower}.")]
    UpperBelowLower { upper: i64, lower: i64 },

    /// A boundary label other than "lower" or "upper"
    #[error("I don't know what the boundary \"{0}\" is.")]
    UnknownBoundary(String),
}

impl RangeError {
    /// Whether this rejection came from an out-of-order single-boundary update
    pub fn is_out_of_order(&self) -> bool {
        matches!(
            self,
            RangeError::LowerAboveUpper { .. } | RangeError::UpperBelowLower { .. }
        )
    }
}

/// Explicit parse-failure signal from the entity normalizer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a number: {raw:?}")]
pub struct NotANumber {
    /// The raw entity text that failed to parse
    pub raw: String,
}

impl From<NotANumber> for RangeError {
    fn from(_: NotANumber) -> Self {
        RangeError::InvalidLimit
    }
}
