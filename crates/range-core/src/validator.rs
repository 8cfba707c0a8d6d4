//! Range update validation
//!
//! A proposed `(lower, upper)` pair is accepted, swapped, or rejected
//! depending on how it was spoken. Two numbers in one utterance ("between 50
//! and 10") are forgiven and swapped. A single named boundary ("set the lower
//! limit to 200") is checked against the other, unchanged limit and rejected
//! if it would invert the range.

use crate::error::{RangeError, Result};
use crate::state::RangeState;
use tracing::debug;

/// How the proposed pair was derived from the utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalMode {
    /// Both values came from the utterance; out-of-order values are swapped
    Pair,
    /// Only the lower limit was named; the upper is the current one
    LowerOnly,
    /// Only the upper limit was named; the lower is the current one
    UpperOnly,
}

/// Decide the limits that a proposal would produce
///
/// `None` stands for a missing or unparseable limit.
pub fn check_range(
    current: &RangeState,
    lower: Option<i64>,
    upper: Option<i64>,
    mode: ProposalMode,
) -> Result<(i64, i64)> {
    let (Some(mut lower), Some(mut upper)) = (lower, upper) else {
        return Err(RangeError::InvalidLimit);
    };

    if mode == ProposalMode::Pair && upper < lower {
        debug!(lower, upper, "swapping out-of-order range limits");
        std::mem::swap(&mut lower, &mut upper);
    }

    if lower > upper {
        return Err(match mode {
            ProposalMode::UpperOnly => RangeError::UpperBelowLower {
                upper,
                lower: current.lower_limit,
            },
            // Pair mode can't reach here after the swap
            ProposalMode::LowerOnly | ProposalMode::Pair => RangeError::LowerAboveUpper {
                lower,
                upper: current.upper_limit,
            },
        });
    }

    Ok((lower, upper))
}

/// Apply a proposal to `current`, returning the resulting state and the reply
///
/// A rejected proposal returns `current` unchanged with the rejection message.
pub fn propose_range(
    current: &RangeState,
    lower: Option<i64>,
    upper: Option<i64>,
    mode: ProposalMode,
) -> (RangeState, String) {
    match check_range(current, lower, upper, mode) {
        Ok((lower, upper)) => (
            current.with_limits(lower, upper),
            format!("The range is now between {lower} and {upper}."),
        ),
        Err(err) => (*current, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pair_accepted() {
        let state = RangeState::default();
        let (next, message) = propose_range(&state, Some(10), Some(50), ProposalMode::Pair);
        assert_eq!((next.lower_limit, next.upper_limit), (10, 50));
        assert_eq!(message, "The range is now between 10 and 50.");
    }

    #[test]
    fn test_pair_swapped() {
        let state = RangeState::default();
        let (next, message) = propose_range(&state, Some(50), Some(10), ProposalMode::Pair);
        assert_eq!((next.lower_limit, next.upper_limit), (10, 50));
        assert_eq!(message, "The range is now between 10 and 50.");
    }

    #[test]
    fn test_equal_limits_accepted() {
        let state = RangeState::default();
        let (next, _) = propose_range(&state, Some(7), Some(7), ProposalMode::Pair);
        assert_eq!((next.lower_limit, next.upper_limit), (7, 7));
    }

    #[test]
    fn test_missing_limit_rejected() {
        let state = RangeState::new(10, 50);
        for (lower, upper) in [(None, Some(3)), (Some(3), None), (None, None)] {
            let (next, message) = propose_range(&state, lower, upper, ProposalMode::Pair);
            assert_eq!(next, state);
            assert_eq!(message, "That was not a valid range limit.");
        }
    }

    #[test]
    fn test_lower_only_out_of_order() {
        let state = RangeState::new(10, 50);
        let result = check_range(&state, Some(60), Some(50), ProposalMode::LowerOnly);
        assert_eq!(
            result,
            Err(RangeError::LowerAboveUpper {
                lower: 60,
                upper: 50
            })
        );

        let (next, message) = propose_range(&state, Some(60), Some(50), ProposalMode::LowerOnly);
        assert_eq!(next, state);
        assert!(message.contains("60"));
        assert!(message.contains("50"));
    }

    #[test]
    fn test_upper_only_out_of_order() {
        let state = RangeState::new(10, 50);
        let (next, message) = propose_range(&state, Some(10), Some(5), ProposalMode::UpperOnly);
        assert_eq!(next, state);
        assert_eq!(
            message,
            "The upper limit of 5 cannot be less than the lower limit of 10."
        );
    }

    #[test]
    fn test_single_boundary_accepted() {
        let state = RangeState::new(10, 50);
        let (next, message) = propose_range(&state, Some(20), Some(50), ProposalMode::LowerOnly);
        assert_eq!((next.lower_limit, next.upper_limit), (20, 50));
        assert_eq!(message, "The range is now between 20 and 50.");
    }

    proptest! {
        #[test]
        fn prop_pair_never_rejects_on_order(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            let state = RangeState::default();
            let (next, _) = propose_range(&state, Some(a), Some(b), ProposalMode::Pair);
            prop_assert_eq!(next.lower_limit, a.min(b));
            prop_assert_eq!(next.upper_limit, a.max(b));
        }

        #[test]
        fn prop_inverting_lower_is_rejected(upper in -1_000i64..1_000, excess in 1i64..1_000) {
            let state = RangeState::new(upper - 5, upper);
            let result = check_range(&state, Some(upper + excess), Some(upper), ProposalMode::LowerOnly);
            prop_assert!(result.as_ref().is_err_and(RangeError::is_out_of_order));

            let (next, _) = propose_range(&state, Some(upper + excess), Some(upper), ProposalMode::LowerOnly);
            prop_assert_eq!(next, state);
        }

        #[test]
        fn prop_accepted_state_is_ordered(a in any::<i64>(), b in any::<i64>()) {
            let state = RangeState::default();
            for mode in [ProposalMode::Pair, ProposalMode::LowerOnly, ProposalMode::UpperOnly] {
                let (next, _) = propose_range(&state, Some(a), Some(b), mode);
                prop_assert!(next.is_ordered());
            }
        }
    }
}
