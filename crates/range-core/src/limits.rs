//! Reconciling extracted entities into a range proposal

use crate::entity::{Boundary, normalize_number};
use crate::error::RangeError;
use crate::state::RangeState;
use crate::validator::{ProposalMode, propose_range};
use tracing::warn;

/// Turn number entities and an optional boundary into a range update
///
/// Exactly one number with a named boundary updates that end and holds the
/// other. Exactly two numbers propose both ends (auto-swap applies). Any other
/// shape is ambiguous and rejected without guessing.
pub fn set_limits(
    state: &RangeState,
    numbers: &[&str],
    boundary: Option<&Boundary>,
) -> (RangeState, String) {
    match (numbers, boundary) {
        ([raw], Some(Boundary::Lower)) => {
            let limit = normalize_number(raw).ok();
            propose_range(state, limit, Some(state.upper_limit), ProposalMode::LowerOnly)
        }
        ([raw], Some(Boundary::Upper)) => {
            let limit = normalize_number(raw).ok();
            propose_range(state, Some(state.lower_limit), limit, ProposalMode::UpperOnly)
        }
        ([_], Some(Boundary::Other(label))) => {
            warn!(label = %label, "unknown boundary in range update");
            (*state, RangeError::UnknownBoundary(label.clone()).to_string())
        }
        ([first, second], _) => {
            let lower = normalize_number(first).ok();
            let upper = normalize_number(second).ok();
            propose_range(state, lower, upper, ProposalMode::Pair)
        }
        _ => {
            warn!(count = numbers.len(), "ambiguous number entities in range update");
            propose_range(state, None, None, ProposalMode::Pair)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVALID: &str = "That was not a valid range limit.";

    #[test]
    fn test_two_numbers_swap() {
        let state = RangeState::default();
        let (next, message) = set_limits(&state, &["50", "10"], None);
        assert_eq!((next.lower_limit, next.upper_limit), (10, 50));
        assert_eq!(message, "The range is now between 10 and 50.");
    }

    #[test]
    fn test_two_numbers_ignore_boundary() {
        let state = RangeState::default();
        let (next, _) = set_limits(&state, &["5", "one"], Some(&Boundary::Upper));
        assert_eq!((next.lower_limit, next.upper_limit), (1, 5));
    }

    #[test]
    fn test_single_lower_rejected_against_current_upper() {
        let state = RangeState::new(10, 50);
        let (next, message) = set_limits(&state, &["60"], Some(&Boundary::Lower));
        assert_eq!(next, state);
        assert_eq!(
            message,
            "The lower limit of 60 cannot be greater than the upper limit of 50."
        );
    }

    #[test]
    fn test_single_upper_accepted() {
        let state = RangeState::new(10, 50);
        let (next, message) = set_limits(&state, &["1,000"], Some(&Boundary::Upper));
        assert_eq!((next.lower_limit, next.upper_limit), (10, 1000));
        assert_eq!(message, "The range is now between 10 and 1000.");
    }

    #[test]
    fn test_single_unparseable() {
        let state = RangeState::new(10, 50);
        let (next, message) = set_limits(&state, &["abc"], Some(&Boundary::Lower));
        assert_eq!(next, state);
        assert_eq!(message, INVALID);
    }

    #[test]
    fn test_single_unknown_boundary() {
        let state = RangeState::new(10, 50);
        let boundary = Boundary::Other("middle".to_string());
        let (next, message) = set_limits(&state, &["20"], Some(&boundary));
        assert_eq!(next, state);
        assert_eq!(message, "I don't know what the boundary \"middle\" is.");
    }

    #[test]
    fn test_ambiguous_shapes_rejected() {
        let state = RangeState::new(10, 50);
        let cases: [(&[&str], Option<&Boundary>); 3] = [
            (&[], Some(&Boundary::Lower)),
            (&["20"], None),
            (&["1", "2", "3"], None),
        ];

        for (numbers, boundary) in cases {
            let (next, message) = set_limits(&state, numbers, boundary);
            assert_eq!(next, state);
            assert_eq!(message, INVALID);
        }
    }

    #[test]
    fn test_two_numbers_with_unparsable_value_rejected() {
        let state = RangeState::new(10, 50);
        let pairs: [&[&str]; 3] = [&["abc", "5"], &["5", "1.5"], &["five", "six"]];

        for numbers in pairs {
            let (next, message) = set_limits(&state, numbers, None);
            assert_eq!(next, state);
            assert_eq!(message, INVALID);
        }
    }
}
