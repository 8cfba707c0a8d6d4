//! Intent dispatch over the per-conversation range state
//!
//! Every inbound utterance is one transition: the classified [`Intent`]
//! selects a handler, the handler reads or writes [`RangeState`], and the
//! replies for the turn are returned in the order they should be sent.

use crate::entity::{self, Boundary, Entity};
use crate::intent::Intent;
use crate::limits::set_limits;
use crate::random::{RandomSource, ThreadRandom, pick_in_range};
use crate::state::RangeState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A classified utterance, ready for dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Original text as the user sent it
    pub text: String,
    pub intent: Intent,
    pub entities: Vec<Entity>,
}

impl Utterance {
    pub fn new(text: impl Into<String>, intent: Intent) -> Self {
        Self {
            text: text.into(),
            intent,
            entities: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.entities.extend(entities);
        self
    }
}

/// Routes utterances to the range handlers
#[derive(Clone)]
pub struct IntentDispatcher {
    random: Arc<dyn RandomSource>,
    initial: RangeState,
}

impl Default for IntentDispatcher {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl std::fmt::Debug for IntentDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentDispatcher")
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

impl IntentDispatcher {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self {
            random,
            initial: RangeState::default(),
        }
    }

    /// Use a different starting range for new conversations
    ///
    /// An inverted pair is stored in order.
    pub fn with_initial_range(mut self, lower_limit: i64, upper_limit: i64) -> Self {
        self.initial = RangeState::new(lower_limit.min(upper_limit), lower_limit.max(upper_limit));
        self
    }

    /// The state a new conversation starts from
    pub fn initial_state(&self) -> RangeState {
        self.initial
    }

    /// Start a conversation: reset the state and return the greeting
    pub fn begin(&self, state: &mut RangeState) -> String {
        *state = self.initial;
        format!(
            "I can give you a random number between {} and {}.",
            state.lower_limit, state.upper_limit
        )
    }

    /// Handle one utterance against `state`
    pub fn dispatch(&self, state: &mut RangeState, utterance: &Utterance) -> Vec<String> {
        debug!(intent = %utterance.intent, entities = utterance.entities.len(), "dispatching");

        match utterance.intent {
            Intent::RandomNumber => self.random_number(state, &utterance.entities),
            Intent::RangeQuery => vec![range_query(state, &utterance.entities)],
            Intent::SetRange => vec![set_range(state, &utterance.entities)],
            Intent::None => vec![not_understood(&utterance.text)],
        }
    }

    fn random_number(&self, state: &mut RangeState, entities: &[Entity]) -> Vec<String> {
        let mut replies = Vec::new();

        let numbers = entity::numbers(entities);
        if !numbers.is_empty() {
            let (next, message) = set_limits(state, &numbers, None);
            *state = next;
            replies.push(message);
        }

        let value = pick_in_range(
            self.random.next_f64(),
            state.lower_limit,
            state.upper_limit,
        );
        state.last_random_number = Some(value);
        debug!(value, lower = state.lower_limit, upper = state.upper_limit, "drew random number");

        replies.push(value.to_string());
        replies
    }
}

fn range_query(state: &RangeState, entities: &[Entity]) -> String {
    match entity::first_boundary(entities) {
        Some(Boundary::Lower) => format!("The lower limit is {}.", state.lower_limit),
        Some(Boundary::Upper) => format!("The upper limit is {}.", state.upper_limit),
        Some(Boundary::Other(label)) => format!("I don't know what the boundary \"{label}\" is."),
        None => format!(
            "The range is between {} and {}.",
            state.lower_limit, state.upper_limit
        ),
    }
}

fn set_range(state: &mut RangeState, entities: &[Entity]) -> String {
    let numbers = entity::numbers(entities);
    let (next, message) = set_limits(state, &numbers, entity::first_boundary(entities));
    *state = next;
    message
}

fn not_understood(text: &str) -> String {
    format!("Sorry, I did not understand '{text}'.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, MockRandomSource};
    use proptest::prelude::*;

    fn fixed(r: f64) -> IntentDispatcher {
        IntentDispatcher::new(Arc::new(FixedRandom(r)))
    }

    fn set_range_utterance(numbers: &[&str], boundary: Option<&str>) -> Utterance {
        let mut utterance = Utterance::new("set the range", Intent::SetRange)
            .with_entities(numbers.iter().map(|n| Entity::number(*n)));
        if let Some(label) = boundary {
            utterance = utterance.with_entity(Entity::boundary(label));
        }
        utterance
    }

    #[test]
    fn test_begin_resets_and_greets() {
        let dispatcher = fixed(0.0);
        let mut state = RangeState::new(40, 45);
        state.last_random_number = Some(42);

        let greeting = dispatcher.begin(&mut state);
        assert_eq!(state, RangeState::default());
        assert_eq!(greeting, "I can give you a random number between 1 and 100.");
    }

    #[test]
    fn test_begin_custom_initial_range() {
        let dispatcher = fixed(0.0).with_initial_range(0, 9);
        let mut state = RangeState::default();
        let greeting = dispatcher.begin(&mut state);
        assert_eq!(state, RangeState::new(0, 9));
        assert!(greeting.contains("between 0 and 9"));
    }

    #[test]
    fn test_inverted_initial_range_is_ordered() {
        let dispatcher = fixed(1.0 - f64::EPSILON).with_initial_range(100, 1);
        assert_eq!(dispatcher.initial_state(), RangeState::new(1, 100));

        let mut state = RangeState::default();
        let greeting = dispatcher.begin(&mut state);
        assert!(greeting.contains("between 1 and 100"));

        let replies = dispatcher.dispatch(&mut state, &Utterance::new("roll", Intent::RandomNumber));
        assert_eq!(replies, vec!["100"]);
    }

    #[test]
    fn test_set_range_two_numbers() {
        let dispatcher = fixed(0.0);
        let mut state = RangeState::default();

        let replies = dispatcher.dispatch(&mut state, &set_range_utterance(&["50", "10"], None));
        assert_eq!(replies, vec!["The range is now between 10 and 50."]);
        assert_eq!((state.lower_limit, state.upper_limit), (10, 50));
    }

    #[test]
    fn test_set_range_single_lower_rejected() {
        let dispatcher = fixed(0.0);
        let mut state = RangeState::new(10, 50);

        let replies = dispatcher.dispatch(&mut state, &set_range_utterance(&["60"], Some("lower")));
        assert_eq!(state, RangeState::new(10, 50));
        assert_eq!(replies.len(), 1);
        assert!(replies[0].contains("60"));
        assert!(replies[0].contains("50"));
    }

    #[test]
    fn test_set_range_invalid_number() {
        let dispatcher = fixed(0.0);
        let mut state = RangeState::new(10, 50);

        let replies = dispatcher.dispatch(&mut state, &set_range_utterance(&["abc"], Some("upper")));
        assert_eq!(state, RangeState::new(10, 50));
        assert_eq!(replies, vec!["That was not a valid range limit."]);
    }

    #[test]
    fn test_range_query_variants() {
        let dispatcher = fixed(0.0);
        let mut state = RangeState::new(10, 50);

        let query = Utterance::new("what is the range", Intent::RangeQuery);
        assert_eq!(
            dispatcher.dispatch(&mut state, &query),
            vec!["The range is between 10 and 50."]
        );

        let lower = query.clone().with_entity(Entity::boundary("lower"));
        assert_eq!(
            dispatcher.dispatch(&mut state, &lower),
            vec!["The lower limit is 10."]
        );

        let upper = query.clone().with_entity(Entity::boundary("upper"));
        assert_eq!(
            dispatcher.dispatch(&mut state, &upper),
            vec!["The upper limit is 50."]
        );

        let other = query.with_entity(Entity::boundary("middle"));
        assert_eq!(
            dispatcher.dispatch(&mut state, &other),
            vec!["I don't know what the boundary \"middle\" is."]
        );
        assert_eq!(state, RangeState::new(10, 50));
    }

    #[test]
    fn test_query_after_set_reports_new_values() {
        let dispatcher = fixed(0.0);
        let mut state = RangeState::default();

        dispatcher.dispatch(&mut state, &set_range_utterance(&["300", "200"], None));
        let replies = dispatcher.dispatch(&mut state, &Utterance::new("range?", Intent::RangeQuery));
        assert_eq!(replies, vec!["The range is between 200 and 300."]);
    }

    #[test]
    fn test_default_echoes_text() {
        let dispatcher = fixed(0.0);
        let mut state = RangeState::default();

        let replies = dispatcher.dispatch(&mut state, &Utterance::new("xyzzy", Intent::None));
        assert_eq!(replies, vec!["Sorry, I did not understand 'xyzzy'."]);
        assert_eq!(state, RangeState::default());
    }

    #[test]
    fn test_random_number_hits_both_extremes() {
        let mut state = RangeState::new(10, 50);

        let low = fixed(0.0).dispatch(&mut state, &Utterance::new("roll", Intent::RandomNumber));
        assert_eq!(low, vec!["10"]);
        assert_eq!(state.last_random_number, Some(10));

        let high = fixed(1.0 - f64::EPSILON)
            .dispatch(&mut state, &Utterance::new("roll", Intent::RandomNumber));
        assert_eq!(high, vec!["50"]);
        assert_eq!(state.last_random_number, Some(50));
    }

    #[test]
    fn test_random_number_with_new_range() {
        let mut mock = MockRandomSource::new();
        mock.expect_next_f64().times(1).return_const(0.0);
        let dispatcher = IntentDispatcher::new(Arc::new(mock));
        let mut state = RangeState::default();

        let utterance = Utterance::new("random number between 20 and 5", Intent::RandomNumber)
            .with_entities([Entity::number("20"), Entity::number("5")]);
        let replies = dispatcher.dispatch(&mut state, &utterance);

        assert_eq!(replies, vec!["The range is now between 5 and 20.", "5"]);
        assert_eq!((state.lower_limit, state.upper_limit), (5, 20));
    }

    #[test]
    fn test_random_number_with_single_number_keeps_range() {
        let dispatcher = fixed(0.0);
        let mut state = RangeState::new(10, 50);

        let utterance = Utterance::new("random number up to 30", Intent::RandomNumber)
            .with_entity(Entity::number("30"));
        let replies = dispatcher.dispatch(&mut state, &utterance);

        assert_eq!(replies, vec!["That was not a valid range limit.", "10"]);
        assert_eq!((state.lower_limit, state.upper_limit), (10, 50));
    }

    proptest! {
        #[test]
        fn prop_random_number_within_range(
            a in -10_000i64..10_000,
            b in -10_000i64..10_000,
            r in 0.0f64..1.0,
        ) {
            let mut state = RangeState::new(a.min(b), a.max(b));
            let replies = fixed(r).dispatch(&mut state, &Utterance::new("roll", Intent::RandomNumber));

            let value = state.last_random_number.unwrap();
            prop_assert!(state.contains(value));
            prop_assert_eq!(replies, vec![value.to_string()]);
        }
    }
}
