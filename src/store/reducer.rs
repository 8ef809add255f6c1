use super::action::Action;
use super::state::SliceState;

/// Pure state transition: `(State, Action) -> State`.
///
/// Reducers are the only place where state changes.
pub trait Reducer {
    type State: SliceState;
    type Action: Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
