use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use crate::store::vendor::{VendorAction, VendorReducer, VendorState};
use crate::store::{Action, Reducer, SliceState};

/// Run a slice reducer on one field of the root state.
macro_rules! reduce_slice {
    ($state:expr, $field:ident, $reducer:ty, $action:expr) => {
        $state.$field = <$reducer>::reduce(std::mem::take(&mut $state.$field), $action)
    };
}

/// Whole application state, one field per slice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootState {
    pub vendor: VendorState,
}

impl SliceState for RootState {}

/// Actions routed to the slice that owns them.
#[derive(Debug, Clone)]
pub enum RootAction {
    Vendor(VendorAction),
}

impl Action for RootAction {}

impl From<VendorAction> for RootAction {
    fn from(action: VendorAction) -> Self {
        RootAction::Vendor(action)
    }
}

pub struct RootReducer;

impl Reducer for RootReducer {
    type State = RootState;
    type Action = RootAction;

    fn reduce(mut state: Self::State, action: Self::Action) -> Self::State {
        match action {
            RootAction::Vendor(action) => reduce_slice!(state, vendor, VendorReducer, action),
        }
        state
    }
}

pub type StoreListener = Arc<dyn Fn(&RootState) + Send + Sync>;

/// Single source of truth for cross-page state.
///
/// `dispatch` applies the reducer under the write lock, so readers only ever
/// see whole snapshots. Listeners run after the lock is released.
#[derive(Clone, Default)]
pub struct Store {
    state: Arc<RwLock<RootState>>,
    listeners: Arc<RwLock<Vec<StoreListener>>>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: RootState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            listeners: Arc::default(),
        }
    }

    pub fn dispatch(&self, action: impl Into<RootAction>) {
        let action = action.into();
        tracing::trace!(?action, "Dispatching action");
        let (snapshot, changed) = {
            let mut guard = self.state.write();
            let previous = std::mem::take(&mut *guard);
            let next = RootReducer::reduce(previous.clone(), action);
            let changed = next != previous;
            *guard = next;
            (guard.clone(), changed)
        };
        if changed {
            let listeners = self.listeners.read().clone();
            for listener in listeners {
                listener(&snapshot);
            }
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RootState {
        self.state.read().clone()
    }

    /// Read part of the state without cloning all of it.
    pub fn select<T>(&self, selector: impl FnOnce(&RootState) -> T) -> T {
        selector(&self.state.read())
    }

    /// Called with the new snapshot after every dispatch that changed state.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&RootState) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }
}
