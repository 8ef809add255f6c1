//! Client-side store with reducer-based slices.
//!
//! ```text
//! Action ──→ Store::dispatch ──→ RootReducer ──→ slice reducers
//!    ↑                                              │
//!    └──── views read snapshots ←── RootState ←─────┘
//! ```
//!
//! - **SliceState**: immutable state of one domain
//! - **Action**: something that happened
//! - **Reducer**: pure function `(State, Action) -> State`
//!
//! A new domain adds a slice module, a field on [`RootState`] and a variant on
//! [`RootAction`]; existing slices stay untouched.

mod action;
mod reducer;
mod root;
mod state;
pub mod vendor;

pub use action::Action;
pub use reducer::Reducer;
pub use root::{RootAction, RootReducer, RootState, Store, StoreListener};
pub use state::SliceState;
