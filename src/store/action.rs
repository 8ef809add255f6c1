//! Base trait for store actions.

/// Marker trait for actions.
///
/// Actions describe something that happened:
/// - user input (navigation, selection)
/// - API results (vendors loaded, fetch failed)
///
/// Reducers turn them into new state.
pub trait Action: Send + 'static {}
