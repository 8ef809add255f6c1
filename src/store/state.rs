/// Marker trait for slice state.
///
/// State is replaced, never mutated in place, so it must be `Clone`;
/// `PartialEq` lets observers skip redraws and `Default` is the initial value.
pub trait SliceState: Clone + PartialEq + Default + Send + Sync + 'static {}
