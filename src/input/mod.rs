//! Touch input

mod multi_tap;

pub use multi_tap::{MultiTap, MultiTapHandler, TapState, MULTI_TAP_THRESHOLD_MS};
