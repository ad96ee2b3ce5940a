//! Seven/fourteen-segment LED watch face engine
//!
//! Computes layouts, ghost segments and per-tick frames for a digital watch
//! face. The host platform delivers lifecycle callbacks, taps and timer
//! wake-ups to [`LedWatchFace`] and paints the [`ui::Frame`]s it returns.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        #[allow(unused_imports)]
        pub(crate) use log::{debug, error, info, trace, warn};
    } else if #[cfg(feature = "defmt")] {
        #[allow(unused_imports)]
        pub(crate) use defmt::{debug, error, info, trace, warn};
    } else {
        macro_rules! trace {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! info {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! warn {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! error {
            ($($arg:tt)*) => {{}};
        }
        #[allow(unused_imports)]
        pub(crate) use {debug, error, info, trace, warn};
    }
}

pub mod color;
pub mod error;
pub mod input;
#[cfg(feature = "embassy")]
pub mod runtime;
pub mod system;
pub mod theme;
pub mod ui;

mod watchface;

pub use error::{Error, Result};
pub use watchface::{LedWatchFace, Region};
