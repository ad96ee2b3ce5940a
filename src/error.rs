//! Error types

use thiserror::Error;

/// Errors reported by the collaborators the face talks to.
///
/// None of these ever abort a frame: callers log them and fall back to
/// defaults, a system typeface or a placeholder string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The preference store rejected a read or write.
    #[error("preference store failure")]
    Storage,
    /// A font asset could not be loaded.
    #[error("font asset unavailable")]
    FontUnavailable,
    /// A persisted preference value did not name a known mode or color.
    #[error("invalid preference value")]
    InvalidPreference,
    /// The surface has no usable area.
    #[error("invalid display geometry")]
    InvalidGeometry,
}

pub type Result<T> = core::result::Result<T, Error>;
