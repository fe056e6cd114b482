//! Unified error type for camtrap.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data, so
//! the type is `Copy` and can be logged from any task.

/// Top-level error type used across the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Collaborators
    /// The PIR sensor input could not be awaited.
    #[error("motion sensor unavailable")]
    MotionSensor,

    /// The camera did not take the picture.
    #[error("capture failed")]
    Capture,

    // File names
    /// The generated name does not fit its fixed-size buffer.
    #[error("file name too long")]
    FilenameOverflow,

    /// The wall clock is outside the representable calendar range.
    #[error("invalid timestamp")]
    InvalidTimestamp,
}

pub type Result<T> = core::result::Result<T, Error>;
