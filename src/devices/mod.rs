//! External collaborators the controller drives.
//!
//! The controller only sees these traits; the adapters in this module
//! are the thin layer between them and real pins:
//!
//! - [`Pir`] - PIR motion sensor on a GPIO input
//! - [`ShutterRelease`] - camera triggered by a pulse on its shutter line
//! - [`filename`] - `YYYY-MM-DD_HH.MM.SS.jpg` names for each capture

pub mod camera;
pub mod filename;
pub mod pir;

pub use camera::ShutterRelease;
pub use pir::Pir;

use crate::error::Result;

/// Blocks until motion is seen. No timeout and no cancellation.
#[allow(async_fn_in_trait)]
pub trait MotionSensor {
    async fn wait_for_motion(&mut self) -> Result<()>;
}

/// Takes one picture, stored under `filename`. Not cancellable.
#[allow(async_fn_in_trait)]
pub trait Camera {
    async fn capture(&mut self, filename: &str) -> Result<()>;
}

/// Time sources for press timing and file names.
pub trait Clock {
    /// Monotonic milliseconds since boot.
    fn uptime_ms(&self) -> u64;

    /// Wall-clock time, Unix seconds (UTC).
    fn unix_secs(&self) -> i64;
}
