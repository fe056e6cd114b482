//! Image file names from the wall clock: `YYYY-MM-DD_HH.MM.SS.<ext>` (UTC).

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Timelike};
use core::fmt::Write;
use heapless::String;

/// Room for the 19-character timestamp, the dot, and a short extension.
pub const FILENAME_CAPACITY: usize = 32;

pub type Filename = String<FILENAME_CAPACITY>;

/// Build the file name for a capture taken at `unix_secs`.
pub fn generate(unix_secs: i64, extension: &str) -> Result<Filename> {
    let stamp = DateTime::from_timestamp(unix_secs, 0).ok_or(Error::InvalidTimestamp)?;

    let mut name = Filename::new();
    write!(
        name,
        "{:04}-{:02}-{:02}_{:02}.{:02}.{:02}.{}",
        stamp.year(),
        stamp.month(),
        stamp.day(),
        stamp.hour(),
        stamp.minute(),
        stamp.second(),
        extension
    )
    .map_err(|_| Error::FilenameOverflow)?;

    Ok(name)
}
