//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, press thresholds, and phase timings
//! live here so they can be tuned in one place.

// Button

/// Holds at or below this are noise, not a press (ms).
pub const SHORT_PRESS_MS: u64 = 100;

/// Holds longer than this are long presses (ms). A hold of exactly this
/// length is still a short press.
pub const LONG_PRESS_MS: u64 = 1200;

// Phase timings (ms)

/// Start: calm yellow flash, one poll per cycle.
pub const START_FLASH_ON_MS: u32 = 600;
pub const START_FLASH_OFF_MS: u32 = 400;

/// Warm: quicker yellow flash, 10 cycles = 5 s to get out of the way.
pub const WARM_FLASH_ON_MS: u32 = 250;
pub const WARM_FLASH_OFF_MS: u32 = 250;
pub const WARM_CYCLES: u32 = 10;

/// Snap: blue flash after the picture, 19 cycles ~ 9.5 s.
pub const SNAP_FLASH_ON_MS: u32 = 150;
pub const SNAP_FLASH_OFF_MS: u32 = 350;
pub const SNAP_CYCLES: u32 = 19;

/// Outputs are held off this long at power-up before the first phase.
pub const STARTUP_SETTLE_MS: u32 = 1000;

/// Pause before restarting from Start after an unhandled state/message pair.
pub const UNHANDLED_PAUSE_MS: u32 = 2000;

// Camera

/// Width of the pulse on the camera's shutter trigger line (ms).
pub const SHUTTER_PULSE_MS: u32 = 100;

/// Extension appended to generated image file names.
pub const IMAGE_EXTENSION: &str = "jpg";

// Clock

/// Wall-clock time at power-up (Unix seconds, UTC).
///
/// The board has no battery-backed RTC, so file names count forward from
/// here. 1_767_225_600 = 2026-01-01 00:00:00 UTC.
pub const BOOT_EPOCH_SECS: i64 = 1_767_225_600;

// GPIO pin assignments (nRF52840-DK header)
//
// The concrete `embassy_nrf::peripherals::*` pins are picked in
// `main.rs`.  Adjust for your own wiring.
//
//   Button (active-low)    → P0.11  (DK BUTTON1)
//   PIR (active-high)      → P0.02
//   LED red                → P0.03
//   LED yellow             → P0.04
//   LED blue               → P0.28
//   Shutter trigger        → P0.29

/// On/off times of one indicator flash; one flash is also one poll interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashTiming {
    pub on_ms: u32,
    pub off_ms: u32,
}

impl FlashTiming {
    pub const fn new(on_ms: u32, off_ms: u32) -> Self {
        Self { on_ms, off_ms }
    }
}

/// Runtime copy of the phase timings.
///
/// `Default` takes the constants above; tests and other boards can build
/// their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timings {
    pub start_flash: FlashTiming,
    pub warm_flash: FlashTiming,
    pub warm_cycles: u32,
    pub snap_flash: FlashTiming,
    pub snap_cycles: u32,
    pub startup_settle_ms: u32,
    pub unhandled_pause_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            start_flash: FlashTiming::new(START_FLASH_ON_MS, START_FLASH_OFF_MS),
            warm_flash: FlashTiming::new(WARM_FLASH_ON_MS, WARM_FLASH_OFF_MS),
            warm_cycles: WARM_CYCLES,
            snap_flash: FlashTiming::new(SNAP_FLASH_ON_MS, SNAP_FLASH_OFF_MS),
            snap_cycles: SNAP_CYCLES,
            startup_settle_ms: STARTUP_SETTLE_MS,
            unhandled_pause_ms: UNHANDLED_PAUSE_MS,
        }
    }
}
