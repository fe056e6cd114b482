//! camtrap - motion-triggered camera trap controller.
//!
//! One button arms and disarms the trap, a PIR sensor triggers the
//! camera, and a red / yellow / blue LED shows which phase the device is
//! in. All behaviour lives in this library so it can be tested on the
//! host (no embedded hardware required); `main.rs` only wires the
//! nRF52840 pins and tasks to it.
//!
//! Usage: `cargo test` on the host,
//! `cargo run --release --features embedded --target thumbv7em-none-eabihf`
//! for the board.
//!
//! ## Layout
//!
//! - [`ui`] - button classification, pending-message slot, LED indicator
//! - [`devices`] - motion sensor, camera and clock collaborators
//! - [`trap`] - transition table, phase actions, controller loop
//! - [`config`] / [`error`] - constants and the crate error type

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
mod fmt;

pub mod config;
pub mod devices;
pub mod error;
pub mod trap;
pub mod ui;

pub use error::{Error, Result};
pub use trap::{transition, Controller, Devices, PhaseOutcome, State};
pub use ui::{Message, MessageSlot, Pattern};
