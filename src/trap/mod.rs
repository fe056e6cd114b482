//! The camera-trap state machine.
//!
//! ```text
//!                  Start <---------- Snap (blue flash)
//!            (slow yellow)   Long     |^
//!                  |                  ||
//!                  | Short     motion || Null
//!                  v                  v|
//!                Warm -------------> Ready (solid red)
//!          (fast yellow)   Null
//!
//!   Long from any phase goes back to Start.
//! ```
//!
//! The controller holds `(state, message)`, looks the pair up in
//! [`transition`], and runs the phase it names. Each phase returns the
//! state it completed and the message that drives the next lookup.

pub mod controller;
mod phases;

pub use controller::{Controller, Devices};

use crate::ui::{Message, Pattern};

/// Operating phase of the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Disarmed, waiting for the operator.
    Start,
    /// Grace period before arming.
    Warm,
    /// Armed, waiting for motion.
    Ready,
    /// Taking a picture.
    Snap,
}

impl State {
    pub const ALL: [State; 4] = [State::Start, State::Warm, State::Ready, State::Snap];

    /// First pattern shown when the phase is entered.
    pub const fn entry_pattern(self) -> Pattern {
        match self {
            State::Start | State::Warm => Pattern::YELLOW,
            State::Ready => Pattern::RED,
            State::Snap => Pattern::BLUE,
        }
    }
}

/// What a phase reports back to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseOutcome {
    pub completed: State,
    pub message: Message,
}

impl PhaseOutcome {
    pub const fn new(completed: State, message: Message) -> Self {
        Self { completed, message }
    }
}

/// The transition table: which phase to run next for `(state, message)`.
///
/// `None` is an unhandled pair; the controller pauses and restarts from
/// Start.
pub const fn transition(state: State, message: Message) -> Option<State> {
    match (state, message) {
        (State::Start, Message::Start) => Some(State::Start),
        (State::Start, Message::ShortPress) => Some(State::Warm),
        (State::Start, Message::LongPress) => Some(State::Start),
        (State::Warm, Message::Null) => Some(State::Ready),
        (State::Warm, Message::ShortPress) => Some(State::Start),
        (State::Warm, Message::LongPress) => Some(State::Start),
        (State::Ready, Message::ShortPress) => Some(State::Snap),
        (State::Ready, Message::LongPress) => Some(State::Start),
        (State::Snap, Message::LongPress) => Some(State::Start),
        (State::Snap, Message::Null) => Some(State::Ready),
        _ => None,
    }
}
