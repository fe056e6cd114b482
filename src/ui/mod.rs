//! User interface subsystem - one push button in, three LEDs out.
//!
//! ## Components
//!
//! - **Buttons**: the single tactile switch, watched by its own task
//! - **Input logic**: hold-time classification into [`Message`]s
//! - **Slot**: the one-message rendezvous between button task and controller
//! - **Indicator**: red / yellow / blue LEDs showing the current phase

pub mod buttons;
pub mod indicator;
pub mod input_logic;
pub mod slot;

pub use buttons::ButtonWatcher;
pub use indicator::{flash, Indicate, Indicator, Pattern};
pub use input_logic::{classify, PressClassifier, PressThresholds};
pub use slot::MessageSlot;

/// Event that drives a state transition.
///
/// "No message" is represented by an empty [`MessageSlot`], not by a
/// variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    /// Bootstrap event that (re)enters the Start phase.
    Start,
    /// Button held longer than the noise threshold, up to the long-press threshold.
    ShortPress,
    /// Button held past the long-press threshold.
    LongPress,
    /// Button released too quickly to count, or released without a press.
    NoPress,
    /// A phase ran to completion with no press pending.
    Null,
}

impl Message {
    /// True for the messages a real button press produces.
    pub const fn is_press(self) -> bool {
        matches!(self, Message::ShortPress | Message::LongPress)
    }
}
