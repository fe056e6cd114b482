//! Foreground controller: dispatch loop and fault recovery.

use crate::config::Timings;
use crate::devices::{Camera, Clock, MotionSensor};
use crate::trap::{transition, State};
use crate::ui::{Indicate, Message, MessageSlot, Pattern};
use embedded_hal_async::delay::DelayNs;

/// Everything the phases drive, owned by the controller.
pub struct Devices<I, D, M, C, K> {
    pub indicator: I,
    pub delay: D,
    pub motion: M,
    pub camera: C,
    pub clock: K,
}

/// Runs phases one after another, forever.
///
/// Holds the current state and the message the next dispatch starts
/// from. The only state shared with the button task is the
/// [`MessageSlot`]; everything else belongs to this single foreground
/// actor.
pub struct Controller<'a, I, D, M, C, K> {
    pub(super) devices: Devices<I, D, M, C, K>,
    pub(super) slot: &'a MessageSlot,
    pub(super) timings: Timings,
    state: State,
    message: Message,
}

impl<'a, I, D, M, C, K> Controller<'a, I, D, M, C, K>
where
    I: Indicate,
    D: DelayNs,
    M: MotionSensor,
    C: Camera,
    K: Clock,
{
    pub fn new(devices: Devices<I, D, M, C, K>, slot: &'a MessageSlot) -> Self {
        Self::with_timings(devices, slot, Timings::default())
    }

    pub fn with_timings(
        devices: Devices<I, D, M, C, K>,
        slot: &'a MessageSlot,
        timings: Timings,
    ) -> Self {
        Self {
            devices,
            slot,
            timings,
            state: State::Start,
            message: Message::Start,
        }
    }

    /// Make `(state, message)` the next pair dispatched.
    pub fn resume_from(&mut self, state: State, message: Message) {
        self.state = state;
        self.message = message;
    }

    /// One dispatch: look up the held `(state, message)`, run that phase,
    /// and hold and return its `(completed state, outcome message)`.
    ///
    /// An unhandled pair pauses and yields `(Start, Start)`. A phase
    /// fault is logged and yields a long press, which every phase maps
    /// back to Start.
    pub async fn step(&mut self) -> (State, Message) {
        let (state, message) = (self.state, self.message);
        info!("jump from {:?}, message={:?}", state, message);

        let (completed, outcome) = match transition(state, message) {
            Some(next) => match self.run_phase(next, message).await {
                Ok(outcome) => (outcome.completed, outcome.message),
                Err(e) => {
                    error!("{:?} phase failed: {}", next, e);
                    (next, Message::LongPress)
                }
            },
            None => {
                warn!(
                    "Unhandled ({:?}, {:?}) at {} ms",
                    state,
                    message,
                    self.devices.clock.uptime_ms()
                );
                self.devices.delay.delay_ms(self.timings.unhandled_pause_ms).await;
                (State::Start, Message::Start)
            }
        };

        self.resume_from(completed, outcome);
        (completed, outcome)
    }

    /// Outputs off, settle, then dispatch from `(Start, Start)` forever.
    pub async fn run(&mut self) -> ! {
        self.devices.indicator.set_pattern(Pattern::OFF);
        self.devices.delay.delay_ms(self.timings.startup_settle_ms).await;

        self.resume_from(State::Start, Message::Start);
        loop {
            self.step().await;
        }
    }
}
