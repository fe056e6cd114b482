//! Phase actions, one per [`State`].
//!
//! Every phase sets its entry pattern, does its work, and reports the
//! message that should drive the next transition. Flash cycles double as
//! poll points for the pending-message slot.
//!
//! Only Start leaves early on a press. Warm and Snap run to completion
//! and then report whatever press is pending. Ready blocks on the motion
//! sensor and ignores the button.

use crate::config::{FlashTiming, IMAGE_EXTENSION};
use crate::devices::{filename, Camera, Clock, MotionSensor};
use crate::error::Result;
use crate::trap::controller::Controller;
use crate::trap::{PhaseOutcome, State};
use crate::ui::{flash, Indicate, Message, Pattern};
use embedded_hal_async::delay::DelayNs;

impl<I, D, M, C, K> Controller<'_, I, D, M, C, K>
where
    I: Indicate,
    D: DelayNs,
    M: MotionSensor,
    C: Camera,
    K: Clock,
{
    pub(super) async fn run_phase(&mut self, phase: State, incoming: Message) -> Result<PhaseOutcome> {
        match phase {
            State::Start => self.start_phase(incoming).await,
            State::Warm => self.warm_phase(incoming).await,
            State::Ready => self.ready_phase(incoming).await,
            State::Snap => self.snap_phase(incoming).await,
        }
    }

    /// Calm yellow flash until the button says something.
    async fn start_phase(&mut self, incoming: Message) -> Result<PhaseOutcome> {
        info!("in Start, incoming={:?}: calm yellow flash, wait for button", incoming);
        self.slot.clear();

        loop {
            self.flash_cycle(State::Start.entry_pattern(), self.timings.start_flash).await;

            match self.slot.take() {
                Some(Message::NoPress) => debug!("Start: ignoring noise press"),
                Some(message) => {
                    info!("Start got a message: {:?}", message);
                    return Ok(PhaseOutcome::new(State::Start, message));
                }
                None => {}
            }
        }
    }

    /// Quicker yellow flash: time for the operator to get out of the way.
    async fn warm_phase(&mut self, incoming: Message) -> Result<PhaseOutcome> {
        info!("in Warm, incoming={:?}: quicker yellow flash, warming up", incoming);
        self.devices.indicator.set_pattern(State::Warm.entry_pattern());
        self.slot.clear();

        for _ in 0..self.timings.warm_cycles {
            self.flash_cycle(Pattern::YELLOW, self.timings.warm_flash).await;
        }

        Ok(PhaseOutcome::new(State::Warm, self.pending_press()))
    }

    /// Solid red. Armed: only motion moves us on.
    async fn ready_phase(&mut self, incoming: Message) -> Result<PhaseOutcome> {
        info!("in Ready, incoming={:?}: solid red, armed", incoming);
        self.devices.indicator.set_pattern(State::Ready.entry_pattern());

        self.devices.motion.wait_for_motion().await?;
        info!("Ready: motion detected");

        Ok(PhaseOutcome::new(State::Ready, Message::ShortPress))
    }

    /// Blue: take one picture, then flash so the capture is visible.
    async fn snap_phase(&mut self, incoming: Message) -> Result<PhaseOutcome> {
        info!("in Snap, incoming={:?}: flashing blue, taking picture", incoming);
        self.devices.indicator.set_pattern(State::Snap.entry_pattern());
        self.slot.clear();

        let name = filename::generate(self.devices.clock.unix_secs(), IMAGE_EXTENSION)?;
        info!("Sneaky person alert! {}", name.as_str());
        self.devices.camera.capture(&name).await?;

        for _ in 0..self.timings.snap_cycles {
            self.flash_cycle(Pattern::BLUE, self.timings.snap_flash).await;
        }
        self.devices.indicator.set_pattern(Pattern::OFF);

        Ok(PhaseOutcome::new(State::Snap, self.pending_press()))
    }

    async fn flash_cycle(&mut self, pattern: Pattern, timing: FlashTiming) {
        flash(&mut self.devices.indicator, &mut self.devices.delay, pattern, timing).await;
    }

    /// Press pending at the end of a run-to-completion phase, else `Null`.
    fn pending_press(&self) -> Message {
        match self.slot.take() {
            Some(message) if message.is_press() => message,
            _ => Message::Null,
        }
    }
}
