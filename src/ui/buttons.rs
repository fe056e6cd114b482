//! GPIO button input.
//!
//! One tactile switch, active-low with pull-up. The firmware runs a
//! dedicated task that loops on [`ButtonWatcher::next_message`] and posts
//! each result into the pending-message slot, so the controller never
//! touches the pin.
//!
//! After every release the watcher holds off for the noise threshold
//! before it looks for the next press edge. Contact bounce on release
//! falls inside that window and is never classified, so it cannot replace
//! the press it belongs to.

use crate::devices::Clock;
use crate::ui::input_logic::{PressClassifier, PressThresholds};
use crate::ui::Message;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;

pub struct ButtonWatcher<B, D> {
    button: B,
    delay: D,
    classifier: PressClassifier,
    settle_ms: u32,
}

impl<B: Wait, D: DelayNs> ButtonWatcher<B, D> {
    pub fn new(button: B, delay: D, thresholds: PressThresholds) -> Self {
        Self {
            button,
            delay,
            classifier: PressClassifier::new(thresholds),
            settle_ms: u32::try_from(thresholds.short_ms).unwrap_or(u32::MAX),
        }
    }

    /// Wait for one press and release, classify it, then let the contacts
    /// settle.
    ///
    /// A pin error on the press edge leaves no recorded start, so the
    /// following release classifies as [`Message::NoPress`].
    pub async fn next_message<K: Clock>(&mut self, clock: &K) -> Message {
        if self.button.wait_for_low().await.is_ok() {
            self.classifier.on_press_start(clock.uptime_ms());
        }

        let _ = self.button.wait_for_high().await;
        let message = self.classifier.on_release(clock.uptime_ms());
        debug!("Button: released, {:?}", message);

        // Wait for release bounce to die out.
        self.delay.delay_ms(self.settle_ms).await;
        message
    }
}
