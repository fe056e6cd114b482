//! Tri-color status indicator.
//!
//! Three independent outputs (red, yellow, blue) encode the current
//! phase. A [`flash`] is the unit of animation: pattern on, all off, and
//! the phases use one flash as their poll interval.

use crate::config::FlashTiming;
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal_async::delay::DelayNs;

/// State of the three LEDs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    pub red: bool,
    pub yellow: bool,
    pub blue: bool,
}

impl Pattern {
    pub const OFF: Pattern = Pattern::new(false, false, false);
    pub const RED: Pattern = Pattern::new(true, false, false);
    pub const YELLOW: Pattern = Pattern::new(false, true, false);
    pub const BLUE: Pattern = Pattern::new(false, false, true);

    pub const fn new(red: bool, yellow: bool, blue: bool) -> Self {
        Self { red, yellow, blue }
    }
}

/// Anything that can show a [`Pattern`]. Setting a pattern cannot fail.
pub trait Indicate {
    fn set_pattern(&mut self, pattern: Pattern);
}

/// Indicator driven by three GPIO outputs (high = LED on).
pub struct Indicator<R, Y, B> {
    red: R,
    yellow: Y,
    blue: B,
}

impl<R, Y, B> Indicator<R, Y, B>
where
    R: OutputPin,
    Y: OutputPin,
    B: OutputPin,
{
    /// Take ownership of the pins and switch everything off.
    pub fn new(red: R, yellow: Y, blue: B) -> Self {
        let mut indicator = Self { red, yellow, blue };
        indicator.set_pattern(Pattern::OFF);
        indicator
    }
}

impl<R, Y, B> Indicate for Indicator<R, Y, B>
where
    R: OutputPin,
    Y: OutputPin,
    B: OutputPin,
{
    fn set_pattern(&mut self, pattern: Pattern) {
        // GPIO writes are infallible on the target.
        let _ = self.red.set_state(PinState::from(pattern.red));
        let _ = self.yellow.set_state(PinState::from(pattern.yellow));
        let _ = self.blue.set_state(PinState::from(pattern.blue));
    }
}

/// Show `pattern` for `timing.on_ms`, then all off for `timing.off_ms`.
pub async fn flash<I, D>(indicator: &mut I, delay: &mut D, pattern: Pattern, timing: FlashTiming)
where
    I: Indicate,
    D: DelayNs,
{
    indicator.set_pattern(pattern);
    delay.delay_ms(timing.on_ms).await;
    indicator.set_pattern(Pattern::OFF);
    delay.delay_ms(timing.off_ms).await;
}
