//! Camera behind a shutter trigger line.
//!
//! The camera module stores and names the image itself; we raise its
//! trigger input for a fixed pulse and pass the generated file name along
//! in the log so captures can be matched up afterwards.

use crate::devices::Camera;
use crate::error::{Error, Result};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

pub struct ShutterRelease<P, D> {
    trigger: P,
    delay: D,
    pulse_ms: u32,
}

impl<P: OutputPin, D: DelayNs> ShutterRelease<P, D> {
    /// `trigger` is driven low here and pulsed high for `pulse_ms` per capture.
    pub fn new(mut trigger: P, delay: D, pulse_ms: u32) -> Self {
        let _ = trigger.set_low();
        Self {
            trigger,
            delay,
            pulse_ms,
        }
    }
}

impl<P: OutputPin, D: DelayNs> Camera for ShutterRelease<P, D> {
    async fn capture(&mut self, filename: &str) -> Result<()> {
        info!("Shutter: {}", filename);
        self.trigger.set_high().map_err(|_| Error::Capture)?;
        self.delay.delay_ms(self.pulse_ms).await;
        self.trigger.set_low().map_err(|_| Error::Capture)?;
        Ok(())
    }
}
