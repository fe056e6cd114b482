//! Passive-infrared motion sensor.
//!
//! The sensor module drives its output high while it sees motion, so
//! "wait for motion" is "wait for the pin to be high". Retriggering and
//! hold time are set on the module itself.

use crate::devices::MotionSensor;
use crate::error::{Error, Result};
use embedded_hal_async::digital::Wait;

pub struct Pir<P> {
    pin: P,
}

impl<P: Wait> Pir<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: Wait> MotionSensor for Pir<P> {
    async fn wait_for_motion(&mut self) -> Result<()> {
        self.pin.wait_for_high().await.map_err(|_| Error::MotionSensor)?;
        debug!("PIR: output high");
        Ok(())
    }
}
