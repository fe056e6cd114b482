//! camtrap firmware for the nRF52840.
//!
//! Two tasks:
//!   - the button task classifies each press and posts it to [`PENDING`]
//!   - `main` becomes the controller and runs phases forever
//!
//! Pin map: see `config.rs`.

#![no_std]
#![no_main]

use camtrap::config;
use camtrap::devices::{Clock, Pir, ShutterRelease};
use camtrap::ui::{ButtonWatcher, Indicator, PressThresholds};
use camtrap::{Controller, Devices, MessageSlot};
use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_time::{Delay, Instant};
use {defmt_rtt as _, panic_probe as _};

/// Pending button message, written by the button task, polled by the controller.
static PENDING: MessageSlot = MessageSlot::new();

/// Uptime from the RTC time driver; wall time counts on from the build epoch.
struct BoardClock;

impl Clock for BoardClock {
    fn uptime_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn unix_secs(&self) -> i64 {
        config::BOOT_EPOCH_SECS + Instant::now().as_secs() as i64
    }
}

#[embassy_executor::task]
async fn button_task(button: Input<'static>) -> ! {
    let mut watcher = ButtonWatcher::new(button, Delay, PressThresholds::default());

    loop {
        let message = watcher.next_message(&BoardClock).await;
        info!("Button: {}", message);
        PENDING.post(message);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("camtrap starting");

    let button = Input::new(p.P0_11, Pull::Up);
    spawner.must_spawn(button_task(button));

    let indicator = Indicator::new(
        Output::new(p.P0_03, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_04, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_28, Level::Low, OutputDrive::Standard),
    );
    let shutter = Output::new(p.P0_29, Level::Low, OutputDrive::Standard);

    let devices = Devices {
        indicator,
        delay: Delay,
        motion: Pir::new(Input::new(p.P0_02, Pull::Down)),
        camera: ShutterRelease::new(shutter, Delay, config::SHUTTER_PULSE_MS),
        clock: BoardClock,
    };

    let mut controller = Controller::new(devices, &PENDING);
    controller.run().await
}
