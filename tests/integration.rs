//! End-to-end tests for the camtrap controller.
//!
//! The controller runs against virtual time: every delay advances a
//! shared clock instantly, and scripted button messages are posted to the
//! slot when the clock passes their timestamp, the way the button task
//! would post them on the board.

use camtrap::config::{Timings, BOOT_EPOCH_SECS};
use camtrap::devices::{Camera, Clock, MotionSensor};
use camtrap::ui::{Indicate, PressClassifier, PressThresholds};
use camtrap::{Controller, Devices, Error, Message, MessageSlot, Pattern, State};
use embassy_futures::block_on;
use embedded_hal_async::delay::DelayNs;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

// ═══════════════════════════════════════════════════════════════════════════
// Fakes
// ═══════════════════════════════════════════════════════════════════════════

type Now = Rc<Cell<u64>>;

/// Records every pattern written, and when.
struct RecordingIndicator {
    now_ms: Now,
    patterns: Rc<RefCell<Vec<Pattern>>>,
    timeline: Rc<RefCell<Vec<(u64, Pattern)>>>,
}

impl Indicate for RecordingIndicator {
    fn set_pattern(&mut self, pattern: Pattern) {
        self.patterns.borrow_mut().push(pattern);
        self.timeline.borrow_mut().push((self.now_ms.get(), pattern));
    }
}

/// Advances virtual time (ms) and delivers scripted button messages.
///
/// Once time reaches `halt_at_ms` every delay stays pending, which stops
/// a controller that would otherwise loop forever.
struct VirtualDelay<'a> {
    now_ms: Now,
    slot: &'a MessageSlot,
    script: VecDeque<(u64, Message)>,
    halt_at_ms: Option<u64>,
}

impl VirtualDelay<'_> {
    async fn sleep(&mut self, ms: u64) {
        self.advance(ms);
        if self.halt_at_ms.is_some_and(|at| self.now_ms.get() >= at) {
            core::future::pending::<()>().await;
        }
    }

    fn advance(&mut self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
        while let Some(&(at, message)) = self.script.front() {
            if at > self.now_ms.get() {
                break;
            }
            self.slot.post(message);
            self.script.pop_front();
        }
    }
}

impl DelayNs for VirtualDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.sleep(u64::from(ns) / 1_000_000).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.sleep(u64::from(ms)).await;
    }
}

struct FakeMotion {
    waits: Rc<Cell<u32>>,
    healthy: bool,
}

impl MotionSensor for FakeMotion {
    async fn wait_for_motion(&mut self) -> camtrap::Result<()> {
        self.waits.set(self.waits.get() + 1);
        if self.healthy {
            Ok(())
        } else {
            Err(Error::MotionSensor)
        }
    }
}

struct FakeCamera {
    captures: Rc<RefCell<Vec<String>>>,
    healthy: bool,
}

impl Camera for FakeCamera {
    async fn capture(&mut self, filename: &str) -> camtrap::Result<()> {
        if !self.healthy {
            return Err(Error::Capture);
        }
        self.captures.borrow_mut().push(filename.to_string());
        Ok(())
    }
}

struct VirtualClock {
    now_ms: Now,
}

impl Clock for VirtualClock {
    fn uptime_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn unix_secs(&self) -> i64 {
        BOOT_EPOCH_SECS + (self.now_ms.get() / 1000) as i64
    }
}

type TestController<'a> =
    Controller<'a, RecordingIndicator, VirtualDelay<'a>, FakeMotion, FakeCamera, VirtualClock>;

/// Handles onto the fakes after they move into the controller.
struct Handles {
    now_ms: Now,
    patterns: Rc<RefCell<Vec<Pattern>>>,
    timeline: Rc<RefCell<Vec<(u64, Pattern)>>>,
    motion_waits: Rc<Cell<u32>>,
    captures: Rc<RefCell<Vec<String>>>,
}

impl Handles {
    fn now(&self) -> u64 {
        self.now_ms.get()
    }

    fn pattern_count(&self) -> usize {
        self.patterns.borrow().len()
    }

    /// The `index`-th pattern written since the rig was built.
    fn pattern_at(&self, index: usize) -> Pattern {
        self.patterns.borrow()[index]
    }

    fn capture_count(&self) -> usize {
        self.captures.borrow().len()
    }
}

struct Rig {
    script: Vec<(u64, Message)>,
    motion_ok: bool,
    camera_ok: bool,
    halt_at_ms: Option<u64>,
}

impl Rig {
    fn new() -> Self {
        Self {
            script: Vec::new(),
            motion_ok: true,
            camera_ok: true,
            halt_at_ms: None,
        }
    }

    /// Post `message` once virtual time reaches `at_ms`.
    fn press_at(mut self, at_ms: u64, message: Message) -> Self {
        self.script.push((at_ms, message));
        self
    }

    /// Freeze virtual time at `at_ms`.
    fn halt_at(mut self, at_ms: u64) -> Self {
        self.halt_at_ms = Some(at_ms);
        self
    }

    fn faulty_motion(mut self) -> Self {
        self.motion_ok = false;
        self
    }

    fn faulty_camera(mut self) -> Self {
        self.camera_ok = false;
        self
    }

    fn build(self, slot: &MessageSlot) -> (TestController<'_>, Handles) {
        let handles = Handles {
            now_ms: Rc::new(Cell::new(0)),
            patterns: Rc::new(RefCell::new(Vec::new())),
            timeline: Rc::new(RefCell::new(Vec::new())),
            motion_waits: Rc::new(Cell::new(0)),
            captures: Rc::new(RefCell::new(Vec::new())),
        };

        let devices = Devices {
            indicator: RecordingIndicator {
                now_ms: handles.now_ms.clone(),
                patterns: handles.patterns.clone(),
                timeline: handles.timeline.clone(),
            },
            delay: VirtualDelay {
                now_ms: handles.now_ms.clone(),
                slot,
                script: self.script.into_iter().collect(),
                halt_at_ms: self.halt_at_ms,
            },
            motion: FakeMotion {
                waits: handles.motion_waits.clone(),
                healthy: self.motion_ok,
            },
            camera: FakeCamera {
                captures: handles.captures.clone(),
                healthy: self.camera_ok,
            },
            clock: VirtualClock {
                now_ms: handles.now_ms.clone(),
            },
        };

        (Controller::with_timings(devices, slot, Timings::default()), handles)
    }
}

/// Dispatch `(state, message)` and run the phase it selects.
fn dispatch(ctl: &mut TestController<'_>, state: State, message: Message) -> (State, Message) {
    ctl.resume_from(state, message);
    block_on(ctl.step())
}

fn press(duration_ms: u64) -> Message {
    let mut classifier = PressClassifier::new(PressThresholds::default());
    classifier.on_press_start(10_000);
    classifier.on_release(10_000 + duration_ms)
}

// ═══════════════════════════════════════════════════════════════════════════
// Scenarios
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn short_press_arms_through_warm_into_ready() {
    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new().press_at(1_500, press(300)).build(&slot);

    // Start flashes until the press is seen on the next poll.
    let step = dispatch(&mut ctl, State::Start, Message::Start);
    assert_eq!(step, (State::Start, Message::ShortPress));
    assert_eq!(handles.now(), 2_000);

    // Warm runs its full five seconds, then hands over automatically.
    let step = block_on(ctl.step());
    assert_eq!(step, (State::Warm, Message::Null));
    assert_eq!(handles.now(), 7_000);

    let step = block_on(ctl.step());
    assert_eq!(step, (State::Ready, Message::ShortPress));
    assert_eq!(handles.motion_waits.get(), 1);
}

#[test]
fn release_bounce_does_not_hide_the_press() {
    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new()
        .press_at(1_500, press(300))
        .press_at(1_505, press(3))
        .press_at(20_000, Message::LongPress)
        .build(&slot);

    let step = dispatch(&mut ctl, State::Start, Message::Start);
    assert_eq!(step, (State::Start, Message::ShortPress));
    assert_eq!(handles.now(), 2_000);
}

#[test]
fn motion_takes_one_picture_then_rearms() {
    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new().build(&slot);

    let step = dispatch(&mut ctl, State::Warm, Message::Null);
    assert_eq!(step, (State::Ready, Message::ShortPress));

    let step = block_on(ctl.step());
    assert_eq!(step, (State::Snap, Message::Null));
    assert_eq!(handles.capture_count(), 1);
    assert_eq!(handles.captures.borrow()[0], "2026-01-01_00.00.00.jpg");
    // 19 blue flashes after the capture, then dark.
    assert_eq!(handles.now(), 9_500);
    assert_eq!(*handles.patterns.borrow().last().unwrap(), Pattern::OFF);

    let step = block_on(ctl.step());
    assert_eq!(step, (State::Ready, Message::ShortPress));
    assert_eq!(handles.capture_count(), 1);
    assert_eq!(handles.motion_waits.get(), 2);
}

#[test]
fn capture_name_follows_the_clock() {
    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new().build(&slot);
    handles.now_ms.set(61_000);

    dispatch(&mut ctl, State::Ready, Message::ShortPress);
    assert_eq!(handles.captures.borrow()[0], "2026-01-01_00.01.01.jpg");
}

#[test]
fn long_press_during_warm_returns_to_start() {
    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new()
        .press_at(1_000, press(2_000))
        // Lets the Start phase that follows finish.
        .press_at(9_000, Message::ShortPress)
        .build(&slot);

    let step = dispatch(&mut ctl, State::Start, Message::ShortPress);
    assert_eq!(step, (State::Warm, Message::LongPress));
    assert_eq!(handles.now(), 5_000);

    let entered = handles.pattern_count();
    let step = block_on(ctl.step());
    assert_eq!(step.0, State::Start);
    assert_eq!(handles.pattern_at(entered), State::Start.entry_pattern());
}

#[test]
fn short_press_during_warm_aborts_arming() {
    let slot = MessageSlot::new();
    let (mut ctl, _handles) = Rig::new().press_at(2_600, Message::ShortPress).build(&slot);

    let step = dispatch(&mut ctl, State::Start, Message::ShortPress);
    assert_eq!(step, (State::Warm, Message::ShortPress));
}

#[test]
fn malformed_release_is_ignored() {
    let mut classifier = PressClassifier::default();
    let noise = classifier.on_release(500);
    assert_eq!(noise, Message::NoPress);

    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new()
        .press_at(500, noise)
        .press_at(3_500, press(0))
        .press_at(4_200, press(100))
        .press_at(5_500, press(300))
        .build(&slot);

    // Repeated noise keeps Start flashing; only the real press ends it.
    let step = dispatch(&mut ctl, State::Start, Message::Start);
    assert_eq!(step, (State::Start, Message::ShortPress));
    assert_eq!(handles.now(), 6_000);
}

#[test]
fn noise_during_warm_does_not_change_the_outcome() {
    let slot = MessageSlot::new();
    let (mut ctl, _handles) = Rig::new().press_at(4_000, Message::NoPress).build(&slot);

    let step = dispatch(&mut ctl, State::Start, Message::ShortPress);
    assert_eq!(step, (State::Warm, Message::Null));
}

#[test]
fn noise_during_snap_does_not_change_the_outcome() {
    let slot = MessageSlot::new();
    let (mut ctl, _handles) = Rig::new().press_at(3_000, Message::NoPress).build(&slot);

    let step = dispatch(&mut ctl, State::Ready, Message::ShortPress);
    assert_eq!(step, (State::Snap, Message::Null));
}

#[test]
fn press_before_warm_is_discarded() {
    let slot = MessageSlot::new();
    slot.post(Message::LongPress);
    let (mut ctl, _handles) = Rig::new().build(&slot);

    let step = dispatch(&mut ctl, State::Start, Message::ShortPress);
    assert_eq!(step, (State::Warm, Message::Null));
}

#[test]
fn ready_ignores_the_button() {
    let slot = MessageSlot::new();
    slot.post(Message::LongPress);
    let (mut ctl, _handles) = Rig::new().build(&slot);

    let step = dispatch(&mut ctl, State::Warm, Message::Null);
    assert_eq!(step, (State::Ready, Message::ShortPress));
}

#[test]
fn long_press_after_capture_disarms() {
    let slot = MessageSlot::new();
    let (mut ctl, _handles) = Rig::new().press_at(3_000, Message::LongPress).build(&slot);

    let step = dispatch(&mut ctl, State::Ready, Message::ShortPress);
    assert_eq!(step, (State::Snap, Message::LongPress));
    let next = camtrap::transition(step.0, step.1);
    assert_eq!(next, Some(State::Start));
}

#[test]
fn unhandled_pair_recovers_to_start() {
    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new().build(&slot);

    for (state, message) in [
        (State::Snap, Message::ShortPress),
        (State::Ready, Message::NoPress),
        (State::Warm, Message::Start),
    ] {
        let before = handles.now();
        let step = dispatch(&mut ctl, state, message);
        assert_eq!(step, (State::Start, Message::Start));
        assert_eq!(handles.now() - before, 2_000);
    }
    // No phase ran.
    assert_eq!(handles.pattern_count(), 0);
}

#[test]
fn camera_fault_escapes_to_start() {
    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new().faulty_camera().build(&slot);

    let step = dispatch(&mut ctl, State::Ready, Message::ShortPress);
    assert_eq!(step, (State::Snap, Message::LongPress));
    assert_eq!(handles.capture_count(), 0);
    // Gave up before the flash cycles.
    assert_eq!(handles.now(), 0);
    assert_eq!(camtrap::transition(step.0, step.1), Some(State::Start));
}

#[test]
fn motion_fault_escapes_to_start() {
    let slot = MessageSlot::new();
    let (mut ctl, _handles) = Rig::new().faulty_motion().build(&slot);

    let step = dispatch(&mut ctl, State::Warm, Message::Null);
    assert_eq!(step, (State::Ready, Message::LongPress));
    assert_eq!(camtrap::transition(step.0, step.1), Some(State::Start));
}

#[test]
fn each_phase_shows_its_pattern_on_entry() {
    let cases = [
        (State::Start, Message::Start, State::Start, Pattern::YELLOW),
        (State::Start, Message::ShortPress, State::Warm, Pattern::YELLOW),
        (State::Warm, Message::Null, State::Ready, Pattern::RED),
        (State::Ready, Message::ShortPress, State::Snap, Pattern::BLUE),
    ];

    for (state, message, phase, pattern) in cases {
        let slot = MessageSlot::new();
        let (mut ctl, handles) = Rig::new().press_at(1_000, Message::ShortPress).build(&slot);

        dispatch(&mut ctl, state, message);
        assert_eq!(handles.pattern_at(0), pattern, "{phase:?}");
        assert_eq!(phase.entry_pattern(), pattern);
    }
}

#[test]
fn start_flashes_slow_yellow() {
    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new().press_at(2_500, Message::LongPress).build(&slot);

    let step = dispatch(&mut ctl, State::Start, Message::LongPress);
    assert_eq!(step, (State::Start, Message::LongPress));
    assert_eq!(handles.now(), 3_000);
    assert_eq!(
        *handles.patterns.borrow(),
        [
            Pattern::YELLOW,
            Pattern::OFF,
            Pattern::YELLOW,
            Pattern::OFF,
            Pattern::YELLOW,
            Pattern::OFF,
        ]
    );
}

#[test]
fn power_up_settles_dark_then_runs_the_loop() {
    let slot = MessageSlot::new();
    let (mut ctl, handles) = Rig::new()
        .press_at(1_500, press(300))
        .halt_at(4_500)
        .build(&slot);

    assert!(embassy_futures::poll_once(ctl.run()).is_pending());
    assert_eq!(handles.now(), 4_500);

    let timeline = handles.timeline.borrow();
    assert_eq!(
        timeline[..6],
        [
            // Dark for the settle time.
            (0, Pattern::OFF),
            // Start's slow flash, one poll per second.
            (1_000, Pattern::YELLOW),
            (1_600, Pattern::OFF),
            // The press seen at 2 s moved the loop on to Warm.
            (2_000, Pattern::YELLOW),
            (2_000, Pattern::YELLOW),
            (2_250, Pattern::OFF),
        ]
    );
}
