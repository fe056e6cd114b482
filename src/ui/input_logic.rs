//! Button hold-time classification.

use crate::config::{LONG_PRESS_MS, SHORT_PRESS_MS};
use crate::ui::Message;

/// Hold-time boundaries separating noise, short and long presses (ms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressThresholds {
    pub short_ms: u64,
    pub long_ms: u64,
}

impl Default for PressThresholds {
    fn default() -> Self {
        Self {
            short_ms: SHORT_PRESS_MS,
            long_ms: LONG_PRESS_MS,
        }
    }
}

/// Classify a hold of `duration_ms`.
///
/// The short range is `(short_ms, long_ms]`: a hold of exactly `long_ms`
/// is a short press, a hold of exactly `short_ms` is noise.
pub fn classify(duration_ms: u64, thresholds: PressThresholds) -> Message {
    if duration_ms > thresholds.long_ms {
        Message::LongPress
    } else if duration_ms > thresholds.short_ms {
        Message::ShortPress
    } else {
        Message::NoPress
    }
}

/// Turns press/release edge times into messages.
///
/// Never blocks and never fails: a release with no recorded press, or one
/// timestamped before its press, is [`Message::NoPress`].
#[derive(Clone, Debug, Default)]
pub struct PressClassifier {
    thresholds: PressThresholds,
    press_start_ms: Option<u64>,
}

impl PressClassifier {
    pub const fn new(thresholds: PressThresholds) -> Self {
        Self {
            thresholds,
            press_start_ms: None,
        }
    }

    /// Record the press edge. A second press before a release restarts the hold.
    pub fn on_press_start(&mut self, now_ms: u64) {
        self.press_start_ms = Some(now_ms);
    }

    /// Classify the hold ending at `now_ms` and forget the press.
    pub fn on_release(&mut self, now_ms: u64) -> Message {
        match self.press_start_ms.take() {
            Some(start) if now_ms >= start => classify(now_ms - start, self.thresholds),
            _ => Message::NoPress,
        }
    }
}
