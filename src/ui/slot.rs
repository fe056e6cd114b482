//! Pending-message slot.
//!
//! One message deep. The button task overwrites it on every release; the
//! controller clears it when a phase starts and takes it when polling.
//! A [`Message::NoPress`] never displaces a real press that is still
//! waiting to be read.
//!
//! Guarded by an Embassy critical-section mutex, so it can live in a
//! `static`.

use crate::ui::Message;
use core::cell::Cell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

pub struct MessageSlot {
    pending: Mutex<CriticalSectionRawMutex, Cell<Option<Message>>>,
}

impl MessageSlot {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(None)),
        }
    }

    /// Store `message`, replacing any unconsumed one unless that would
    /// turn a press into noise.
    pub fn post(&self, message: Message) {
        self.pending.lock(|pending| {
            let keep = message == Message::NoPress && pending.get().is_some_and(Message::is_press);
            if !keep {
                pending.set(Some(message));
            }
        });
    }

    /// Read and clear.
    pub fn take(&self) -> Option<Message> {
        self.pending.lock(Cell::take)
    }

    pub fn clear(&self) {
        self.pending.lock(|pending| pending.set(None));
    }
}

impl Default for MessageSlot {
    fn default() -> Self {
        Self::new()
    }
}
