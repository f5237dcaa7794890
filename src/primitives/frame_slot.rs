//! Single-slot mailbox drained once per display frame
//!
//! Writers overwrite the slot unconditionally; the frame callback takes at
//! most one value. Intermediate values between two frames are dropped, only
//! the latest survives. The slot also tracks whether a frame callback is
//! pending, so a burst of writes schedules exactly one callback.

#[derive(Debug)]
pub struct FrameSlot<T> {
    latest: Option<T>,
    scheduled: bool,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameSlot<T> {
    pub fn new() -> Self {
        Self {
            latest: None,
            scheduled: false,
        }
    }

    /// Store `value`, replacing whatever was pending.
    ///
    /// Returns `true` when the caller must schedule a frame callback, i.e. no
    /// callback was pending yet.
    pub fn put(&mut self, value: T) -> bool {
        self.latest = Some(value);
        if self.scheduled {
            false
        } else {
            self.scheduled = true;
            true
        }
    }

    /// Frame callback: take the latest value and clear the scheduled marker
    pub fn drain(&mut self) -> Option<T> {
        self.scheduled = false;
        self.latest.take()
    }

    /// Whether a frame callback is pending
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Drop the pending value and marker (e.g. when the frame was cancelled)
    pub fn clear(&mut self) {
        self.latest = None;
        self.scheduled = false;
    }
}
