//! Frame clock abstraction and the per-component coalescing slot.
//!
//! Every controller owns exactly one [`Coalesced`] slot (or an equivalent
//! pending-frame handle). Input handlers overwrite the slot and only schedule
//! a frame when none is outstanding, so visual writes never outpace the
//! display refresh no matter how fast events arrive.

/// Handle returned by the host when a frame callback is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

/// The host's per-refresh callback scheduler.
pub trait FrameClock {
    /// Schedule the component's frame callback. `None` means the host refused
    /// and the component stays idle until the next request.
    fn request_frame(&mut self) -> Option<FrameId>;

    fn cancel_frame(&mut self, id: FrameId);
}

/// A component driven by frame callbacks that writes into `O`.
pub trait FrameDriven<O: ?Sized> {
    /// Called once per scheduled frame with the host timestamp in milliseconds.
    fn on_frame(&mut self, now_ms: f64, clock: &mut dyn FrameClock, out: &mut O);

    /// Cancel any pending frame and stop reacting to input. Must be idempotent.
    fn deactivate(&mut self, clock: &mut dyn FrameClock, out: &mut O);
}

/// Latest-value slot with at most one outstanding frame request.
#[derive(Debug, Clone)]
pub struct Coalesced<T> {
    latest: T,
    pending: Option<FrameId>,
}

impl<T: Copy> Coalesced<T> {
    pub fn new(initial: T) -> Self {
        Self {
            latest: initial,
            pending: None,
        }
    }

    /// Record `value` as the most recent input and schedule a frame if none is pending.
    pub fn store(&mut self, value: T, clock: &mut dyn FrameClock) {
        self.latest = value;
        self.schedule(clock);
    }

    /// Schedule a frame without changing the stored value.
    pub fn schedule(&mut self, clock: &mut dyn FrameClock) {
        if self.pending.is_none() {
            self.pending = clock.request_frame();
        }
    }

    /// Consume the pending flag from inside the frame callback and return the latest value.
    pub fn take(&mut self) -> T {
        self.pending = None;
        self.latest
    }

    pub fn latest(&self) -> T {
        self.latest
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self, clock: &mut dyn FrameClock) {
        if let Some(id) = self.pending.take() {
            clock.cancel_frame(id);
        }
    }
}
