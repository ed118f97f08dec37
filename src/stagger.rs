//! Headline letters animate in one after another, timed off the frame clock.

use crate::frame::{FrameClock, FrameDriven, FrameId};
use crate::scene::ElementId;
use crate::view::{ViewAdapter, ViewFlag};

pub const DEFAULT_INTERVAL_MS: f64 = 80.0;

#[derive(Debug, Clone)]
pub struct HeadlineStagger {
    letters: Vec<ElementId>,
    interval_ms: f64,
    started_ms: Option<f64>,
    shown: usize,
    pending: Option<FrameId>,
    active: bool,
}

impl HeadlineStagger {
    pub fn new(letters: Vec<ElementId>, interval_ms: f64) -> Self {
        Self {
            letters,
            interval_ms: interval_ms.max(0.0),
            started_ms: None,
            shown: 0,
            pending: None,
            active: false,
        }
    }

    /// Number of letters already flagged.
    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn is_finished(&self) -> bool {
        self.shown == self.letters.len()
    }

    pub fn activate(&mut self, clock: &mut dyn FrameClock) {
        if self.active || self.is_finished() {
            return;
        }
        self.active = true;
        self.pending = clock.request_frame();
    }

    /// Letters due after `elapsed_ms`.
    fn due(&self, elapsed_ms: f64) -> usize {
        if self.interval_ms == 0.0 {
            return self.letters.len();
        }
        let due = (elapsed_ms / self.interval_ms).floor() as usize + 1;
        due.min(self.letters.len())
    }
}

impl<V: ViewAdapter + ?Sized> FrameDriven<V> for HeadlineStagger {
    fn on_frame(&mut self, now_ms: f64, clock: &mut dyn FrameClock, view: &mut V) {
        self.pending = None;
        if !self.active {
            return;
        }
        let started = *self.started_ms.get_or_insert(now_ms);
        let due = self.due((now_ms - started).max(0.0));
        for &letter in &self.letters[self.shown..due.max(self.shown)] {
            view.set_flag(letter, ViewFlag::AnimateIn, true);
        }
        self.shown = self.shown.max(due);

        if self.is_finished() {
            self.active = false;
            log::debug!("headline stagger finished, {} letters", self.shown);
        } else {
            self.pending = clock.request_frame();
        }
    }

    fn deactivate(&mut self, clock: &mut dyn FrameClock, _view: &mut V) {
        self.active = false;
        if let Some(id) = self.pending.take() {
            clock.cancel_frame(id);
        }
    }
}
