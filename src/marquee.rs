//! Auto-scrolling horizontal strips that pause while the user interacts.
//!
//! Strip content is expected to be duplicated once, so wrapping by half the
//! scroll width is seamless.

use crate::frame::{FrameClock, FrameDriven, FrameId};
use crate::scene::ElementId;
use crate::view::ViewAdapter;

/// Pixels per millisecond.
pub const DEFAULT_SPEED: f64 = 0.045;

/// Next scroll offset after `elapsed_ms`, wrapped at half of `scroll_width`.
pub fn advance_offset(left: f64, elapsed_ms: f64, speed: f64, scroll_width: f64) -> f64 {
    let mut next = left + elapsed_ms.max(0.0) * speed;
    let half = scroll_width / 2.0;
    if half > 0.0 && next >= half {
        next -= half;
    }
    next
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Strip {
    element: ElementId,
    interacting: bool,
}

#[derive(Debug, Clone)]
pub struct MarqueeController {
    strips: Vec<Strip>,
    speed: f64,
    last_frame_ms: Option<f64>,
    pending: Option<FrameId>,
    enabled: bool,
    active: bool,
}

impl MarqueeController {
    pub fn new(elements: impl IntoIterator<Item = ElementId>, speed: f64, reduced_motion: bool) -> Self {
        Self {
            strips: elements
                .into_iter()
                .map(|element| Strip {
                    element,
                    interacting: false,
                })
                .collect(),
            speed,
            last_frame_ms: None,
            pending: None,
            enabled: !reduced_motion,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self, index: usize) -> bool {
        self.strips.get(index).is_some_and(|s| s.interacting)
    }

    pub fn activate(&mut self, clock: &mut dyn FrameClock) {
        if self.active || !self.enabled || self.strips.is_empty() {
            return;
        }
        self.active = true;
        self.last_frame_ms = None;
        self.pending = clock.request_frame();
    }

    /// Pointer entered/left or a touch started/ended on strip `index`.
    pub fn set_interacting(&mut self, index: usize, interacting: bool) {
        if let Some(strip) = self.strips.get_mut(index) {
            strip.interacting = interacting;
        }
    }
}

impl<V: ViewAdapter + ?Sized> FrameDriven<V> for MarqueeController {
    fn on_frame(&mut self, now_ms: f64, clock: &mut dyn FrameClock, view: &mut V) {
        self.pending = None;
        if !self.active {
            return;
        }
        let elapsed = now_ms - self.last_frame_ms.unwrap_or(now_ms);
        self.last_frame_ms = Some(now_ms);

        for strip in self.strips.iter().filter(|s| !s.interacting) {
            let left = view.scroll_left(strip.element);
            let width = view.scroll_width(strip.element);
            view.set_scroll_left(strip.element, advance_offset(left, elapsed, self.speed, width));
        }
        self.pending = clock.request_frame();
    }

    fn deactivate(&mut self, clock: &mut dyn FrameClock, _view: &mut V) {
        self.active = false;
        if let Some(id) = self.pending.take() {
            clock.cancel_frame(id);
        }
    }
}
