#![allow(dead_code)]

use std::collections::HashMap;

use motion_wasm::{
    ElementId, FrameClock, FrameDriven, FrameId, Rect, Rgba, Surface, Transform, ViewAdapter,
    ViewFlag, Viewport,
};

/// Frame clock driven by hand: frames only run when the test fires them.
#[derive(Debug, Default)]
pub struct ManualClock {
    next: i32,
    pending: Vec<FrameId>,
    pub requested: usize,
    pub cancelled: usize,
}

impl FrameClock for ManualClock {
    fn request_frame(&mut self) -> Option<FrameId> {
        self.next += 1;
        self.requested += 1;
        let id = FrameId(self.next);
        self.pending.push(id);
        Some(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let before = self.pending.len();
        self.pending.retain(|p| *p != id);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}

impl ManualClock {
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Run the pending frame, if any. Returns whether a frame ran.
    pub fn fire<C, O>(&mut self, now_ms: f64, component: &mut C, out: &mut O) -> bool
    where
        C: FrameDriven<O>,
        O: ?Sized,
    {
        if self.pending.is_empty() {
            return false;
        }
        self.pending.clear();
        component.on_frame(now_ms, self, out);
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Transform(ElementId, Transform),
    Flag(ElementId, ViewFlag, bool),
    WillChange(ElementId, bool),
    ScrollLeft(ElementId, f64),
    NativeCursor(bool),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub viewport: Viewport,
    pub rects: HashMap<ElementId, Rect>,
    pub scroll_left: HashMap<ElementId, f64>,
    pub scroll_width: HashMap<ElementId, f64>,
    pub writes: Vec<Write>,
}

impl RecordingView {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Viewport { width, height },
            ..Self::default()
        }
    }

    pub fn with_rect(mut self, id: ElementId, rect: Rect) -> Self {
        self.rects.insert(id, rect);
        self
    }

    pub fn transforms(&self, id: ElementId) -> Vec<Transform> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                Write::Transform(el, t) if *el == id => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn last_transform(&self, id: ElementId) -> Option<Transform> {
        self.transforms(id).last().copied()
    }

    pub fn flag_writes(&self, id: ElementId, flag: ViewFlag) -> Vec<bool> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                Write::Flag(el, f, on) if *el == id && *f == flag => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn has_flag(&self, id: ElementId, flag: ViewFlag) -> bool {
        self.flag_writes(id, flag).last().copied().unwrap_or(false)
    }
}

impl ViewAdapter for RecordingView {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.rects.get(&element).copied().unwrap_or_default()
    }

    fn set_transform(&mut self, element: ElementId, transform: Transform) {
        self.writes.push(Write::Transform(element, transform));
    }

    fn set_flag(&mut self, element: ElementId, flag: ViewFlag, on: bool) {
        self.writes.push(Write::Flag(element, flag, on));
    }

    fn set_will_change(&mut self, element: ElementId, on: bool) {
        self.writes.push(Write::WillChange(element, on));
    }

    fn scroll_left(&self, element: ElementId) -> f64 {
        self.scroll_left.get(&element).copied().unwrap_or(0.0)
    }

    fn scroll_width(&self, element: ElementId) -> f64 {
        self.scroll_width.get(&element).copied().unwrap_or(0.0)
    }

    fn set_scroll_left(&mut self, element: ElementId, value: f64) {
        self.scroll_left.insert(element, value);
        self.writes.push(Write::ScrollLeft(element, value));
    }

    fn set_native_cursor_hidden(&mut self, hidden: bool) {
        self.writes.push(Write::NativeCursor(hidden));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    Resize(f64, f64),
    Fade(Rgba),
    Disc { x: f64, y: f64, radius: f64 },
    Line { from: (f64, f64), to: (f64, f64), color: Rgba },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub draws: Vec<Draw>,
}

impl RecordingSurface {
    pub fn count(&self, pred: impl Fn(&Draw) -> bool) -> usize {
        self.draws.iter().filter(|d| pred(d)).count()
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.draws.push(Draw::Resize(width, height));
    }

    fn fade(&mut self, color: Rgba) {
        self.draws.push(Draw::Fade(color));
    }

    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, _inner: Rgba, _outer: Rgba) {
        self.draws.push(Draw::Disc { x, y, radius });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, _width: f64) {
        self.draws.push(Draw::Line { from, to, color });
    }
}
