//! Perspective tilt on hover.

use crate::frame::{Coalesced, FrameClock, FrameDriven};
use crate::scene::ElementId;
use crate::view::{Rect, Transform, ViewAdapter};

/// Rotation in degrees when the pointer sits on the element's edge.
pub const MAX_TILT_DEG: f64 = 15.0;
pub const HOVER_SCALE: f64 = 1.05;

pub const REST: Transform = Transform::Tilt {
    rotate_x: 0.0,
    rotate_y: 0.0,
    scale: 1.0,
};

/// Tilt for a pointer at `(dx, dy)` from the centre of `rect`.
pub fn tilt_for(dx: f64, dy: f64, rect: &Rect) -> Transform {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return REST;
    }
    Transform::Tilt {
        rotate_x: dy / rect.height * MAX_TILT_DEG,
        rotate_y: -(dx / rect.width) * MAX_TILT_DEG,
        scale: HOVER_SCALE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TiltTarget {
    element: ElementId,
    pose: Transform,
    dirty: bool,
}

#[derive(Debug, Clone)]
pub struct TiltController {
    targets: Vec<TiltTarget>,
    slot: Coalesced<()>,
    enabled: bool,
    active: bool,
}

impl TiltController {
    pub fn new(elements: impl IntoIterator<Item = ElementId>, reduced_motion: bool) -> Self {
        Self {
            targets: elements
                .into_iter()
                .map(|element| TiltTarget {
                    element,
                    pose: REST,
                    dirty: false,
                })
                .collect(),
            slot: Coalesced::new(()),
            enabled: !reduced_motion,
            active: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn pose(&self, index: usize) -> Option<Transform> {
        self.targets.get(index).map(|t| t.pose)
    }

    pub fn activate(&mut self) {
        self.active = self.enabled;
    }

    pub fn on_pointer_move<V: ViewAdapter + ?Sized>(
        &mut self,
        index: usize,
        x: f64,
        y: f64,
        view: &V,
        clock: &mut dyn FrameClock,
    ) {
        if !self.active {
            return;
        }
        let Some(target) = self.targets.get_mut(index) else {
            return;
        };
        let rect = view.bounding_rect(target.element);
        let (dx, dy) = rect.offset_from_center(x, y);
        target.pose = tilt_for(dx, dy, &rect);
        target.dirty = true;
        self.slot.schedule(clock);
    }

    pub fn on_pointer_leave(&mut self, index: usize, clock: &mut dyn FrameClock) {
        if !self.active {
            return;
        }
        let Some(target) = self.targets.get_mut(index) else {
            return;
        };
        target.pose = REST;
        target.dirty = true;
        self.slot.schedule(clock);
    }
}

impl<V: ViewAdapter + ?Sized> FrameDriven<V> for TiltController {
    fn on_frame(&mut self, _now_ms: f64, _clock: &mut dyn FrameClock, view: &mut V) {
        self.slot.take();
        if !self.active {
            return;
        }
        for target in self.targets.iter_mut().filter(|t| t.dirty) {
            target.dirty = false;
            view.set_transform(target.element, target.pose);
        }
    }

    fn deactivate(&mut self, clock: &mut dyn FrameClock, _view: &mut V) {
        self.active = false;
        self.slot.cancel(clock);
    }
}
