//! Magnetic hover: tagged elements lean toward the pointer, capped at a
//! fixed distance, and glide back to rest when the pointer leaves.

use crate::frame::{Coalesced, FrameClock, FrameDriven};
use crate::scene::ElementId;
use crate::view::{Rect, Transform, ViewAdapter};

pub const DEFAULT_MAX_DISTANCE: f64 = 18.0;
pub const MIN_MAX_DISTANCE: f64 = 18.0;
pub const MAX_MAX_DISTANCE: f64 = 20.0;
/// Pointer distance at which the pull reaches full strength.
pub const FULL_STRENGTH_DISTANCE: f64 = 100.0;

/// Displacement for a pointer at `(dx, dy)` from the centre of `rect`.
///
/// The result never exceeds `max_distance` in magnitude.
pub fn displacement(dx: f64, dy: f64, rect: &Rect, max_distance: f64) -> (f64, f64) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return (0.0, 0.0);
    }
    let distance = (dx * dx + dy * dy).sqrt();
    let strength = (distance / FULL_STRENGTH_DISTANCE).min(1.0);
    let x = dx / rect.width * max_distance * strength;
    let y = dy / rect.height * max_distance * strength;

    let magnitude = (x * x + y * y).sqrt();
    if magnitude > max_distance {
        let k = max_distance / magnitude;
        (x * k, y * k)
    } else {
        (x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticTarget {
    pub element: ElementId,
    pub offset: (f64, f64),
    dirty: bool,
}

#[derive(Debug, Clone)]
pub struct MagneticController {
    targets: Vec<MagneticTarget>,
    slot: Coalesced<()>,
    max_distance: f64,
    enabled: bool,
    active: bool,
}

impl MagneticController {
    pub fn new(
        elements: impl IntoIterator<Item = ElementId>,
        max_distance: f64,
        reduced_motion: bool,
    ) -> Self {
        Self {
            targets: elements
                .into_iter()
                .map(|element| MagneticTarget {
                    element,
                    offset: (0.0, 0.0),
                    dirty: false,
                })
                .collect(),
            slot: Coalesced::new(()),
            max_distance: max_distance.clamp(MIN_MAX_DISTANCE, MAX_MAX_DISTANCE),
            enabled: !reduced_motion,
            active: false,
        }
    }

    pub fn targets(&self) -> &[MagneticTarget] {
        &self.targets
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn activate<V: ViewAdapter + ?Sized>(&mut self, view: &mut V) {
        if !self.enabled {
            return;
        }
        for target in &self.targets {
            view.set_will_change(target.element, true);
        }
        self.active = true;
    }

    /// Pointer moved over target `index`, at viewport coordinates `(x, y)`.
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
        let max_distance = self.max_distance;
        let Some(target) = self.targets.get_mut(index) else {
            return;
        };
        let rect = view.bounding_rect(target.element);
        let (dx, dy) = rect.offset_from_center(x, y);
        target.offset = displacement(dx, dy, &rect, max_distance);
        target.dirty = true;
        self.slot.schedule(clock);
    }

    /// Send target `index` back to rest on the next frame.
    pub fn on_pointer_leave(&mut self, index: usize, clock: &mut dyn FrameClock) {
        if !self.active {
            return;
        }
        let Some(target) = self.targets.get_mut(index) else {
            return;
        };
        target.offset = (0.0, 0.0);
        target.dirty = true;
        self.slot.schedule(clock);
    }
}

impl<V: ViewAdapter + ?Sized> FrameDriven<V> for MagneticController {
    fn on_frame(&mut self, _now_ms: f64, _clock: &mut dyn FrameClock, view: &mut V) {
        self.slot.take();
        if !self.active {
            return;
        }
        for target in self.targets.iter_mut().filter(|t| t.dirty) {
            target.dirty = false;
            let (x, y) = target.offset;
            view.set_transform(target.element, Transform::Translate { x, y });
        }
    }

    fn deactivate(&mut self, clock: &mut dyn FrameClock, view: &mut V) {
        self.slot.cancel(clock);
        if !self.active {
            return;
        }
        self.active = false;
        for target in &mut self.targets {
            target.offset = (0.0, 0.0);
            target.dirty = false;
            view.set_will_change(target.element, false);
            view.set_transform(target.element, Transform::REST);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_has_no_pull() {
        let rect = Rect::new(0.0, 0.0, 120.0, 40.0);
        assert_eq!(displacement(0.0, 0.0, &rect, 18.0), (0.0, 0.0));
    }

    #[test]
    fn strength_scales_with_distance() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        // 50px away: half strength, half the width
        let (x, y) = displacement(50.0, 0.0, &rect, 18.0);
        assert!((x - 0.5 * 18.0 * 0.5).abs() < 1e-12);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn degenerate_rect_yields_rest() {
        let rect = Rect::new(10.0, 10.0, 0.0, 30.0);
        assert_eq!(displacement(5.0, 5.0, &rect, 18.0), (0.0, 0.0));
    }

    #[test]
    fn pointer_far_outside_is_capped() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (x, y) = displacement(1000.0, -1000.0, &rect, 20.0);
        assert!(((x * x + y * y).sqrt() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn max_distance_is_clamped() {
        let c = MagneticController::new([ElementId(0)], 50.0, false);
        assert_eq!(c.max_distance(), MAX_MAX_DISTANCE);
        let c = MagneticController::new([ElementId(0)], 1.0, false);
        assert_eq!(c.max_distance(), MIN_MAX_DISTANCE);
    }
}
