//! Scroll-driven effects: one-shot reveal and scroll-proportional parallax,
//! sharing a single coalesced scroll tick.

use crate::frame::{Coalesced, FrameClock, FrameDriven};
use crate::scene::{ElementId, Scene};
use crate::view::{Transform, ViewAdapter, ViewFlag};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTarget {
    pub element: ElementId,
    /// Monotonic: never returns to `false` once set.
    pub revealed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RevealController {
    targets: Vec<RevealTarget>,
}

impl RevealController {
    pub fn new(elements: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            targets: elements
                .into_iter()
                .map(|element| RevealTarget {
                    element,
                    revealed: false,
                })
                .collect(),
        }
    }

    pub fn targets(&self) -> &[RevealTarget] {
        &self.targets
    }

    /// Mark every target whose vertical midpoint lies strictly inside the viewport.
    pub fn apply<V: ViewAdapter + ?Sized>(&mut self, view: &mut V) {
        let viewport_height = view.viewport().height;
        for target in self.targets.iter_mut().filter(|t| !t.revealed) {
            let rect = view.bounding_rect(target.element);
            let mid = rect.top + rect.height / 2.0;
            if mid > 0.0 && mid < viewport_height {
                target.revealed = true;
                view.set_flag(target.element, ViewFlag::InView, true);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxTarget {
    pub element: ElementId,
    pub speed: f64,
}

impl ParallaxTarget {
    pub fn offset(&self, scroll_y: f64) -> f64 {
        -(scroll_y * self.speed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParallaxController {
    targets: Vec<ParallaxTarget>,
    enabled: bool,
}

impl ParallaxController {
    pub fn new(targets: impl IntoIterator<Item = (ElementId, f64)>, reduced_motion: bool) -> Self {
        Self {
            targets: targets
                .into_iter()
                .map(|(element, speed)| ParallaxTarget { element, speed })
                .collect(),
            enabled: !reduced_motion,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn targets(&self) -> &[ParallaxTarget] {
        &self.targets
    }

    pub fn apply<V: ViewAdapter + ?Sized>(&self, scroll_y: f64, view: &mut V) {
        if !self.enabled {
            return;
        }
        for target in &self.targets {
            view.set_transform(
                target.element,
                Transform::Translate {
                    x: 0.0,
                    y: target.offset(scroll_y),
                },
            );
        }
    }
}

/// Owns the scroll slot and drives reveal and parallax from it.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    reveal: RevealController,
    parallax: ParallaxController,
    slot: Coalesced<f64>,
    active: bool,
}

impl ScrollAnimator {
    pub fn new(reveal: RevealController, parallax: ParallaxController) -> Self {
        Self {
            reveal,
            parallax,
            slot: Coalesced::new(0.0),
            active: false,
        }
    }

    pub fn from_scene(scene: &Scene, reduced_motion: bool) -> Self {
        Self::new(
            RevealController::new(scene.reveal_targets()),
            ParallaxController::new(scene.parallax_targets(), reduced_motion),
        )
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn parallax(&self) -> &ParallaxController {
        &self.parallax
    }

    /// Start listening and run one tick right away so elements already on
    /// screen are revealed before any scroll happens.
    pub fn activate<V: ViewAdapter + ?Sized>(&mut self, scroll_y: f64, view: &mut V) {
        self.active = true;
        self.slot = Coalesced::new(scroll_y);
        self.tick(scroll_y, view);
    }

    pub fn on_scroll(&mut self, scroll_y: f64, clock: &mut dyn FrameClock) {
        if !self.active {
            return;
        }
        self.slot.store(scroll_y, clock);
    }

    fn tick<V: ViewAdapter + ?Sized>(&mut self, scroll_y: f64, view: &mut V) {
        self.reveal.apply(view);
        self.parallax.apply(scroll_y, view);
    }
}

impl<V: ViewAdapter + ?Sized> FrameDriven<V> for ScrollAnimator {
    fn on_frame(&mut self, _now_ms: f64, _clock: &mut dyn FrameClock, view: &mut V) {
        let scroll_y = self.slot.take();
        if self.active {
            self.tick(scroll_y, view);
        }
    }

    fn deactivate(&mut self, clock: &mut dyn FrameClock, _view: &mut V) {
        self.active = false;
        self.slot.cancel(clock);
    }
}
