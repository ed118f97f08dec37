//! Two-layer cursor overlay (outer ring and inner dot) that follows the
//! pointer and reacts to hovering interactive elements.

use crate::frame::{Coalesced, FrameClock, FrameDriven};
use crate::scene::{CursorLayers, ElementId};
use crate::view::{Transform, ViewAdapter, ViewFlag};

/// Elements that put the cursor into its hover state.
pub const DEFAULT_HOVER_SELECTOR: &str = "a, button, [data-magnetic]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPhase {
    /// No pointer position known yet.
    Hidden,
    Idle,
    Hovering,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    pub position: (f64, f64),
    pub hovering: bool,
    /// Flips to `true` on the first pointer move and stays there.
    pub visible: bool,
}

impl CursorState {
    pub fn phase(&self) -> CursorPhase {
        match (self.visible, self.hovering) {
            (false, _) => CursorPhase::Hidden,
            (true, false) => CursorPhase::Idle,
            (true, true) => CursorPhase::Hovering,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CursorOverlay {
    layers: CursorLayers,
    state: CursorState,
    slot: Coalesced<(f64, f64)>,
    // what the view currently shows
    shown_visible: bool,
    shown_hovering: bool,
    active: bool,
}

impl CursorOverlay {
    pub fn new(layers: CursorLayers) -> Self {
        Self {
            layers,
            state: CursorState::default(),
            slot: Coalesced::new((0.0, 0.0)),
            shown_visible: false,
            shown_hovering: false,
            active: false,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn phase(&self) -> CursorPhase {
        self.state.phase()
    }

    pub fn activate<V: ViewAdapter + ?Sized>(&mut self, view: &mut V) {
        view.set_native_cursor_hidden(true);
        self.active = true;
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, clock: &mut dyn FrameClock) {
        if !self.active {
            return;
        }
        self.state.position = (x, y);
        self.state.visible = true;
        self.slot.store((x, y), clock);
    }

    /// Capture-phase enter/leave. `matches` says whether the event target
    /// matched the hover selector; other targets are ignored.
    pub fn on_hover_change(&mut self, matches: bool, entering: bool, clock: &mut dyn FrameClock) {
        if !self.active || !matches {
            return;
        }
        self.state.hovering = entering;
        self.slot.schedule(clock);
    }

    fn both<V: ViewAdapter + ?Sized>(&self, view: &mut V, mut write: impl FnMut(&mut V, ElementId)) {
        write(view, self.layers.ring);
        write(view, self.layers.dot);
    }
}

impl<V: ViewAdapter + ?Sized> FrameDriven<V> for CursorOverlay {
    fn on_frame(&mut self, _now_ms: f64, _clock: &mut dyn FrameClock, view: &mut V) {
        let (x, y) = self.slot.take();
        if !self.active || !self.state.visible {
            return;
        }
        if !self.shown_visible {
            self.shown_visible = true;
            self.both(view, |v, el| v.set_flag(el, ViewFlag::CursorVisible, true));
        }
        self.both(view, |v, el| v.set_transform(el, Transform::Anchored { x, y }));

        let hovering = self.state.hovering;
        if self.shown_hovering != hovering {
            self.shown_hovering = hovering;
            self.both(view, |v, el| v.set_flag(el, ViewFlag::Hovering, hovering));
        }
    }

    fn deactivate(&mut self, clock: &mut dyn FrameClock, view: &mut V) {
        self.slot.cancel(clock);
        if self.active {
            self.active = false;
            view.set_native_cursor_hidden(false);
        }
    }
}
