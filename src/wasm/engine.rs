use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, Window};

use super::dom::{self, DomView, Page};
use super::listener::ListenOptions;
use super::mount::Mounted;
use super::render::{self, CanvasSurface};
use crate::config::EngineConfig;
use crate::cursor::CursorOverlay;
use crate::error::EngineError;
use crate::magnetic::MagneticController;
use crate::marquee::MarqueeController;
use crate::particles::ParticleController;
use crate::scene::ElementId;
use crate::scroll::ScrollAnimator;
use crate::stagger::HeadlineStagger;
use crate::tilt::TiltController;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Every mounted component. Each one is independent; a missing one just
/// means that effect failed to start.
struct Mounts {
    particles: Option<Mounted<ParticleController, CanvasSurface>>,
    scroll: Option<Mounted<ScrollAnimator, DomView>>,
    magnetic: Option<Mounted<MagneticController, DomView>>,
    tilt: Option<Mounted<TiltController, DomView>>,
    marquee: Option<Mounted<MarqueeController, DomView>>,
    stagger: Option<Mounted<HeadlineStagger, DomView>>,
    cursor: Option<Mounted<CursorOverlay, DomView>>,
}

fn degrade<T>(component: &str, result: Result<T, EngineError>) -> Option<T> {
    result
        .map_err(|e| log::warn!("{component} disabled: {e}"))
        .ok()
}

fn pointer(ev: &web_sys::Event) -> Option<(f64, f64)> {
    ev.dyn_ref::<MouseEvent>()
        .map(|m| (m.client_x() as f64, m.client_y() as f64))
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Handle JS holds on to. Effects run between `mount` and `unmount`.
#[wasm_bindgen]
pub struct MotionEngine {
    config: EngineConfig,
    mounts: Option<Mounts>,
}

#[wasm_bindgen]
impl MotionEngine {
    /// `config` is an optional JSON object; unknown or malformed input falls back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> MotionEngine {
        let config = EngineConfig::from_json_or_default(config.as_deref());
        log::set_max_level(config.level_filter());
        MotionEngine {
            config,
            mounts: None,
        }
    }

    /// Attach every effect to the current page. Mounting twice remounts.
    pub fn mount(&mut self) {
        self.unmount();
        match self.try_mount() {
            Ok(mounts) => self.mounts = Some(mounts),
            Err(e) => log::warn!("motion engine not mounted: {e}"),
        }
    }

    /// Detach every listener and cancel every pending frame.
    pub fn unmount(&mut self) {
        if self.mounts.take().is_some() {
            log::debug!("motion engine unmounted");
        }
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounts.is_some()
    }
}

impl MotionEngine {
    fn try_mount(&self) -> Result<Mounts, EngineError> {
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;
        let document = window.document().ok_or(EngineError::NoDocument)?;
        let reduced_motion = self
            .config
            .reduced_motion
            .unwrap_or_else(|| prefers_reduced_motion(&window));
        let page = dom::collect(&window, &document, &self.config)?;

        let mounts = Mounts {
            particles: degrade(
                "particle field",
                render::start(&window, &document, &self.config.canvas_id),
            ),
            scroll: degrade("scroll effects", mount_scroll(&window, &page, reduced_motion)),
            magnetic: degrade(
                "magnetic hover",
                mount_magnetic(&window, &page, self.config.magnetic_max_distance, reduced_motion),
            ),
            tilt: degrade("tilt hover", mount_tilt(&window, &page, reduced_motion)),
            marquee: degrade(
                "marquee",
                mount_marquee(&window, &page, self.config.marquee_speed, reduced_motion),
            ),
            stagger: degrade(
                "headline stagger",
                mount_stagger(&window, &page, self.config.stagger_interval_ms),
            ),
            cursor: degrade(
                "cursor overlay",
                mount_cursor(&window, &document, &page, &self.config),
            ),
        };
        log::debug!("motion engine mounted, reduced motion {reduced_motion}");
        Ok(mounts)
    }
}

fn element(page: &Page, id: ElementId) -> Result<web_sys::HtmlElement, EngineError> {
    page.view
        .element(id)
        .cloned()
        .ok_or_else(|| EngineError::MissingElement(format!("{}", id.0)))
}

fn mount_scroll(
    window: &Window,
    page: &Page,
    reduced_motion: bool,
) -> Result<Mounted<ScrollAnimator, DomView>, EngineError> {
    let animator = ScrollAnimator::from_scene(&page.scene, reduced_motion);
    let mut mounted = Mounted::new(window, animator, page.view.clone());
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    mounted.with(|animator, _clock, view| animator.activate(scroll_y, view));

    let win = window.clone();
    mounted.listen(window, "scroll", ListenOptions::PASSIVE, move |animator, clock, _view, _ev| {
        animator.on_scroll(win.scroll_y().unwrap_or(0.0), clock);
    })?;
    Ok(mounted)
}

fn mount_magnetic(
    window: &Window,
    page: &Page,
    max_distance: f64,
    reduced_motion: bool,
) -> Result<Mounted<MagneticController, DomView>, EngineError> {
    let targets: Vec<ElementId> = page.scene.magnetic_targets().collect();
    let controller = MagneticController::new(targets.iter().copied(), max_distance, reduced_motion);
    let enabled = controller.is_enabled();
    let mut mounted = Mounted::new(window, controller, page.view.clone());
    if !enabled {
        return Ok(mounted);
    }
    mounted.with(|magnetic, _clock, view| magnetic.activate(view));

    for (index, id) in targets.into_iter().enumerate() {
        let el = element(page, id)?;
        mounted.listen(&el, "mousemove", ListenOptions::PLAIN, move |magnetic, clock, view, ev| {
            if let Some((x, y)) = pointer(ev) {
                magnetic.on_pointer_move(index, x, y, &*view, clock);
            }
        })?;
        mounted.listen(&el, "mouseleave", ListenOptions::PLAIN, move |magnetic, clock, _view, _ev| {
            magnetic.on_pointer_leave(index, clock);
        })?;
    }
    Ok(mounted)
}

fn mount_tilt(
    window: &Window,
    page: &Page,
    reduced_motion: bool,
) -> Result<Mounted<TiltController, DomView>, EngineError> {
    let targets: Vec<ElementId> = page.scene.tilt_targets().collect();
    let mut controller = TiltController::new(targets.iter().copied(), reduced_motion);
    controller.activate();
    let idle = reduced_motion || controller.is_empty();
    let mut mounted = Mounted::new(window, controller, page.view.clone());
    if idle {
        return Ok(mounted);
    }

    for (index, id) in targets.into_iter().enumerate() {
        let el = element(page, id)?;
        mounted.listen(&el, "mousemove", ListenOptions::PLAIN, move |tilt, clock, view, ev| {
            if let Some((x, y)) = pointer(ev) {
                tilt.on_pointer_move(index, x, y, &*view, clock);
            }
        })?;
        mounted.listen(&el, "mouseleave", ListenOptions::PLAIN, move |tilt, clock, _view, _ev| {
            tilt.on_pointer_leave(index, clock);
        })?;
    }
    Ok(mounted)
}

fn mount_marquee(
    window: &Window,
    page: &Page,
    speed: f64,
    reduced_motion: bool,
) -> Result<Mounted<MarqueeController, DomView>, EngineError> {
    let strips: Vec<ElementId> = page.scene.marquee_targets().collect();
    let mut mounted = Mounted::new(
        window,
        MarqueeController::new(strips.iter().copied(), speed, reduced_motion),
        page.view.clone(),
    );
    if reduced_motion || strips.is_empty() {
        return Ok(mounted);
    }

    const PAUSE: [(&str, bool, ListenOptions); 5] = [
        ("mouseenter", true, ListenOptions::PLAIN),
        ("mouseleave", false, ListenOptions::PLAIN),
        ("touchstart", true, ListenOptions::PASSIVE),
        ("touchend", false, ListenOptions::PLAIN),
        ("touchcancel", false, ListenOptions::PLAIN),
    ];
    for (index, id) in strips.into_iter().enumerate() {
        let el = element(page, id)?;
        for (event, interacting, options) in PAUSE {
            mounted.listen(&el, event, options, move |marquee, _clock, _view, _ev| {
                marquee.set_interacting(index, interacting);
            })?;
        }
    }
    mounted.with(|marquee, clock, _view| marquee.activate(clock));
    Ok(mounted)
}

fn mount_stagger(
    window: &Window,
    page: &Page,
    interval_ms: f64,
) -> Result<Mounted<HeadlineStagger, DomView>, EngineError> {
    let stagger = HeadlineStagger::new(page.scene.headline.clone(), interval_ms);
    let mounted = Mounted::new(window, stagger, page.view.clone());
    mounted.with(|stagger, clock, _view| stagger.activate(clock));
    Ok(mounted)
}

fn mount_cursor(
    window: &Window,
    document: &Document,
    page: &Page,
    config: &EngineConfig,
) -> Result<Mounted<CursorOverlay, DomView>, EngineError> {
    let layers = page
        .scene
        .cursor
        .ok_or_else(|| EngineError::MissingElement(config.cursor_ring_id.clone()))?;
    let mut mounted = Mounted::new(window, CursorOverlay::new(layers), page.view.clone());
    mounted.with(|cursor, _clock, view| cursor.activate(view));

    mounted.listen(window, "mousemove", ListenOptions::PLAIN, |cursor, clock, _view, ev| {
        if let Some((x, y)) = pointer(ev) {
            cursor.on_pointer_move(x, y, clock);
        }
    })?;

    // capture phase so elements added after mount are covered too
    for (event, entering) in [("mouseenter", true), ("mouseleave", false)] {
        let selector = config.hover_selector.clone();
        mounted.listen(document, event, ListenOptions::CAPTURE, move |cursor, clock, _view, ev| {
            let matches = ev
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.matches(&selector).ok())
                .unwrap_or(false);
            cursor.on_hover_change(matches, entering, clock);
        })?;
    }
    Ok(mounted)
}
