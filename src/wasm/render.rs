use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use super::dom::inner_size;
use super::listener::ListenOptions;
use super::mount::Mounted;
use crate::error::EngineError;
use crate::particles::{ParticleController, ParticleField};
use crate::view::{Rgba, Surface};

/// 2D canvas context backing the particle field.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(EngineError::SurfaceUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::SurfaceUnavailable)?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn fade(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, inner: Rgba, outer: Rgba) {
        let ctx = &self.ctx;
        ctx.begin_path();
        if ctx.arc(x, y, radius, 0.0, TAU).is_err() {
            return;
        }
        let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, radius * 2.0) else {
            return;
        };
        for (offset, color) in [(0.0, inner), (1.0, outer)] {
            if let Err(e) = gradient.add_color_stop(offset, &color.to_css()) {
                log::debug!("gradient stop {color:?} rejected: {:?}", e);
                return;
            }
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(from.0, from.1);
        ctx.line_to(to.0, to.1);
        ctx.set_stroke_style_str(&color.to_css());
        ctx.set_line_width(width);
        ctx.stroke();
    }
}

/// Start the particle loop on the canvas with id `canvas_id` and keep the
/// canvas sized to the window.
pub fn start(
    window: &Window,
    document: &Document,
    canvas_id: &str,
) -> Result<Mounted<ParticleController, CanvasSurface>, EngineError> {
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| EngineError::MissingElement(canvas_id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| EngineError::SurfaceUnavailable)?;
    let surface = CanvasSurface::new(canvas)?;

    let size = inner_size(window);
    let field = ParticleField::new(size.width, size.height, &mut rand::thread_rng());
    let mut mounted = Mounted::new(window, ParticleController::new(field), surface);
    mounted.with(|particles, clock, surface| particles.activate(clock, surface));

    let win = window.clone();
    mounted.listen(window, "resize", ListenOptions::PLAIN, move |particles, _clock, surface, _ev| {
        let size = inner_size(&win);
        particles.on_resize(size.width, size.height, surface);
    })?;

    Ok(mounted)
}
