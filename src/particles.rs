//! Background particle field: a fixed point cloud that drifts, bounces off
//! the viewport edges and links nearby points with fading lines.

use rand::Rng;

use crate::frame::{FrameClock, FrameDriven, FrameId};
use crate::view::{Rgba, Surface};

/// Linking is all-pairs, so the count stays small and fixed. Raising it
/// needs a spatial index first.
pub const PARTICLE_COUNT: usize = 80;
pub const LINK_RADIUS: f64 = 150.0;
pub const LINK_ALPHA: f64 = 0.15;
pub const LINK_WIDTH: f64 = 0.5;
pub const MAX_SPEED: f64 = 0.25;
pub const MIN_SIZE: f64 = 1.0;
pub const MAX_SIZE: f64 = 3.0;

/// Trail fade painted every frame. Trail length follows the refresh rate.
pub const FADE: Rgba = Rgba::new(10, 10, 20, 0.1);
pub const CORE_COLOR: Rgba = Rgba::new(34, 211, 238, 0.8);
pub const EDGE_COLOR: Rgba = Rgba::new(147, 51, 234, 0.2);
pub const LINK_COLOR: Rgba = Rgba::new(34, 211, 238, 0.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
}

impl Particle {
    /// Advance one tick and reflect off the walls of a `width` x `height` box.
    ///
    /// Position is not clamped. A velocity component only flips while it still
    /// points away from the box, so a particle left outside by a resize heads
    /// back in instead of jittering on the edge.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if (self.x < 0.0 && self.vx < 0.0) || (self.x > width && self.vx > 0.0) {
            self.vx = -self.vx;
        }
        if (self.y < 0.0 && self.vy < 0.0) || (self.y > height && self.vy > 0.0) {
            self.vy = -self.vy;
        }
    }
}

/// Opacity of the link between two points, or `None` when they are too far apart.
pub fn link_alpha(a: &Particle, b: &Particle) -> Option<f64> {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dist = (dx * dx + dy * dy).sqrt();
    (dist < LINK_RADIUS).then(|| LINK_ALPHA * (1.0 - dist / LINK_RADIUS))
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(width: f64, height: f64, rng: &mut R) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                x: rng.gen::<f64>() * width,
                y: rng.gen::<f64>() * height,
                vx: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
                vy: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
                size: rng.gen_range(MIN_SIZE..=MAX_SIZE),
            })
            .collect();
        Self {
            particles,
            width,
            height,
        }
    }

    /// Build a field from explicit particles.
    pub fn from_particles(width: f64, height: f64, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            width,
            height,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Only the bounds change; particles keep their positions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.advance(w, h);
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fade(FADE);

        for p in &self.particles {
            surface.fill_disc(p.x, p.y, p.size, CORE_COLOR, EDGE_COLOR);
        }

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if let Some(alpha) = link_alpha(a, b) {
                    surface.stroke_line(
                        (a.x, a.y),
                        (b.x, b.y),
                        LINK_COLOR.with_alpha(alpha),
                        LINK_WIDTH,
                    );
                }
            }
        }
    }
}

/// Runs the field on a continuous frame loop. Without a field it is inert.
#[derive(Debug)]
pub struct ParticleController {
    field: Option<ParticleField>,
    pending: Option<FrameId>,
    active: bool,
}

impl ParticleController {
    pub fn new(field: ParticleField) -> Self {
        Self {
            field: Some(field),
            pending: None,
            active: false,
        }
    }

    /// A controller for a page without a usable drawing surface.
    pub fn inert() -> Self {
        Self {
            field: None,
            pending: None,
            active: false,
        }
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Size the surface, draw the first frame and start the loop.
    pub fn activate<S: Surface + ?Sized>(&mut self, clock: &mut dyn FrameClock, surface: &mut S) {
        if self.active {
            return;
        }
        let Some(field) = self.field.as_mut() else {
            log::debug!("particle field inert, no surface");
            return;
        };
        let (w, h) = field.size();
        surface.resize(w, h);
        field.step();
        field.render(surface);
        self.active = true;
        self.pending = clock.request_frame();
    }

    pub fn on_resize<S: Surface + ?Sized>(&mut self, width: f64, height: f64, surface: &mut S) {
        if !self.active {
            return;
        }
        if let Some(field) = self.field.as_mut() {
            field.resize(width, height);
            surface.resize(width, height);
        }
    }
}

impl<S: Surface + ?Sized> FrameDriven<S> for ParticleController {
    fn on_frame(&mut self, _now_ms: f64, clock: &mut dyn FrameClock, surface: &mut S) {
        self.pending = None;
        if !self.active {
            return;
        }
        if let Some(field) = self.field.as_mut() {
            field.step();
            field.render(surface);
            self.pending = clock.request_frame();
        }
    }

    fn deactivate(&mut self, clock: &mut dyn FrameClock, _surface: &mut S) {
        self.active = false;
        if let Some(id) = self.pending.take() {
            clock.cancel_frame(id);
        }
    }
}
