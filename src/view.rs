//! Output adapters: the typed surface controllers write through.
//!
//! The browser binding implements these over `web_sys`; tests implement them
//! with recording doubles.

use crate::scene::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Element bounds in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Pointer offset from the centre of the rect.
    pub fn offset_from_center(&self, x: f64, y: f64) -> (f64, f64) {
        let (cx, cy) = self.center();
        (x - cx, y - cy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate { x: f64, y: f64 },
    /// Translate to a point, then centre the element on it (overlay layers).
    Anchored { x: f64, y: f64 },
    /// Perspective tilt in degrees.
    Tilt {
        rotate_x: f64,
        rotate_y: f64,
        scale: f64,
    },
}

impl Transform {
    pub const REST: Transform = Transform::Translate { x: 0.0, y: 0.0 };

    pub fn to_css(&self) -> String {
        match *self {
            Transform::Translate { x, y } => format!("translate3d({x}px, {y}px, 0)"),
            Transform::Anchored { x, y } => {
                format!("translate3d({x}px, {y}px, 0) translate3d(-50%, -50%, 0)")
            }
            Transform::Tilt {
                rotate_x,
                rotate_y,
                scale,
            } => format!(
                "perspective(1000px) rotateX({rotate_x}deg) rotateY({rotate_y}deg) scale({scale})"
            ),
        }
    }
}

/// Boolean visual state toggles. Styling them is the stylesheet's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewFlag {
    InView,
    CursorVisible,
    Hovering,
    AnimateIn,
}

impl ViewFlag {
    pub fn class_name(self) -> &'static str {
        match self {
            ViewFlag::InView => "in-view",
            ViewFlag::CursorVisible => "cursor-visible",
            ViewFlag::Hovering => "cursor-hover",
            ViewFlag::AnimateIn => "animate-in",
        }
    }
}

pub trait ViewAdapter {
    fn viewport(&self) -> Viewport;

    fn bounding_rect(&self, element: ElementId) -> Rect;

    fn set_transform(&mut self, element: ElementId, transform: Transform);

    fn set_flag(&mut self, element: ElementId, flag: ViewFlag, on: bool);

    fn set_will_change(&mut self, element: ElementId, on: bool);

    fn scroll_left(&self, element: ElementId) -> f64;

    fn scroll_width(&self, element: ElementId) -> f64;

    fn set_scroll_left(&mut self, element: ElementId, value: f64);

    fn set_native_cursor_hidden(&mut self, hidden: bool);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// 2D drawing surface owned by the particle field.
pub trait Surface {
    fn resize(&mut self, width: f64, height: f64);

    /// Paint `color` over the whole surface.
    fn fade(&mut self, color: Rgba);

    /// Disc of `radius` with a radial gradient from `inner` to `outer`.
    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, inner: Rgba, outer: Rgba);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64);
}
