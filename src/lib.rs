#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Pointer- and scroll-driven page effects: particle background, scroll
//! reveal, parallax, magnetic and tilt hover, marquee strips, staggered
//! headline and a custom cursor overlay.
//!
//! The controllers are host-agnostic. They write through [`view::ViewAdapter`]
//! and [`view::Surface`] and schedule work through [`frame::FrameClock`], so
//! they run under `cargo test` on the host as well as in the browser.

pub mod config;
pub mod cursor;
pub mod error;
pub mod frame;
pub mod magnetic;
pub mod marquee;
pub mod particles;
pub mod scene;
pub mod scroll;
pub mod stagger;
pub mod tilt;
pub mod view;

pub use config::EngineConfig;
pub use error::EngineError;
pub use frame::{Coalesced, FrameClock, FrameDriven, FrameId};
pub use scene::{ElementId, Scene, TargetKind};
pub use view::{Rect, Rgba, Surface, Transform, ViewAdapter, ViewFlag, Viewport};

// Only compile the browser binding when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod dom;
    mod engine;
    mod listener;
    mod mount;
    mod render;

    pub use engine::MotionEngine;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::warn!("a logger is already installed, keeping it");
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::MotionEngine;
