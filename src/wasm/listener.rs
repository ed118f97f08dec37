use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Event, EventTarget, Window};

use crate::frame::{FrameClock, FrameId};

#[derive(Debug, Clone, Copy)]
pub struct ListenOptions {
    pub capture: bool,
    pub passive: bool,
}

impl ListenOptions {
    pub const PLAIN: ListenOptions = ListenOptions {
        capture: false,
        passive: false,
    };
    pub const PASSIVE: ListenOptions = ListenOptions {
        capture: false,
        passive: true,
    };
    pub const CAPTURE: ListenOptions = ListenOptions {
        capture: true,
        passive: false,
    };
}

/// Event listener registration that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        options: ListenOptions,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let opts = AddEventListenerOptions::new();
        opts.set_capture(options.capture);
        opts.set_passive(options.passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &opts,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            capture: options.capture,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self.target.remove_event_listener_with_callback_and_bool(
            self.event,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        ) {
            log::warn!("failed to remove {} listener: {:?}", self.event, e);
        }
    }
}

/// `requestAnimationFrame` clock for one component.
///
/// `callback` holds the component's frame closure; it is filled in after the
/// component is shared so the closure can reach back into it.
pub struct WebClock {
    window: Window,
    pub(super) callback: Option<Closure<dyn FnMut(f64)>>,
}

impl WebClock {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }
}

impl FrameClock for WebClock {
    fn request_frame(&mut self) -> Option<FrameId> {
        let callback = self.callback.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameId(id)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id.0) {
            log::debug!("cancelAnimationFrame({}) failed: {:?}", id.0, e);
        }
    }
}
