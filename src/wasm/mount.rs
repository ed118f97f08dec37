use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, Window};

use super::listener::{ListenOptions, Listener, WebClock};
use crate::error::EngineError;
use crate::frame::FrameDriven;

struct Shared<C, O> {
    controller: C,
    out: O,
    clock: WebClock,
}

/// A controller wired to the page: its output adapter, its frame closure and
/// every listener it registered. Dropping it tears all of that down.
pub struct Mounted<C: FrameDriven<O>, O> {
    shared: Rc<RefCell<Shared<C, O>>>,
    listeners: Vec<Listener>,
}

impl<C: FrameDriven<O> + 'static, O: 'static> Mounted<C, O> {
    pub fn new(window: &Window, controller: C, out: O) -> Self {
        let shared = Rc::new(RefCell::new(Shared {
            controller,
            out,
            clock: WebClock::new(window.clone()),
        }));

        // The closure lives inside `shared`, so it only holds a weak handle.
        let weak = Rc::downgrade(&shared);
        let on_frame = Closure::wrap(Box::new(move |now: f64| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Ok(mut guard) = shared.try_borrow_mut() else {
                return;
            };
            let Shared {
                controller,
                out,
                clock,
            } = &mut *guard;
            controller.on_frame(now, clock, out);
        }) as Box<dyn FnMut(f64)>);
        shared.borrow_mut().clock.callback = Some(on_frame);

        Self {
            shared,
            listeners: Vec::new(),
        }
    }

    /// Run `f` against the controller, its clock and its output.
    /// Returns `None` if the controller is busy in another callback.
    pub fn with<R>(&self, f: impl FnOnce(&mut C, &mut WebClock, &mut O) -> R) -> Option<R> {
        let mut guard = self.shared.try_borrow_mut().ok()?;
        let Shared {
            controller,
            out,
            clock,
        } = &mut *guard;
        Some(f(controller, clock, out))
    }

    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        options: ListenOptions,
        mut handler: impl FnMut(&mut C, &mut WebClock, &mut O, &Event) + 'static,
    ) -> Result<(), EngineError> {
        let weak = Rc::downgrade(&self.shared);
        let listener = Listener::new(target, event, options, move |ev: Event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Ok(mut guard) = shared.try_borrow_mut() else {
                log::debug!("{event} dropped, controller busy");
                return;
            };
            let Shared {
                controller,
                out,
                clock,
            } = &mut *guard;
            handler(controller, clock, out, &ev);
        })?;
        self.listeners.push(listener);
        Ok(())
    }
}

impl<C: FrameDriven<O>, O> Drop for Mounted<C, O> {
    fn drop(&mut self) {
        self.listeners.clear();
        match self.shared.try_borrow_mut() {
            Ok(mut guard) => {
                let Shared {
                    controller,
                    out,
                    clock,
                } = &mut *guard;
                controller.deactivate(clock, out);
                clock.callback = None;
            }
            Err(_) => log::warn!("controller dropped while busy"),
        }
    }
}
