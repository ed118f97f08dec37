use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::scene::{ElementId, Scene, TargetKind};
use crate::view::{Rect, Transform, ViewAdapter, ViewFlag, Viewport};

pub fn inner_size(window: &Window) -> Viewport {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport {
        width: read(window.inner_width()),
        height: read(window.inner_height()),
    }
}

/// `ViewAdapter` over an arena of page elements indexed by `ElementId`.
#[derive(Clone)]
pub struct DomView {
    window: Window,
    body: Option<HtmlElement>,
    elements: Rc<Vec<HtmlElement>>,
}

impl DomView {
    pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(id.0)
    }

    fn style_write(&self, id: ElementId, property: &str, value: Option<&str>) {
        let Some(el) = self.element(id) else {
            return;
        };
        let style = el.style();
        let result = match value {
            Some(value) => style.set_property(property, value),
            None => style.remove_property(property).map(|_| ()),
        };
        if let Err(e) = result {
            log::debug!("style {property} write failed: {:?}", e);
        }
    }
}

impl ViewAdapter for DomView {
    fn viewport(&self) -> Viewport {
        inner_size(&self.window)
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.element(element)
            .map(|el| {
                let r = el.get_bounding_client_rect();
                Rect::new(r.left(), r.top(), r.width(), r.height())
            })
            .unwrap_or_default()
    }

    fn set_transform(&mut self, element: ElementId, transform: Transform) {
        self.style_write(element, "transform", Some(&transform.to_css()));
    }

    fn set_flag(&mut self, element: ElementId, flag: ViewFlag, on: bool) {
        if let Some(el) = self.element(element) {
            if let Err(e) = el.class_list().toggle_with_force(flag.class_name(), on) {
                log::debug!("class {} toggle failed: {:?}", flag.class_name(), e);
            }
        }
    }

    fn set_will_change(&mut self, element: ElementId, on: bool) {
        self.style_write(element, "will-change", on.then_some("transform"));
    }

    fn scroll_left(&self, element: ElementId) -> f64 {
        // read through Reflect to keep sub-pixel offsets
        self.element(element)
            .and_then(|el| js_sys::Reflect::get(el, &JsValue::from_str("scrollLeft")).ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_width(&self, element: ElementId) -> f64 {
        self.element(element)
            .map(|el| el.scroll_width() as f64)
            .unwrap_or(0.0)
    }

    fn set_scroll_left(&mut self, element: ElementId, value: f64) {
        if let Some(el) = self.element(element) {
            if let Err(e) = js_sys::Reflect::set(el, &JsValue::from_str("scrollLeft"), &JsValue::from_f64(value)) {
                log::debug!("scrollLeft write failed: {:?}", e);
            }
        }
    }

    fn set_native_cursor_hidden(&mut self, hidden: bool) {
        if let Some(body) = &self.body {
            let cursor = if hidden { "none" } else { "auto" };
            if let Err(e) = body.style().set_property("cursor", cursor) {
                log::debug!("body cursor write failed: {:?}", e);
            }
        }
    }
}

/// The page's typed scene plus the element arena backing it.
pub struct Page {
    pub scene: Scene,
    pub view: DomView,
}

/// Scan the document once for marked elements, the cursor layers and the
/// headline letters.
pub fn collect(window: &Window, document: &Document, config: &EngineConfig) -> Result<Page, EngineError> {
    let mut elements: Vec<HtmlElement> = Vec::new();
    let mut scene = Scene::new();

    let nodes = document.query_selector_all(&TargetKind::selector())?;
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let id = ElementId(elements.len());
        for name in TargetKind::ATTRIBUTES {
            if let Some(kind) = el
                .get_attribute(name)
                .and_then(|value| TargetKind::from_attribute(name, &value))
            {
                scene.push(id, kind);
            }
        }
        elements.push(el);
    }

    let by_id = |id: &str| {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    };

    if let (Some(ring), Some(dot)) = (by_id(&config.cursor_ring_id), by_id(&config.cursor_dot_id)) {
        let ring_id = ElementId(elements.len());
        elements.push(ring);
        let dot_id = ElementId(elements.len());
        elements.push(dot);
        scene = scene.with_cursor(ring_id, dot_id);
    }

    if let Some(headline) = by_id(&config.headline_id) {
        let letters = headline.children();
        let mut ids = Vec::new();
        for i in 0..letters.length() {
            if let Some(letter) = letters.item(i).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
                ids.push(ElementId(elements.len()));
                elements.push(letter);
            }
        }
        scene = scene.with_headline(ids);
    }

    log::debug!(
        "scene: {} targets, cursor {}, {} headline letters",
        scene.targets.len(),
        scene.cursor.is_some(),
        scene.headline.len()
    );

    Ok(Page {
        scene,
        view: DomView {
            window: window.clone(),
            body: document.body(),
            elements: Rc::new(elements),
        },
    })
}
