//! DOM backend
//!
//! Drives the real page through inline styles and the `hidden` class, and hands
//! confetti bursts to the global `confetti()` function from canvas-confetti.

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

use glam::Vec2;

use super::{Element, ParticleEmitter, Renderer};
use crate::error::InitError;
use crate::sim::{Burst, Rect, translate_css};

/// Class toggled to show/hide elements
const HIDDEN_CLASS: &str = "hidden";

/// Element ids (and the background selector) expected in the page
pub mod ids {
    pub const AFFIRMATIVE: &str = "yesBtn";
    pub const EVASIVE: &str = "noBtn";
    pub const CARD: &str = "mainContainer";
    pub const CELEBRATION: &str = "celebrationContent";
    pub const RETRY_PROMPT: &str = "retryModal";
    pub const DISMISS: &str = "closeModal";
    pub const BACKGROUND_SELECTOR: &str = ".bg-layer";
}

/// Every element the card needs, located once at startup
#[derive(Clone)]
pub struct DomHandles {
    pub card: HtmlElement,
    pub affirmative: HtmlElement,
    pub evasive: HtmlElement,
    pub celebration: HtmlElement,
    pub retry_prompt: HtmlElement,
    pub dismiss: HtmlElement,
    pub background: HtmlElement,
    pub body: HtmlElement,
}

fn by_id(document: &Document, id: &'static str) -> Result<HtmlElement, InitError> {
    document
        .get_element_by_id(id)
        .ok_or(InitError::MissingElement(id))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| InitError::WrongElementType(id))
}

fn by_selector(document: &Document, selector: &'static str) -> Result<HtmlElement, InitError> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or(InitError::MissingElement(selector))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| InitError::WrongElementType(selector))
}

impl DomHandles {
    /// Find all elements; any missing one is fatal
    pub fn locate(document: &Document) -> Result<Self, InitError> {
        Ok(Self {
            card: by_id(document, ids::CARD)?,
            affirmative: by_id(document, ids::AFFIRMATIVE)?,
            evasive: by_id(document, ids::EVASIVE)?,
            celebration: by_id(document, ids::CELEBRATION)?,
            retry_prompt: by_id(document, ids::RETRY_PROMPT)?,
            dismiss: by_id(document, ids::DISMISS)?,
            background: by_selector(document, ids::BACKGROUND_SELECTOR)?,
            body: document.body().ok_or(InitError::NoBody)?,
        })
    }
}

/// [`Renderer`] over the live page
pub struct DomRenderer {
    window: Window,
    handles: DomHandles,
}

impl DomRenderer {
    pub fn new(window: Window, handles: DomHandles) -> Self {
        Self { window, handles }
    }

    fn element(&self, el: Element) -> &HtmlElement {
        match el {
            Element::Card => &self.handles.card,
            Element::EvasiveButton => &self.handles.evasive,
            Element::CelebrationPanel => &self.handles.celebration,
            Element::RetryPrompt => &self.handles.retry_prompt,
            Element::Background => &self.handles.background,
            Element::Document => &self.handles.body,
        }
    }
}

impl Renderer for DomRenderer {
    fn viewport(&self) -> Vec2 {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Vec2::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
    }

    fn measure(&self, el: Element) -> Rect {
        let r = self.element(el).get_bounding_client_rect();
        Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
    }

    fn set_style(&mut self, el: Element, property: &str, value: &str) {
        let _ = self.element(el).style().set_property(property, value);
    }

    fn detach(&mut self, el: Element, pos: Vec2) {
        let node = self.element(el);
        let style = node.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("left", "0px");
        let _ = style.set_property("top", "0px");
        let _ = style.set_property("transform", &translate_css(pos));
        let _ = style.set_property("z-index", "1000");
        // Reparent under <body> so the card's own transform doesn't apply
        if let Err(e) = self.handles.body.append_child(node) {
            log::warn!("Failed to move {:?} under body: {:?}", el, e);
        }
    }

    fn show(&mut self, el: Element) {
        let _ = self.element(el).class_list().remove_1(HIDDEN_CLASS);
    }

    fn hide(&mut self, el: Element) {
        let _ = self.element(el).class_list().add_1(HIDDEN_CLASS);
    }

    fn add_class(&mut self, el: Element, class: &str) {
        let _ = self.element(el).class_list().add_1(class);
    }

    fn remove(&mut self, el: Element) {
        self.element(el).remove();
    }
}

#[wasm_bindgen]
extern "C" {
    /// canvas-confetti global
    #[wasm_bindgen(js_name = confetti, catch)]
    fn confetti_js(options: &JsValue) -> Result<JsValue, JsValue>;
}

/// [`ParticleEmitter`] backed by canvas-confetti
#[derive(Default)]
pub struct CanvasConfetti {
    warned: bool,
}

impl ParticleEmitter for CanvasConfetti {
    fn emit(&mut self, burst: &Burst) {
        let options = serde_json::to_string(burst)
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|json| js_sys::JSON::parse(&json));
        let result = options.and_then(|opts| confetti_js(&opts));
        if let Err(e) = result {
            // Page without the library still celebrates, just quietly
            if !self.warned {
                log::warn!("confetti() failed: {:?}", e);
                self.warned = true;
            }
        }
    }
}
