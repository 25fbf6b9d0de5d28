//! Headless renderer that records every call
//!
//! Used by the unit tests and by the native build, which has no page.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::{Element, ParticleEmitter, Renderer};
use crate::sim::{Burst, Rect};

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Style {
        el: Element,
        property: String,
        value: String,
    },
    Detach {
        el: Element,
        pos: Vec2,
    },
    Show(Element),
    Hide(Element),
    AddClass(Element, String),
    Remove(Element),
}

/// In-memory page: element rects, visibility and a call log
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    pub viewport: Vec2,
    rects: HashMap<Element, Rect>,
    hidden: HashSet<Element>,
    removed: HashSet<Element>,
    styles: HashMap<(Element, String), String>,
    pub calls: Vec<Call>,
}

impl RecordingRenderer {
    /// A 1280x720 page with the No button docked inside the card and the
    /// prompt/panel hidden, like the real markup.
    pub fn new() -> Self {
        let mut rects = HashMap::new();
        rects.insert(Element::Card, Rect::new(440.0, 210.0, 400.0, 300.0));
        rects.insert(Element::EvasiveButton, Rect::new(660.0, 420.0, 120.0, 44.0));
        rects.insert(Element::RetryPrompt, Rect::new(490.0, 260.0, 300.0, 200.0));
        rects.insert(Element::CelebrationPanel, Rect::new(440.0, 210.0, 400.0, 300.0));

        let mut hidden = HashSet::new();
        hidden.insert(Element::RetryPrompt);
        hidden.insert(Element::CelebrationPanel);

        Self {
            viewport: Vec2::new(1280.0, 720.0),
            rects,
            hidden,
            removed: HashSet::new(),
            styles: HashMap::new(),
            calls: Vec::new(),
        }
    }

    /// Same page in a different window size
    pub fn with_viewport(mut self, viewport: Vec2) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn is_visible(&self, el: Element) -> bool {
        !self.hidden.contains(&el) && !self.removed.contains(&el)
    }

    pub fn is_removed(&self, el: Element) -> bool {
        self.removed.contains(&el)
    }

    /// Current value of a style property
    pub fn style(&self, el: Element, property: &str) -> Option<&str> {
        self.styles
            .get(&(el, property.to_string()))
            .map(String::as_str)
    }

    /// Number of recorded calls matching a predicate
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for RecordingRenderer {
    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn measure(&self, el: Element) -> Rect {
        if self.removed.contains(&el) {
            return Rect::default();
        }
        self.rects.get(&el).copied().unwrap_or_default()
    }

    fn set_style(&mut self, el: Element, property: &str, value: &str) {
        // Floating elements follow their translate transform
        if el == Element::EvasiveButton && property == "transform" {
            if let Some(pos) = parse_translate(value) {
                if let Some(rect) = self.rects.get_mut(&el) {
                    *rect = rect.moved_to(pos);
                }
            }
        }
        self.styles
            .insert((el, property.to_string()), value.to_string());
        self.calls.push(Call::Style {
            el,
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn detach(&mut self, el: Element, pos: Vec2) {
        if let Some(rect) = self.rects.get_mut(&el) {
            *rect = rect.moved_to(pos);
        }
        self.calls.push(Call::Detach { el, pos });
    }

    fn show(&mut self, el: Element) {
        self.hidden.remove(&el);
        self.calls.push(Call::Show(el));
    }

    fn hide(&mut self, el: Element) {
        self.hidden.insert(el);
        self.calls.push(Call::Hide(el));
    }

    fn add_class(&mut self, el: Element, class: &str) {
        self.calls.push(Call::AddClass(el, class.to_string()));
    }

    fn remove(&mut self, el: Element) {
        self.removed.insert(el);
        self.calls.push(Call::Remove(el));
    }
}

/// Parse `translate(Xpx, Ypx)`
fn parse_translate(value: &str) -> Option<Vec2> {
    let inner = value.strip_prefix("translate(")?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    let x = x.trim().strip_suffix("px")?.parse().ok()?;
    let y = y.trim().strip_suffix("px")?.parse().ok()?;
    Some(Vec2::new(x, y))
}

/// Particle emitter that keeps every burst
#[derive(Debug, Clone, Default)]
pub struct RecordingEmitter {
    pub bursts: Vec<Burst>,
}

impl ParticleEmitter for RecordingEmitter {
    fn emit(&mut self, burst: &Burst) {
        self.bursts.push(burst.clone());
    }
}
