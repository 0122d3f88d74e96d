use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::geometry::Viewport;
use crate::style::PositionStyle;

/// Stable identifier the document assigns to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element returned by a selector query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    pub id: ElementId,
    /// Value of the element's `src` attribute, if any.
    pub src: Option<String>,
}

impl ElementHandle {
    pub fn new(id: ElementId, src: Option<String>) -> Self {
        Self { id, src }
    }
}

/// Platform capabilities the layout engine depends on.
pub trait Document {
    /// Elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<ElementHandle>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Start loading image metadata for `element` from `src`.
    ///
    /// Completion is reported back to the engine as an image event; this call
    /// must not block.
    fn load_image(&mut self, element: ElementId, src: &str);

    /// Write absolute positioning directives onto `element`.
    fn apply_style(&mut self, element: ElementId, style: &PositionStyle) -> Result<()>;

    /// Called with the size carried by each resize event. Documents that
    /// query the platform on demand can ignore it.
    fn observe_viewport(&mut self, _viewport: Viewport) {}
}

impl<D: Document + ?Sized> Document for Box<D> {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementHandle> {
        (**self).query_selector_all(selector)
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn load_image(&mut self, element: ElementId, src: &str) {
        (**self).load_image(element, src)
    }

    fn apply_style(&mut self, element: ElementId, style: &PositionStyle) -> Result<()> {
        (**self).apply_style(element, style)
    }

    fn observe_viewport(&mut self, viewport: Viewport) {
        (**self).observe_viewport(viewport)
    }
}
