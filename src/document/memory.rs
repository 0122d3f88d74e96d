use crate::error::{MoodboardError, Result};
use crate::geometry::Viewport;
use crate::style::PositionStyle;

use super::core::{Document, ElementHandle, ElementId};

/// Element stored by [`MemoryDocument`].
#[derive(Debug, Clone)]
pub struct MemoryElement {
    pub id: ElementId,
    /// Selectors this element answers to. Matching is exact; there is no
    /// selector engine.
    pub selectors: Vec<String>,
    pub src: Option<String>,
    pub style: Option<PositionStyle>,
    pub style_writes: usize,
    pub attached: bool,
}

/// In-memory document for headless hosts and tests.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    viewport: Viewport,
    elements: Vec<MemoryElement>,
    image_requests: Vec<(ElementId, String)>,
}

impl MemoryDocument {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
            image_requests: Vec::new(),
        }
    }

    /// Append an image element matching `selector`.
    pub fn add_image(&mut self, selector: impl Into<String>, src: impl Into<String>) -> ElementId {
        self.add_element(vec![selector.into()], Some(src.into()))
    }

    pub fn add_element(&mut self, selectors: Vec<String>, src: Option<String>) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(MemoryElement {
            id,
            selectors,
            src,
            style: None,
            style_writes: 0,
            attached: true,
        });
        id
    }

    /// Remove an element from the tree; later style writes to it fail.
    pub fn detach(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.attached = false;
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn element(&self, id: ElementId) -> Option<&MemoryElement> {
        self.elements.get(id.0)
    }

    pub fn style_of(&self, id: ElementId) -> Option<PositionStyle> {
        self.element(id).and_then(|element| element.style)
    }

    pub fn style_writes(&self, id: ElementId) -> usize {
        self.element(id).map(|element| element.style_writes).unwrap_or(0)
    }

    /// Image loads requested so far, in request order.
    pub fn image_requests(&self) -> &[(ElementId, String)] {
        &self.image_requests
    }
}

impl Document for MemoryDocument {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementHandle> {
        self.elements
            .iter()
            .filter(|element| element.attached && element.selectors.iter().any(|s| s == selector))
            .map(|element| ElementHandle::new(element.id, element.src.clone()))
            .collect()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn load_image(&mut self, element: ElementId, src: &str) {
        self.image_requests.push((element, src.to_string()));
    }

    fn apply_style(&mut self, element: ElementId, style: &PositionStyle) -> Result<()> {
        let target = self
            .elements
            .get_mut(element.0)
            .filter(|candidate| candidate.attached)
            .ok_or_else(|| MoodboardError::Document(format!("element {element} is detached")))?;
        target.style = Some(*style);
        target.style_writes += 1;
        Ok(())
    }

    fn observe_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}
