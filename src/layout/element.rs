use crate::document::{Document, ElementHandle, ElementId};
use crate::error::Result;
use crate::geometry::{IntrinsicSize, PlacementBox, Viewport};
use crate::random::RandomSource;
use crate::style::{PositionStyle, StyleFingerprint};

use super::core::compute_box;

/// Two-state gate on the element's intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SizeGate {
    /// Image still loading. Holds the coverage share of the latest placement
    /// request made meanwhile, to be honoured once the size resolves.
    Loading { deferred: Option<f64> },
    Ready(IntrinsicSize),
}

/// Result of asking an element to position itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// New directives were written to the document.
    Placed(PlacementBox),
    /// The computed box matched what the element already carries; no write.
    Unchanged(PlacementBox),
    /// Intrinsic size unknown; the request waits for the image to load.
    Deferred,
}

/// Result of feeding an intrinsic size to an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Size recorded. Carries the share of a deferred placement, if any.
    Resolved { deferred: Option<f64> },
    /// The size was already known; the new value is ignored.
    AlreadyResolved,
    /// Zero or non-finite dimensions; the element keeps waiting.
    Unusable,
}

/// One image element under layout control.
#[derive(Debug, Clone)]
pub struct PlacedElement {
    handle: ElementHandle,
    gate: SizeGate,
    last_box: Option<PlacementBox>,
    last_style: Option<StyleFingerprint>,
}

impl PlacedElement {
    pub fn new(handle: ElementHandle) -> Self {
        Self {
            handle,
            gate: SizeGate::Loading { deferred: None },
            last_box: None,
            last_style: None,
        }
    }

    /// Wrap `handle` and start loading its image. Returns immediately; the
    /// size arrives later through [`PlacedElement::resolve`].
    pub fn attach(handle: ElementHandle, document: &mut impl Document) -> Self {
        if let Some(src) = handle.src.as_deref() {
            document.load_image(handle.id, src);
        }
        Self::new(handle)
    }

    pub fn id(&self) -> ElementId {
        self.handle.id
    }

    pub fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    pub fn intrinsic_size(&self) -> Option<IntrinsicSize> {
        match self.gate {
            SizeGate::Ready(size) => Some(size),
            SizeGate::Loading { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.gate, SizeGate::Ready(_))
    }

    /// Coverage share waiting on the intrinsic size, if any.
    pub fn pending_share(&self) -> Option<f64> {
        match self.gate {
            SizeGate::Loading { deferred } => deferred,
            SizeGate::Ready(_) => None,
        }
    }

    pub fn last_box(&self) -> Option<PlacementBox> {
        self.last_box
    }

    /// Record the intrinsic size. Only the first usable size is kept.
    pub fn resolve(&mut self, size: IntrinsicSize) -> Resolution {
        match self.gate {
            SizeGate::Ready(_) => Resolution::AlreadyResolved,
            SizeGate::Loading { .. } if !size.is_usable() => Resolution::Unusable,
            SizeGate::Loading { deferred } => {
                self.gate = SizeGate::Ready(size);
                Resolution::Resolved { deferred }
            }
        }
    }

    /// Compute and apply this element's box.
    ///
    /// While the intrinsic size is unknown nothing is written: the request is
    /// parked (replacing any earlier one) and [`Placement::Deferred`] returned.
    pub fn position(
        &mut self,
        coverage_share: f64,
        viewport: Viewport,
        variation: f64,
        random: &mut impl RandomSource,
        document: &mut impl Document,
    ) -> Result<Placement> {
        let intrinsic = match self.gate {
            SizeGate::Ready(size) => size,
            SizeGate::Loading { .. } => {
                self.gate = SizeGate::Loading {
                    deferred: Some(coverage_share),
                };
                return Ok(Placement::Deferred);
            }
        };

        let placement = compute_box(coverage_share, viewport, variation, intrinsic, random);
        let style = PositionStyle::from(&placement);
        let fingerprint = style.fingerprint();

        if self.last_style == Some(fingerprint) {
            self.last_box = Some(placement);
            return Ok(Placement::Unchanged(placement));
        }

        document.apply_style(self.handle.id, &style)?;
        self.last_box = Some(placement);
        self.last_style = Some(fingerprint);
        Ok(Placement::Placed(placement))
    }
}
