//! Per-element box computation.
//!
//! `compute_box` is the pure arithmetic; [`PlacedElement`] wraps one document
//! element, gates placement on its intrinsic size and writes the result.

mod core;
mod element;

pub use self::core::compute_box;
pub use element::{Placement, PlacedElement, Resolution};
