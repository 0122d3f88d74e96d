//! Positioning directives written onto elements.
//!
//! The element's height is left to the browser, which derives it from the
//! image's aspect ratio once `width` is set.

mod core;

pub use self::core::{PositionStyle, StyleFingerprint};
