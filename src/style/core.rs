use std::fmt::{self, Write as _};

use blake3::Hash;

use crate::geometry::PlacementBox;

/// Fingerprint of the declarations last written to an element.
pub type StyleFingerprint = Hash;

/// Absolute positioning directives for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionStyle {
    pub width: f64,
    pub left: f64,
    pub top: f64,
}

impl PositionStyle {
    pub const POSITION: &'static str = "absolute";

    pub const fn new(width: f64, left: f64, top: f64) -> Self {
        Self { width, left, top }
    }

    /// Property/value pairs in the order they are applied.
    pub fn declarations(&self) -> [(&'static str, String); 4] {
        [
            ("width", px(self.width)),
            ("left", px(self.left)),
            ("top", px(self.top)),
            ("position", Self::POSITION.to_string()),
        ]
    }

    /// Inline `style` attribute text.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (idx, (property, value)) in self.declarations().iter().enumerate() {
            if idx > 0 {
                css.push(' ');
            }
            let _ = write!(css, "{property}: {value};");
        }
        css
    }

    pub fn fingerprint(&self) -> StyleFingerprint {
        blake3::hash(self.to_css().as_bytes())
    }
}

impl From<&PlacementBox> for PositionStyle {
    fn from(placement: &PlacementBox) -> Self {
        Self::new(placement.width, placement.left, placement.top)
    }
}

impl fmt::Display for PositionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_declarations_in_application_order() {
        let style = PositionStyle::new(120.5, 10.0, -4.0);
        assert_eq!(
            style.to_css(),
            "width: 120.5px; left: 10px; top: -4px; position: absolute;"
        );
    }

    #[test]
    fn height_is_never_written() {
        let placement = PlacementBox::new(200.0, 100.0, 5.0, 6.0);
        let style = PositionStyle::from(&placement);
        assert!(
            style
                .declarations()
                .iter()
                .all(|(property, _)| *property != "height")
        );
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = PositionStyle::new(100.0, 1.0, 2.0);
        let b = PositionStyle::new(100.0, 1.0, 2.0);
        let c = PositionStyle::new(100.0, 1.0, 3.0);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
