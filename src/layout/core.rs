use crate::geometry::{IntrinsicSize, PlacementBox, Viewport};
use crate::random::{RandomSource, random_number};

/// Randomized box for an element covering `coverage_share` of `viewport`.
///
/// The target area is jittered within `area * (1 ± variation)`, then split
/// into width and height that keep the intrinsic aspect ratio exactly. Left
/// and top are drawn from `[0, viewport - size]`; that range is negative for
/// boxes larger than the viewport, which places them partly off-screen.
pub fn compute_box(
    coverage_share: f64,
    viewport: Viewport,
    variation: f64,
    intrinsic: IntrinsicSize,
    random: &mut impl RandomSource,
) -> PlacementBox {
    let target = coverage_share * viewport.area();
    let jitter = target * variation;
    let area = random_number(random, target - jitter, target + jitter);

    let (width, height) = if area > 0.0 {
        let height = (area / intrinsic.aspect_ratio()).sqrt();
        (area / height, height)
    } else {
        (0.0, 0.0)
    };

    let left = random_number(random, 0.0, viewport.width - width);
    let top = random_number(random, 0.0, viewport.height - height);

    PlacementBox::new(width, height, left, top)
}
