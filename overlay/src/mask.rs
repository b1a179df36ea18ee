//! Shape geometry and pixel clip regions
//!
//! A widget's silhouette exists in two forms that must never disagree: the
//! vector path the renderer fills and strokes, and the rasterized coverage
//! mask the host clips to and pointer hit-testing samples. Both are built
//! here from the same path, and recomputed whenever size or shape changes.

use hudkit_types::Shape;
use tiny_skia::{FillRule, Mask, Path, PathBuilder, Rect, Transform};

/// Clip region for one widget at one committed size and shape
pub struct ClipRegion {
    path: Path,
    coverage: Mask,
    width: u32,
    height: u32,
}

impl ClipRegion {
    /// Build the region for the given shape and size. Deterministic: the
    /// same inputs always produce byte-identical coverage.
    ///
    /// Returns `None` only for degenerate (zero) dimensions.
    pub fn compute(shape: Shape, width: u32, height: u32, corner_radius: f32) -> Option<Self> {
        let path = shape_path(shape, width as f32, height as f32, corner_radius)?;
        let mut coverage = Mask::new(width, height)?;
        coverage.fill_path(&path, FillRule::Winding, true, Transform::identity());
        Some(Self {
            path,
            coverage,
            width,
            height,
        })
    }

    /// The exact path shared by paint fill, border stroke, and the clip
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mask(&self) -> &Mask {
        &self.coverage
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel-accurate hit test in widget-local coordinates
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if x < 0.0 || y < 0.0 {
            return false;
        }
        let (px, py) = (x as u32, y as u32);
        if px >= self.width || py >= self.height {
            return false;
        }
        let index = (py * self.width + px) as usize;
        self.coverage.data().get(index).is_some_and(|&alpha| alpha >= 128)
    }
}

/// Build the outline path for a shape within a `(0, 0, width, height)` box
pub fn shape_path(shape: Shape, width: f32, height: f32, corner_radius: f32) -> Option<Path> {
    match shape {
        Shape::Rectangle | Shape::Square => {
            let mut pb = PathBuilder::new();
            pb.push_rect(Rect::from_xywh(0.0, 0.0, width, height)?);
            pb.finish()
        }
        Shape::RoundedRect => rounded_rect_path(0.0, 0.0, width, height, corner_radius),
        Shape::Circle => {
            // Inscribed circle from a curved primitive; a polygon
            // approximation would alias along the boundary.
            let radius = width.min(height) / 2.0;
            let mut pb = PathBuilder::new();
            pb.push_circle(width / 2.0, height / 2.0, radius);
            pb.finish()
        }
    }
}

/// Rounded rectangle with the radius clamped to half the shorter side so
/// the corner arcs can never self-intersect
pub(crate) fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<Path> {
    let r = r.clamp(0.0, w.min(h) / 2.0);

    let mut pb = PathBuilder::new();

    // Start at top-left, after the corner
    pb.move_to(x + r, y);

    // Top edge and top-right corner
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);

    // Right edge and bottom-right corner
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);

    // Bottom edge and bottom-left corner
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);

    // Left edge and top-left corner
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);

    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_inputs_yield_identical_regions() {
        for shape in [Shape::Rectangle, Shape::RoundedRect, Shape::Circle, Shape::Square] {
            let a = ClipRegion::compute(shape, 120, 80, 12.0).unwrap();
            let b = ClipRegion::compute(shape, 120, 80, 12.0).unwrap();
            assert_eq!(a.mask().data(), b.mask().data(), "{shape:?} not deterministic");
        }
    }

    #[test]
    fn test_oversized_radius_is_clamped() {
        // radius far beyond half the shorter side must collapse to the
        // same region as the exact half-side radius
        let oversized = ClipRegion::compute(Shape::RoundedRect, 100, 60, 500.0).unwrap();
        let clamped = ClipRegion::compute(Shape::RoundedRect, 100, 60, 30.0).unwrap();
        assert_eq!(oversized.mask().data(), clamped.mask().data());
    }

    #[test]
    fn test_rectangle_covers_corners() {
        let region = ClipRegion::compute(Shape::Rectangle, 60, 40, 0.0).unwrap();
        assert!(region.contains(0.0, 0.0));
        assert!(region.contains(59.0, 39.0));
        assert!(region.contains(30.0, 20.0));
        assert!(!region.contains(60.0, 40.0));
        assert!(!region.contains(-1.0, 5.0));
    }

    #[test]
    fn test_circle_is_inscribed_and_centered() {
        let region = ClipRegion::compute(Shape::Circle, 100, 60, 0.0).unwrap();
        // diameter = min(w, h) = 60, centered on (50, 30)
        assert!(region.contains(50.0, 30.0));
        assert!(region.contains(50.0, 2.0));
        assert!(region.contains(22.0, 30.0));
        // corners and the area left of the inscribed circle are outside
        assert!(!region.contains(0.0, 0.0));
        assert!(!region.contains(10.0, 30.0));
        assert!(!region.contains(99.0, 59.0));
    }

    #[test]
    fn test_rounded_rect_trims_corners_only() {
        let region = ClipRegion::compute(Shape::RoundedRect, 80, 80, 20.0).unwrap();
        assert!(region.contains(40.0, 40.0));
        assert!(region.contains(40.0, 1.0));
        assert!(!region.contains(1.0, 1.0));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(ClipRegion::compute(Shape::Rectangle, 0, 40, 0.0).is_none());
        assert!(ClipRegion::compute(Shape::Circle, 40, 0, 0.0).is_none());
    }
}
