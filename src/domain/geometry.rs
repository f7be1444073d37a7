// SPDX-License-Identifier: MPL-2.0
//! Geometry value types shared by the resizer and its collaborators.
//!
//! All coordinates are `f32` and expressed in source-image pixel space.

/// A cursor sample point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset that moves `other` onto `self` (`self - other`).
    #[must_use]
    pub fn delta_from(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.x - other.x, self.y - other.y)
    }
}

/// Square crop region: top-left offset plus side length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SquareRegion {
    pub x: f32,
    pub y: f32,
    pub side: f32,
}

impl SquareRegion {
    #[must_use]
    pub fn new(x: f32, y: f32, side: f32) -> Self {
        Self { x, y, side }
    }

    /// Centered square covering `ratio` of the shorter side of a `width × height` image.
    #[must_use]
    pub fn centered(width: u32, height: u32, ratio: f32) -> Self {
        let width = width as f32;
        let height = height as f32;
        let side = (width * ratio).min(height * ratio);
        Self {
            x: width / 2.0 - side / 2.0,
            y: height / 2.0 - side / 2.0,
            side,
        }
    }

    /// Replaces the provided fields, keeping the others.
    #[must_use]
    pub fn with(self, x: Option<f32>, y: Option<f32>, side: Option<f32>) -> Self {
        Self {
            x: x.unwrap_or(self.x),
            y: y.unwrap_or(self.y),
            side: side.unwrap_or(self.side),
        }
    }

    #[must_use]
    pub fn translated(self, dx: f32, dy: f32, dside: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            side: self.side + dside,
        }
    }

    /// Center of the square.
    #[must_use]
    pub fn center(self) -> Coordinate {
        let half = self.side / 2.0;
        Coordinate::new(self.x + half, self.y + half)
    }

    /// Pulls the square back inside `[0, width] × [0, height]`.
    ///
    /// The side is first limited to the shorter image dimension, then the
    /// offset is clamped so the whole square fits.
    #[must_use]
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let width = width as f32;
        let height = height as f32;
        let side = self.side.clamp(0.0, width.min(height));
        Self {
            x: self.x.clamp(0.0, width - side),
            y: self.y.clamp(0.0, height - side),
            side,
        }
    }

    /// Whether the square lies fully inside a `width × height` image, edges included.
    #[must_use]
    pub fn fits_within(self, width: u32, height: u32) -> bool {
        self.side > 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.side <= width as f32
            && self.y + self.side <= height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::DEFAULT_INITIAL_SIDE_RATIO;
    use approx::assert_abs_diff_eq;

    #[test]
    fn centered_region_for_landscape_image() {
        let region = SquareRegion::centered(800, 600, DEFAULT_INITIAL_SIDE_RATIO);
        assert_eq!(region, SquareRegion::new(175.0, 75.0, 450.0));
    }

    #[test]
    fn centered_region_for_wide_image() {
        let region = SquareRegion::centered(1000, 500, DEFAULT_INITIAL_SIDE_RATIO);
        assert_eq!(region, SquareRegion::new(312.5, 62.5, 375.0));
    }

    #[test]
    fn centered_region_for_portrait_image() {
        let region = SquareRegion::centered(300, 900, DEFAULT_INITIAL_SIDE_RATIO);
        assert_eq!(region, SquareRegion::new(37.5, 337.5, 225.0));
    }

    #[test]
    fn with_keeps_omitted_fields() {
        let region = SquareRegion::new(10.0, 20.0, 30.0);
        assert_eq!(
            region.with(None, Some(5.0), None),
            SquareRegion::new(10.0, 5.0, 30.0)
        );
    }

    #[test]
    fn translate_round_trip_restores_region() {
        let region = SquareRegion::new(175.0, 75.0, 450.0);
        let back = region.translated(13.7, -4.2, 0.0).translated(-13.7, 4.2, 0.0);
        assert_abs_diff_eq!(back.x, region.x, epsilon = 1e-4);
        assert_abs_diff_eq!(back.y, region.y, epsilon = 1e-4);
        assert_abs_diff_eq!(back.side, region.side, epsilon = 1e-4);
    }

    #[test]
    fn clamped_to_pulls_square_inside() {
        let region = SquareRegion::new(-20.0, 580.0, 100.0).clamped_to(800, 600);
        assert_eq!(region, SquareRegion::new(0.0, 500.0, 100.0));
    }

    #[test]
    fn clamped_to_shrinks_oversized_side() {
        let region = SquareRegion::new(0.0, 0.0, 1000.0).clamped_to(800, 600);
        assert_eq!(region.side, 600.0);
        assert!(region.fits_within(800, 600));
    }

    #[test]
    fn fits_within_is_inclusive_of_edges() {
        assert!(SquareRegion::new(200.0, 100.0, 500.0).fits_within(700, 600));
        assert!(!SquareRegion::new(201.0, 100.0, 500.0).fits_within(700, 600));
        assert!(!SquareRegion::new(0.0, 0.0, 0.0).fits_within(700, 600));
    }

    #[test]
    fn delta_is_reference_minus_current() {
        let reference = Coordinate::new(100.0, 100.0);
        let current = Coordinate::new(80.0, 90.0);
        assert_eq!(reference.delta_from(current), Coordinate::new(20.0, 10.0));
    }
}
