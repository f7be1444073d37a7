// SPDX-License-Identifier: MPL-2.0
//! Bounds policy for crop values typed into the crop form.
//!
//! The resizer accepts any region it is given. Deciding whether a region may
//! be exported is the form's job, and this is the rule it applies: every
//! value non-negative, a non-zero side, and the square inside the image with
//! the right and bottom edges inclusive (`x + side <= width`).

use super::geometry::SquareRegion;
use std::fmt;

/// Why a crop region was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    /// A field does not hold a finite number.
    InvalidNumber,
    /// One of x, y or side is below zero.
    Negative,
    /// Side is zero, so there is nothing to export.
    NonPositiveSide,
    /// The square sticks out past the right or bottom image edge.
    OutOfBounds,
}

impl RegionError {
    /// Message shown next to the crop form.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            RegionError::InvalidNumber => "Invalid field value",
            RegionError::Negative => "Field values must be positive",
            RegionError::NonPositiveSide => "Crop side must be greater than zero",
            RegionError::OutOfBounds => "The cropped image must stay within the source image",
        }
    }
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for RegionError {}

/// Checks a proposed region against a `width × height` image.
///
/// # Errors
///
/// Returns the first [`RegionError`] that applies, checked in the order
/// non-finite values, negative values, empty side, then image bounds.
pub fn validate_region(region: SquareRegion, width: u32, height: u32) -> Result<(), RegionError> {
    if !(region.x.is_finite() && region.y.is_finite() && region.side.is_finite()) {
        return Err(RegionError::InvalidNumber);
    }
    if region.x < 0.0 || region.y < 0.0 || region.side < 0.0 {
        return Err(RegionError::Negative);
    }
    if region.side == 0.0 {
        return Err(RegionError::NonPositiveSide);
    }
    if region.fits_within(width, height) {
        Ok(())
    } else {
        Err(RegionError::OutOfBounds)
    }
}
