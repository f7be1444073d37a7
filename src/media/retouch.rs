// SPDX-License-Identifier: MPL-2.0
//! Retouch filters applied to the cropped picture before it is published.

use image_rs::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color filter picked in the retouch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    /// Leave the picture untouched.
    #[default]
    None,
    /// Full grayscale.
    Chrome,
    /// Warm brown tint.
    Sepia,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::None, Filter::Chrome, Filter::Sepia];

    /// Identifier used in config files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::None => "none",
            Filter::Chrome => "chrome",
            Filter::Sepia => "sepia",
        }
    }

    /// Returns a filtered copy of `image`. Alpha is preserved.
    #[must_use]
    pub fn apply(self, image: &RgbaImage) -> RgbaImage {
        let mut out = image.clone();
        match self {
            Filter::None => {}
            Filter::Chrome => out.pixels_mut().for_each(|px| *px = grayscale(*px)),
            Filter::Sepia => out.pixels_mut().for_each(|px| *px = sepia(*px)),
        }
        out
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a filter name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl fmt::Display for UnknownFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter '{}' (expected none, chrome or sepia)", self.0)
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn grayscale(Rgba([r, g, b, a]): Rgba<u8>) -> Rgba<u8> {
    let luma = to_u8(0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b));
    Rgba([luma, luma, luma, a])
}

fn sepia(Rgba([r, g, b, a]): Rgba<u8>) -> Rgba<u8> {
    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
    Rgba([
        to_u8(0.393 * r + 0.769 * g + 0.189 * b),
        to_u8(0.349 * r + 0.686 * g + 0.168 * b),
        to_u8(0.272 * r + 0.534 * g + 0.131 * b),
        a,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RgbaImage {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([10, 200, 30, 77]));
        image
    }

    #[test]
    fn none_leaves_pixels_untouched() {
        assert_eq!(Filter::None.apply(&sample()), sample());
    }

    #[test]
    fn chrome_produces_gray_pixels() {
        let filtered = Filter::Chrome.apply(&sample());
        for px in filtered.pixels() {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
        assert_eq!(filtered.get_pixel(0, 0).0, [76, 76, 76, 255]);
    }

    #[test]
    fn sepia_keeps_alpha_and_saturates() {
        let white = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 12]));
        let filtered = Filter::Sepia.apply(&white);
        assert_eq!(filtered.get_pixel(0, 0).0, [255, 255, 239, 12]);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Sepia".parse::<Filter>(), Ok(Filter::Sepia));
        assert_eq!("chrome".parse::<Filter>(), Ok(Filter::Chrome));
        assert!("blur".parse::<Filter>().is_err());
    }

    #[test]
    fn display_matches_identifier() {
        for filter in Filter::ALL {
            assert_eq!(filter.to_string().parse::<Filter>(), Ok(filter));
        }
    }
}
