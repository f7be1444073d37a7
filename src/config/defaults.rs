// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Crop frame**: initial size of the crop square
//! - **Border**: zig-zag border drawn around the crop square
//! - **Overlay**: darkened area outside the crop square
//! - **Label**: image size caption above the crop square

// ==========================================================================
// Crop Frame Defaults
// ==========================================================================

/// Initial crop side as a fraction of the shorter image side.
pub const DEFAULT_INITIAL_SIDE_RATIO: f32 = 0.75;

/// Smallest accepted initial side ratio.
pub const MIN_INITIAL_SIDE_RATIO: f32 = 0.1;

/// Largest accepted initial side ratio (the whole shorter side).
pub const MAX_INITIAL_SIDE_RATIO: f32 = 1.0;

// ==========================================================================
// Border Defaults
// ==========================================================================

/// Stroke width of the crop border, in image pixels.
pub const DEFAULT_BORDER_LINE_WIDTH: f32 = 6.0;

/// Minimum border stroke width.
pub const MIN_BORDER_LINE_WIDTH: f32 = 1.0;

/// Maximum border stroke width.
pub const MAX_BORDER_LINE_WIDTH: f32 = 64.0;

/// Border color as `#rrggbb`.
pub const DEFAULT_BORDER_COLOR: &str = "#ffe753";

/// Line segments per edge of the zig-zag border. Two segments form one zig-zag.
///
/// The count is per edge, not for the whole border: each of the four sides
/// gets 32 segments, 128 in total, drawn as 64 strokes.
pub const ZIGZAG_SEGMENTS_PER_EDGE: usize = 32;

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Opacity of the black mask drawn outside the crop square.
pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.8;

/// Minimum mask opacity.
pub const MIN_OVERLAY_OPACITY: f32 = 0.0;

/// Maximum mask opacity.
pub const MAX_OVERLAY_OPACITY: f32 = 1.0;

// ==========================================================================
// Label Defaults
// ==========================================================================

/// Font size of the `W x H` label, in image pixels.
pub const DEFAULT_LABEL_FONT_SIZE: f32 = 22.0;

/// Label fill color as `#rrggbb`.
pub const DEFAULT_LABEL_COLOR: &str = "#ffffff";

/// Gap between the label baseline and the crop square, in border widths.
pub const LABEL_OFFSET_FACTOR: f32 = 1.5;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_INITIAL_SIDE_RATIO > 0.0);
    assert!(DEFAULT_INITIAL_SIDE_RATIO >= MIN_INITIAL_SIDE_RATIO);
    assert!(DEFAULT_INITIAL_SIDE_RATIO <= MAX_INITIAL_SIDE_RATIO);

    assert!(MIN_BORDER_LINE_WIDTH > 0.0);
    assert!(DEFAULT_BORDER_LINE_WIDTH >= MIN_BORDER_LINE_WIDTH);
    assert!(DEFAULT_BORDER_LINE_WIDTH <= MAX_BORDER_LINE_WIDTH);

    // Each zig-zag takes two segments
    assert!(ZIGZAG_SEGMENTS_PER_EDGE > 0);
    assert!(ZIGZAG_SEGMENTS_PER_EDGE % 2 == 0);

    assert!(DEFAULT_OVERLAY_OPACITY >= MIN_OVERLAY_OPACITY);
    assert!(DEFAULT_OVERLAY_OPACITY <= MAX_OVERLAY_OPACITY);

    assert!(DEFAULT_LABEL_FONT_SIZE > 0.0);
};
