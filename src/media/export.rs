// SPDX-License-Identifier: MPL-2.0
//! Export of the crop square as a PNG raster.

use crate::domain::SquareRegion;
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image_rs::RgbaImage;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

/// PNG-encoded crop result.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl ExportedImage {
    /// `data:image/png;base64,...` form of the raster.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }

    /// Decodes the PNG back into straight RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the stored PNG is corrupt.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        Ok(image_rs::load_from_memory(&self.png)?.to_rgba8())
    }
}

/// Copies the `[x, y, side, side]` sub-rectangle of `source` at 1:1 scale
/// into a fresh `side × side` surface and encodes it as PNG.
///
/// Fractional sides are truncated, as a canvas does. Parts of the square
/// outside the source stay transparent.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the side is under one pixel or PNG encoding fails.
pub fn export_square(source: &Pixmap, region: SquareRegion) -> Result<ExportedImage> {
    let side = if region.side.is_finite() && region.side >= 1.0 {
        region.side as u32
    } else {
        return Err(Error::Encode(format!(
            "crop side {} is smaller than one pixel",
            region.side
        )));
    };

    let mut surface = Pixmap::new(side, side)
        .ok_or_else(|| Error::Encode(format!("cannot allocate {side}x{side} surface")))?;
    surface.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &PixmapPaint::default(),
        Transform::from_translate(-region.x, -region.y),
        None,
    );

    let png = surface
        .encode_png()
        .map_err(|e| Error::Encode(e.to_string()))?;
    log::info!(
        "Exported {side}x{side} crop at ({}, {})",
        region.x,
        region.y
    );
    Ok(ExportedImage {
        width: side,
        height: side,
        png,
    })
}
