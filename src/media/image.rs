// SPDX-License-Identifier: MPL-2.0
//! Decoding of uploaded image payloads (PNG, JPEG, GIF, SVG) into a source raster.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image_rs::GenericImageView;
use resvg::usvg;
use std::sync::Arc;
use tiny_skia::{IntSize, Pixmap};

/// MIME types accepted by the upload flow.
pub const SUPPORTED_MIME_TYPES: [&str; 4] =
    ["image/gif", "image/jpeg", "image/png", "image/svg+xml"];

const SVG_MIME: &str = "image/svg+xml";

/// Returns `true` if `mime` is one of [`SUPPORTED_MIME_TYPES`], ignoring case.
#[must_use]
pub fn is_supported_mime(mime: &str) -> bool {
    SUPPORTED_MIME_TYPES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(mime.trim()))
}

/// Image data handed over by the upload step.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    /// Raw file bytes; the format is sniffed from the content.
    Bytes(Vec<u8>),
    /// A `data:` URL as produced by a file reader.
    DataUrl(String),
}

/// Decoded source image with its natural dimensions.
///
/// Pixels are straight (non-premultiplied) RGBA8, shared behind an `Arc`
/// so clones stay cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wraps raw RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if a dimension is zero or the buffer length
    /// does not match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Decode("image has empty dimensions".into()));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Error::Decode(format!(
                "expected {expected} RGBA bytes, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba: Arc::new(rgba),
        })
    }

    /// Natural width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba
    }

    /// Premultiplied copy suitable for drawing with `tiny-skia`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the pixmap cannot be allocated.
    pub fn to_pixmap(&self) -> Result<Pixmap> {
        let size = IntSize::from_wh(self.width, self.height)
            .ok_or_else(|| Error::Decode("image has empty dimensions".into()))?;
        let mut data = self.rgba.to_vec();
        for px in data.chunks_exact_mut(4) {
            let alpha = u16::from(px[3]);
            for channel in &mut px[..3] {
                *channel = ((u16::from(*channel) * alpha + 127) / 255) as u8;
            }
        }
        Pixmap::from_vec(data, size)
            .ok_or_else(|| Error::Decode("failed to allocate image pixmap".into()))
    }
}

/// Decodes a payload synchronously.
///
/// # Errors
///
/// Returns [`Error::Decode`] for malformed data URLs, unsupported MIME types
/// and undecodable rasters, and [`Error::Svg`] if an SVG cannot be parsed.
pub fn decode_payload(payload: &ImagePayload) -> Result<SourceImage> {
    let image = match payload {
        ImagePayload::Bytes(bytes) => {
            if looks_like_svg(bytes) {
                decode_svg(bytes)?
            } else {
                decode_raster(bytes)?
            }
        }
        ImagePayload::DataUrl(url) => {
            let (mime, bytes) = parse_data_url(url)?;
            if !is_supported_mime(&mime) {
                return Err(Error::Decode(format!("unsupported image type: {mime}")));
            }
            if mime.eq_ignore_ascii_case(SVG_MIME) {
                decode_svg(&bytes)?
            } else {
                decode_raster(&bytes)?
            }
        }
    };
    log::info!("Decoded source image {}x{}", image.width, image.height);
    Ok(image)
}

/// Decodes a payload on the blocking thread pool.
///
/// # Errors
///
/// Same as [`decode_payload`]; a panicked or cancelled decode task is
/// reported as [`Error::Decode`].
pub async fn decode_payload_async(payload: ImagePayload) -> Result<SourceImage> {
    tokio::task::spawn_blocking(move || decode_payload(&payload))
        .await
        .map_err(|e| Error::Decode(format!("decode task failed: {e}")))?
}

/// Splits a `data:` URL into its MIME type and decoded body.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the URL has no `data:` scheme or comma
/// separator, or if the base64 body is invalid.
pub fn parse_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| Error::Decode("payload is not a data URL".into()))?;
    let (header, body) = rest
        .split_once(',')
        .ok_or_else(|| Error::Decode("data URL has no body".into()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().to_string();
    let is_base64 = params.any(|p| p.eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        STANDARD.decode(body.trim())?
    } else {
        percent_decode(body)
    };
    Ok((mime, bytes))
}

fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(value) = decoded {
                out.push(value);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    if image_rs::guess_format(bytes).is_ok() {
        return false;
    }
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

fn decode_raster(bytes: &[u8]) -> Result<SourceImage> {
    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    SourceImage::from_rgba(width, height, img.to_rgba8().into_vec())
}

fn decode_svg(bytes: &[u8]) -> Result<SourceImage> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    let pixmap_size = tree.size().to_int_size();
    let width = pixmap_size.width();
    let height = pixmap_size.height();
    if width == 0 || height == 0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Svg("Failed to allocate SVG pixmap".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    SourceImage::from_rgba(width, height, rgba)
}
