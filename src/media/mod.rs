// SPDX-License-Identifier: MPL-2.0
//! Media handling: payload decoding, crop export and retouch filters.

pub mod export;
pub mod image;
pub mod retouch;

pub use export::{export_square, ExportedImage};
pub use image::{
    decode_payload, decode_payload_async, is_supported_mime, parse_data_url, ImagePayload,
    SourceImage, SUPPORTED_MIME_TYPES,
};
pub use retouch::Filter;
