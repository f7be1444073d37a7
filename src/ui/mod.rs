// SPDX-License-Identifier: MPL-2.0
//! Interactive crop components.
//!
//! - [`resizer`]: the crop editor, its renderer and frame scheduling
//! - [`crop_form`]: numeric fields mirroring the crop region
//! - [`host`]: container elements the resizer surface is attached to
//! - [`state`]: interaction state such as dragging

pub mod crop_form;
pub mod host;
pub mod resizer;
pub mod state;

pub use crop_form::CropForm;
pub use host::{Host, NodeId};
pub use resizer::{Event, PointerEvent, Resizer, ResizerOptions};
