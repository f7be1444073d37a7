// SPDX-License-Identifier: MPL-2.0
//! `cropframe` is an interactive square crop editor.
//!
//! It loads an uploaded picture, lets the user drag a square crop frame over
//! it while a preview surface is redrawn once per frame, and exports the
//! selected square as PNG, optionally passed through a retouch filter.

pub mod config;
pub mod domain;
pub mod error;
pub mod media;
pub mod ui;

pub use domain::{Coordinate, SquareRegion};
pub use error::{Error, Result};
pub use ui::{CropForm, Host, Resizer, ResizerOptions};
