// SPDX-License-Identifier: MPL-2.0
//! Domain layer - crop geometry and the rules applied to it.
//!
//! Pure value types with no dependency on rendering or I/O.
//!
//! # Modules
//!
//! - [`geometry`]: [`Coordinate`] and [`SquareRegion`]
//! - [`validation`]: crop-form bounds policy ([`validate_region`], [`RegionError`])

pub mod geometry;
pub mod validation;

pub use geometry::{Coordinate, SquareRegion};
pub use validation::{validate_region, RegionError};
