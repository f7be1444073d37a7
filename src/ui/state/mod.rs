// SPDX-License-Identifier: MPL-2.0
//! Interaction state shared by UI components.

pub mod drag;

pub use drag::DragState;
