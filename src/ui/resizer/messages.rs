// SPDX-License-Identifier: MPL-2.0
//! Pointer input and change notifications exchanged with the resizer.

use crate::domain::{Coordinate, SquareRegion};
use crate::ui::host::NodeId;

/// Pointer input delivered by the host event loop.
///
/// Presses carry the node they hit. Moves and releases are document-wide so
/// a drag keeps tracking after the pointer leaves the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed { target: NodeId, position: Coordinate },
    Moved { position: Coordinate },
    Released,
}

/// Notifications emitted by the resizer after a frame was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The crop region changed and the surface shows it.
    ConstraintChanged(SquareRegion),
}
