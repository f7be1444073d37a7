// SPDX-License-Identifier: MPL-2.0
//! Coalescing of redraw requests to one per display frame.

/// Dirty flag consumed at each frame boundary.
///
/// Any number of [`request`](Self::request) calls between two frames
/// collapse into a single `true` from [`take`](Self::take).
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: bool,
    frames_rendered: u64,
}

impl FrameScheduler {
    /// Marks the surface dirty.
    pub fn request(&mut self) {
        self.pending = true;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Called at a frame boundary; returns whether a redraw is due and clears the flag.
    pub fn take(&mut self) -> bool {
        if self.pending {
            self.pending = false;
            self.frames_rendered += 1;
            true
        } else {
            false
        }
    }

    /// Drops a pending redraw without rendering it.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Number of frames that produced a redraw.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}
