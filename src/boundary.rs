//! Counting line placement.

use serde::{Deserialize, Serialize};

/// How the counting line's x-coordinate is chosen for each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryStrategy {
    /// Half of the current frame width, recomputed every frame.
    #[default]
    HalfWidth,

    /// Half of the first frame's width, kept for the rest of the stream.
    /// Use when frame size can change mid-stream.
    PinnedHalfWidth,

    /// Fixed pixel column.
    Fixed(i32),
}

/// Resolves a `BoundaryStrategy` frame by frame for one stream.
#[derive(Debug, Clone)]
pub struct BoundaryResolver {
    strategy: BoundaryStrategy,
    pinned: Option<i32>,
}

impl BoundaryResolver {
    pub fn new(strategy: BoundaryStrategy) -> Self {
        Self {
            strategy,
            pinned: None,
        }
    }

    /// Boundary x-coordinate for a frame of the given width.
    pub fn resolve(&mut self, frame_width: u32) -> i32 {
        let half = (frame_width / 2) as i32;
        match self.strategy {
            BoundaryStrategy::HalfWidth => half,
            BoundaryStrategy::PinnedHalfWidth => *self.pinned.get_or_insert(half),
            BoundaryStrategy::Fixed(x) => x,
        }
    }

    pub fn strategy(&self) -> BoundaryStrategy {
        self.strategy
    }

    /// Forget a pinned position so the next frame pins again.
    pub fn reset(&mut self) {
        self.pinned = None;
    }
}
