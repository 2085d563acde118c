//! # occupancy-rs - Centroid Tracking and Line-Crossing Counting
//!
//! Keeps stable identities for detected objects across video frames and
//! derives a directional occupancy count from those identities crossing a
//! vertical counting line.
//!
//! ## Features
//!
//! - Centroid tracker with per-instance, never-reused ids
//! - Pluggable assignment strategy (greedy by default, optimal Hungarian)
//! - Directional crossing counter with explicit history pruning
//! - Restricted-class alert policy
//! - Per-stream frame pump over user supplied frame sources and detectors
//!
//! ## Example
//!
//! ```rust
//! use occupancy_rs::{Centroid, CrossingCounter, Tracker, TrackerConfig};
//!
//! let mut tracker = Tracker::new(TrackerConfig::default()).unwrap();
//! let mut counter = CrossingCounter::new();
//!
//! for x in [90, 110] {
//!     let objects = tracker.update(&[Centroid::new(x, 50)]);
//!     counter.update(objects.iter().map(|o| (o.id, o.position)), 100);
//! }
//!
//! assert_eq!(counter.total_in(), 1);
//! assert_eq!(counter.occupancy(), 1);
//! ```

pub mod alert;
pub mod boundary;
pub mod centroid;
pub mod config;
pub mod counter;
pub mod detection;
pub mod distances;
pub mod matching;
pub mod pipeline;
pub mod tracked_object;
pub mod tracker;

#[cfg(feature = "python")]
pub mod python;

pub use alert::{Alert, AlertPolicy, COCO_KNIFE, COCO_SCISSORS};
pub use boundary::{BoundaryResolver, BoundaryStrategy};
pub use centroid::Centroid;
pub use config::{PipelineConfig, COCO_PERSON};
pub use counter::{Crossing, CrossingCounter, Direction};
pub use detection::{BoundingBox, Detection};
pub use matching::{
    Assigner, AssignerEnum, AssignmentKind, GreedyAssigner, HungarianAssigner, Matches,
};
pub use pipeline::{Detector, Frame, FrameReport, FrameSource, ObjectReport, StreamPipeline};
pub use tracked_object::TrackedObject;
pub use tracker::{LeftoverPolicy, Tracker, TrackerConfig};

pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur in the occupancy library
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Invalid detection: {0}")]
        InvalidDetection(String),

        #[error("Frame source error: {0}")]
        FrameSource(String),

        #[error("Detector error: {0}")]
        Detector(String),

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),

        #[error("JSON error: {0}")]
        JsonError(#[from] serde_json::Error),
    }

    /// Result type for occupancy operations
    pub type Result<T> = std::result::Result<T, Error>;
}
