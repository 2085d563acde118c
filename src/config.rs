//! Per-stream pipeline configuration.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alert::{AlertPolicy, COCO_KNIFE, COCO_SCISSORS};
use crate::boundary::BoundaryStrategy;
use crate::matching::AssignmentKind;
use crate::tracker::{LeftoverPolicy, TrackerConfig, DEFAULT_MAX_DISAPPEARED};
use crate::{Error, Result};

/// COCO class index for "person".
pub const COCO_PERSON: u32 = 0;

/// Configuration for one stream's pipeline.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Frames an object may go unmatched before eviction.
    pub max_disappeared: u32,

    /// Built-in assignment strategy.
    pub assignment: AssignmentKind,

    /// Treatment of unmatched objects after assignment.
    pub leftover_policy: LeftoverPolicy,

    /// Counting line placement.
    pub boundary: BoundaryStrategy,

    /// Class labels fed to the tracker. Empty means every class.
    pub tracked_classes: BTreeSet<u32>,

    /// Class labels that raise an alert.
    pub restricted_classes: BTreeSet<u32>,

    /// Drop detections scoring below this before tracking.
    pub min_score: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_disappeared: DEFAULT_MAX_DISAPPEARED,
            assignment: AssignmentKind::default(),
            leftover_policy: LeftoverPolicy::default(),
            boundary: BoundaryStrategy::default(),
            tracked_classes: BTreeSet::from([COCO_PERSON]),
            restricted_classes: BTreeSet::from([COCO_KNIFE, COCO_SCISSORS]),
            min_score: 0.0,
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check field ranges that the type system does not enforce.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(Error::InvalidConfig(format!(
                "min_score must be in [0, 1], got {}",
                self.min_score
            )));
        }
        if let BoundaryStrategy::Fixed(x) = self.boundary {
            if x < 0 {
                return Err(Error::InvalidConfig(format!(
                    "fixed boundary must be non-negative, got {}",
                    x
                )));
            }
        }
        Ok(())
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig::new(self.max_disappeared)
            .with_assigner(self.assignment)
            .with_leftover_policy(self.leftover_policy)
    }

    pub fn alert_policy(&self) -> AlertPolicy {
        if self.restricted_classes.is_empty() {
            return AlertPolicy::disabled();
        }
        AlertPolicy::new(self.restricted_classes.iter().copied())
    }

    /// Whether detections of this class are tracked.
    pub fn tracks_class(&self, label: u32) -> bool {
        self.tracked_classes.is_empty() || self.tracked_classes.contains(&label)
    }
}
