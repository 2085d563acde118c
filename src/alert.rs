//! Restricted-class alerting.

use std::collections::BTreeSet;

use log::warn;
use serde::Serialize;

use crate::detection::Detection;

/// COCO class index for "knife".
pub const COCO_KNIFE: u32 = 43;

/// COCO class index for "scissors".
pub const COCO_SCISSORS: u32 = 76;

/// Outcome of evaluating one frame's detections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alert {
    /// Whether any detection belongs to a restricted class.
    pub triggered: bool,

    /// The detections that matched, in detector order.
    pub matches: Vec<Detection>,
}

/// Flags detections whose class label is in a restricted set.
///
/// Stateless; independent of the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPolicy {
    restricted: BTreeSet<u32>,
}

impl AlertPolicy {
    pub fn new<I: IntoIterator<Item = u32>>(restricted: I) -> Self {
        Self {
            restricted: restricted.into_iter().collect(),
        }
    }

    /// A policy that never triggers.
    pub fn disabled() -> Self {
        Self {
            restricted: BTreeSet::new(),
        }
    }

    pub fn is_restricted(&self, label: u32) -> bool {
        self.restricted.contains(&label)
    }

    pub fn restricted(&self) -> &BTreeSet<u32> {
        &self.restricted
    }

    pub fn evaluate(&self, detections: &[Detection]) -> Alert {
        let matches: Vec<Detection> = detections
            .iter()
            .filter(|d| self.is_restricted(d.label))
            .copied()
            .collect();

        if !matches.is_empty() {
            warn!(
                "Restricted object detected: {} detection(s), classes {:?}",
                matches.len(),
                matches.iter().map(|d| d.label).collect::<BTreeSet<_>>()
            );
        }

        Alert {
            triggered: !matches.is_empty(),
            matches,
        }
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::new([COCO_KNIFE, COCO_SCISSORS])
    }
}
