//! Main tracker implementation.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::centroid::Centroid;
use crate::distances::distance_matrix;
use crate::matching::AssignerEnum;
use crate::{Error, Result, TrackedObject};

/// Default number of consecutive misses tolerated before eviction.
pub const DEFAULT_MAX_DISAPPEARED: u32 = 40;

/// What happens to tracked objects left unmatched by the assigner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeftoverPolicy {
    /// Every unmatched object is aged, whatever the object/detection ratio.
    #[default]
    AgeAll,

    /// Unmatched objects are aged only when objects are at least as many as
    /// detections. When detections outnumber objects, an object that lost
    /// its nearest detection to another object keeps its counter unchanged.
    Legacy,
}

/// Configuration for the tracker.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    /// Frames an object may go unmatched; it is evicted once its
    /// disappearance counter exceeds this value.
    pub max_disappeared: u32,

    /// Assignment strategy (enum-based static dispatch).
    pub assigner: AssignerEnum,

    /// Treatment of unmatched objects after assignment.
    pub leftover_policy: LeftoverPolicy,
}

impl TrackerConfig {
    /// Create a new tracker configuration with the default greedy assigner.
    pub fn new(max_disappeared: u32) -> Self {
        Self {
            max_disappeared,
            assigner: AssignerEnum::default(),
            leftover_policy: LeftoverPolicy::default(),
        }
    }

    pub fn with_assigner(mut self, assigner: impl Into<AssignerEnum>) -> Self {
        self.assigner = assigner.into();
        self
    }

    pub fn with_leftover_policy(mut self, policy: LeftoverPolicy) -> Self {
        self.leftover_policy = policy;
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISAPPEARED)
    }
}

/// Centroid tracker.
///
/// Maintains a registry of tracked objects across frames, matching new
/// centroids to existing objects by Euclidean distance and managing object
/// lifecycles. One tracker belongs to exactly one video stream.
#[derive(Debug)]
pub struct Tracker {
    config: TrackerConfig,

    /// Registry in insertion order, which is also ascending id order.
    objects: Vec<TrackedObject>,

    /// Next id to hand out.
    next_id: u64,

    /// Ids evicted during the most recent update.
    evicted: Vec<u64>,
}

impl Tracker {
    /// Create a new tracker with the given configuration.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        if config.max_disappeared == u32::MAX {
            return Err(Error::InvalidConfig(
                "max_disappeared must be less than u32::MAX".to_string(),
            ));
        }

        Ok(Self {
            config,
            objects: Vec::new(),
            next_id: 0,
            evicted: Vec::new(),
        })
    }

    /// Update the tracker with the centroids detected in one frame.
    ///
    /// # Returns
    /// Snapshot of the registry after the update, in registry order.
    pub fn update(&mut self, detections: &[Centroid]) -> Vec<&TrackedObject> {
        self.evicted.clear();

        for obj in &mut self.objects {
            obj.age = obj.age.saturating_add(1);
        }

        if detections.is_empty() {
            for obj in &mut self.objects {
                obj.miss();
            }
            self.evict_stale();
        } else if self.objects.is_empty() {
            for &centroid in detections {
                self.register(centroid);
            }
        } else {
            self.match_and_resolve(detections);
        }

        self.objects.iter().collect()
    }

    fn match_and_resolve(&mut self, detections: &[Centroid]) {
        let positions: Vec<Centroid> = self.objects.iter().map(|o| o.position).collect();
        let distances = distance_matrix(&positions, detections);
        let matches = self.config.assigner.assign(&distances);

        for &(row, col) in &matches.pairs {
            let obj = &mut self.objects[row];
            trace!(
                "Matched ID {} to detection {} (distance {:.2})",
                obj.id,
                col,
                distances[(row, col)]
            );
            obj.hit(detections[col]);
        }

        let n_objects = self.objects.len();
        let n_detections = detections.len();

        let age_leftovers = match self.config.leftover_policy {
            LeftoverPolicy::AgeAll => true,
            LeftoverPolicy::Legacy => n_objects >= n_detections,
        };
        if age_leftovers {
            for &row in &matches.unmatched_rows {
                self.objects[row].miss();
            }
        }

        // Evict before registering so row indices above stay valid
        self.evict_stale();

        if n_detections > n_objects {
            for &col in &matches.unmatched_cols {
                self.register(detections[col]);
            }
        }
    }

    fn register(&mut self, position: Centroid) {
        let id = self.next_id;
        self.next_id += 1;
        debug!("Registered ID {} at ({}, {})", id, position.x, position.y);
        self.objects.push(TrackedObject::new(id, position));
    }

    fn evict_stale(&mut self) {
        let max_disappeared = self.config.max_disappeared;
        let evicted = &mut self.evicted;
        self.objects.retain(|obj| {
            if obj.disappeared_count > max_disappeared {
                debug!(
                    "Evicted ID {} after {} missed frames",
                    obj.id, obj.disappeared_count
                );
                evicted.push(obj.id);
                false
            } else {
                true
            }
        });
    }

    /// Current registry in insertion order.
    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    /// Look up a registered object by id.
    pub fn get(&self, id: u64) -> Option<&TrackedObject> {
        self.objects
            .binary_search_by_key(&id, |obj| obj.id)
            .ok()
            .map(|idx| &self.objects[idx])
    }

    /// Number of currently registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Id the next registration will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Total number of objects ever registered by this tracker.
    pub fn total_registered(&self) -> u64 {
        self.next_id
    }

    /// Ids removed by the most recent `update`.
    pub fn evicted(&self) -> &[u64] {
        &self.evicted
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
