//! TrackedObject struct for objects maintained by the tracker.

use std::fmt;

use serde::Serialize;

use crate::centroid::Centroid;

/// A tracked object maintained by the tracker.
///
/// Owned by the tracker registry; callers only see shared references or
/// copies taken from a frame snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedObject {
    /// Identity, unique and never reused within one tracker.
    pub id: u64,

    /// Centroid of the most recent matched detection.
    pub position: Centroid,

    /// Consecutive updates without a matching detection.
    pub disappeared_count: u32,

    /// Updates survived since registration.
    pub age: u32,
}

impl TrackedObject {
    pub(crate) fn new(id: u64, position: Centroid) -> Self {
        Self {
            id,
            position,
            disappeared_count: 0,
            age: 0,
        }
    }

    /// Whether the object was matched in the most recent update.
    pub fn is_visible(&self) -> bool {
        self.disappeared_count == 0
    }

    pub(crate) fn hit(&mut self, position: Centroid) {
        self.position = position;
        self.disappeared_count = 0;
    }

    pub(crate) fn miss(&mut self) {
        self.disappeared_count = self.disappeared_count.saturating_add(1);
    }
}

impl fmt::Display for TrackedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID {} at ({}, {}) missing={}",
            self.id, self.position.x, self.position.y, self.disappeared_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_resets_counter() {
        let mut obj = TrackedObject::new(3, Centroid::new(1, 1));
        obj.miss();
        obj.miss();
        assert_eq!(obj.disappeared_count, 2);
        assert!(!obj.is_visible());

        obj.hit(Centroid::new(5, 6));
        assert_eq!(obj.disappeared_count, 0);
        assert_eq!(obj.position, Centroid::new(5, 6));
        assert!(obj.is_visible());
    }

    #[test]
    fn test_display() {
        let obj = TrackedObject::new(7, Centroid::new(10, 20));
        assert_eq!(obj.to_string(), "ID 7 at (10, 20) missing=0");
    }
}
