//! Directional line-crossing counter.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::centroid::Centroid;

/// Direction of travel across the counting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// From `x < boundary` to `x >= boundary`.
    In,
    /// From `x >= boundary` to `x < boundary`.
    Out,
}

/// One crossing fired during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Crossing {
    pub id: u64,
    pub direction: Direction,
}

/// Counts objects crossing a vertical line, per stream.
///
/// Remembers the last x-coordinate seen for each id. A crossing fires when an
/// id's side of the line differs from the side it was on at its previous
/// observation. The first observation of an id never fires.
#[derive(Debug, Clone, Default)]
pub struct CrossingCounter {
    history: HashMap<u64, i32>,
    total_in: u64,
    total_out: u64,
}

impl CrossingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the positions reported for one frame.
    ///
    /// # Arguments
    /// * `positions` - (id, centroid) pairs currently tracked
    /// * `boundary_x` - counting line position for this frame
    ///
    /// # Returns
    /// Crossings fired by this frame, in input order.
    pub fn update<I>(&mut self, positions: I, boundary_x: i32) -> Vec<Crossing>
    where
        I: IntoIterator<Item = (u64, Centroid)>,
    {
        let mut crossings = Vec::new();

        for (id, position) in positions {
            let x = position.x;
            if let Some(prev) = self.history.insert(id, x) {
                let direction = if prev < boundary_x && x >= boundary_x {
                    Some(Direction::In)
                } else if prev >= boundary_x && x < boundary_x {
                    Some(Direction::Out)
                } else {
                    None
                };

                if let Some(direction) = direction {
                    match direction {
                        Direction::In => self.total_in += 1,
                        Direction::Out => self.total_out += 1,
                    }
                    debug!(
                        "ID {} crossed {:?} at x={} (line {}, prev {})",
                        id, direction, x, boundary_x, prev
                    );
                    crossings.push(Crossing { id, direction });
                }
            }
        }

        crossings
    }

    /// Total crossings into the counted region.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Total crossings out of the counted region.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Net occupancy, `total_in - total_out`. Negative when more exits
    /// than entries were observed.
    pub fn occupancy(&self) -> i64 {
        self.total_in as i64 - self.total_out as i64
    }

    /// Last recorded x-coordinate for an id.
    pub fn last_x(&self, id: u64) -> Option<i32> {
        self.history.get(&id).copied()
    }

    /// Ids with recorded history, in no particular order.
    pub fn tracked_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.history.keys().copied()
    }

    /// Number of ids with recorded history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Drop the history of one id. Returns whether it was present.
    pub fn forget(&mut self, id: u64) -> bool {
        self.history.remove(&id).is_some()
    }

    /// Drop the history of several ids, typically those the tracker evicted.
    pub fn prune<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a u64>,
    {
        for id in ids {
            self.history.remove(id);
        }
    }

    /// Clear history and counters.
    pub fn reset(&mut self) {
        self.history.clear();
        self.total_in = 0;
        self.total_out = 0;
    }
}
