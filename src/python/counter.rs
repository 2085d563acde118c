//! Python wrapper for CrossingCounter.

use pyo3::prelude::*;

use crate::counter::Direction;
use crate::{Centroid, CrossingCounter};

/// Directional counter for a vertical counting line.
///
/// Example:
///     >>> counter = CrossingCounter()
///     >>> counter.update([(0, (90, 50))], 100)
///     []
///     >>> counter.update([(0, (110, 50))], 100)
///     [(0, 'in')]
#[pyclass(name = "CrossingCounter")]
#[derive(Default)]
pub struct PyCrossingCounter {
    inner: CrossingCounter,
}

#[pymethods]
impl PyCrossingCounter {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Process one frame of `(id, (x, y))` pairs.
    ///
    /// Returns:
    ///     The crossings fired as `(id, "in" | "out")` tuples.
    fn update(
        &mut self,
        positions: Vec<(u64, (i32, i32))>,
        boundary_x: i32,
    ) -> Vec<(u64, &'static str)> {
        self.inner
            .update(
                positions.into_iter().map(|(id, p)| (id, Centroid::from(p))),
                boundary_x,
            )
            .into_iter()
            .map(|c| {
                let direction = match c.direction {
                    Direction::In => "in",
                    Direction::Out => "out",
                };
                (c.id, direction)
            })
            .collect()
    }

    /// Drop the history of ids the tracker evicted.
    fn prune(&mut self, ids: Vec<u64>) {
        self.inner.prune(&ids);
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    #[getter]
    fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    #[getter]
    fn total_out(&self) -> u64 {
        self.inner.total_out()
    }

    /// `total_in - total_out`; may be negative.
    #[getter]
    fn occupancy(&self) -> i64 {
        self.inner.occupancy()
    }

    fn __repr__(&self) -> String {
        format!(
            "CrossingCounter(total_in={}, total_out={}, occupancy={})",
            self.inner.total_in(),
            self.inner.total_out(),
            self.inner.occupancy()
        )
    }
}
