//! Python wrapper for Tracker.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::de::DeserializeOwned;

use super::to_py_err;
use super::tracked_object::PyTrackedObject;
use crate::matching::AssignmentKind;
use crate::tracker::DEFAULT_MAX_DISAPPEARED;
use crate::{Centroid, LeftoverPolicy, Tracker, TrackerConfig};

/// Parse a snake_case variant name into one of the library's enums.
pub(crate) fn parse_variant<T: DeserializeOwned>(what: &str, name: &str) -> PyResult<T> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|_| PyValueError::new_err(format!("unknown {}: '{}'", what, name)))
}

/// Centroid tracker.
///
/// Keeps a stable id for each object across frames by matching new
/// centroids to the previous frame's objects by distance.
///
/// Example:
///     >>> from occupancy_rs import Tracker
///     >>> tracker = Tracker(max_disappeared=20)
///     >>> [o.id for o in tracker.update([(100, 100), (300, 120)])]
///     [0, 1]
#[pyclass(name = "Tracker")]
pub struct PyTracker {
    inner: Tracker,
}

#[pymethods]
impl PyTracker {
    /// Create a new Tracker.
    ///
    /// Args:
    ///     max_disappeared: Frames an object may go unmatched before it is
    ///         evicted. Default: 40.
    ///     assignment: "greedy" (default) or "hungarian".
    ///     leftover_policy: "age_all" (default) or "legacy".
    #[new]
    #[pyo3(signature = (
        max_disappeared=DEFAULT_MAX_DISAPPEARED,
        assignment="greedy",
        leftover_policy="age_all"
    ))]
    fn new(max_disappeared: u32, assignment: &str, leftover_policy: &str) -> PyResult<Self> {
        let assignment: AssignmentKind = parse_variant("assignment", assignment)?;
        let leftover_policy: LeftoverPolicy = parse_variant("leftover policy", leftover_policy)?;

        let config = TrackerConfig::new(max_disappeared)
            .with_assigner(assignment)
            .with_leftover_policy(leftover_policy);
        let inner = Tracker::new(config).map_err(to_py_err)?;

        Ok(Self { inner })
    }

    /// Update the tracker with this frame's centroids.
    ///
    /// Args:
    ///     centroids: List of `(x, y)` tuples. May be empty.
    ///
    /// Returns:
    ///     Every registered object in ascending id order.
    fn update(&mut self, centroids: Vec<(i32, i32)>) -> Vec<PyTrackedObject> {
        let centroids: Vec<Centroid> = centroids.into_iter().map(Centroid::from).collect();
        self.inner
            .update(&centroids)
            .into_iter()
            .map(PyTrackedObject::from_tracked_object)
            .collect()
    }

    /// Ids evicted during the most recent update.
    #[getter]
    fn evicted(&self) -> Vec<u64> {
        self.inner.evicted().to_vec()
    }

    /// Currently registered objects.
    #[getter]
    fn objects(&self) -> Vec<PyTrackedObject> {
        self.inner
            .objects()
            .iter()
            .map(PyTrackedObject::from_tracked_object)
            .collect()
    }

    #[getter]
    fn next_id(&self) -> u64 {
        self.inner.next_id()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Tracker(objects={}, next_id={}, assignment={})",
            self.inner.len(),
            self.inner.next_id(),
            self.inner.config().assigner.name()
        )
    }
}
