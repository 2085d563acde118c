//! Python wrapper for TrackedObject.

use pyo3::prelude::*;

use crate::TrackedObject;

/// Snapshot of a tracked object after an update. Read-only.
#[pyclass(name = "TrackedObject")]
#[derive(Clone)]
pub struct PyTrackedObject {
    inner: TrackedObject,
}

impl PyTrackedObject {
    pub fn from_tracked_object(obj: &TrackedObject) -> Self {
        Self { inner: obj.clone() }
    }
}

#[pymethods]
impl PyTrackedObject {
    #[getter]
    fn id(&self) -> u64 {
        self.inner.id
    }

    /// Last matched centroid as `(x, y)`.
    #[getter]
    fn position(&self) -> (i32, i32) {
        self.inner.position.into()
    }

    /// Consecutive frames without a match.
    #[getter]
    fn disappeared_count(&self) -> u32 {
        self.inner.disappeared_count
    }

    /// Whether the object was matched in the most recent update.
    #[getter]
    fn is_visible(&self) -> bool {
        self.inner.is_visible()
    }

    #[getter]
    fn age(&self) -> u32 {
        self.inner.age
    }

    fn __repr__(&self) -> String {
        format!(
            "TrackedObject(id={}, position=({}, {}), disappeared_count={})",
            self.inner.id, self.inner.position.x, self.inner.position.y, self.inner.disappeared_count
        )
    }
}
