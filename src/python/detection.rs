//! Python wrapper for Detection.

use pyo3::prelude::*;

use super::to_py_err;
use crate::Detection;

/// One detector output: a bounding box, a confidence score and a class
/// label.
///
/// Example:
///     >>> from occupancy_rs import Detection
///     >>> d = Detection(10, 20, 50, 80, score=0.9, label=0)
///     >>> d.centroid
///     (30, 50)
#[pyclass(name = "Detection")]
#[derive(Clone)]
pub struct PyDetection {
    pub(crate) inner: Detection,
}

#[pymethods]
impl PyDetection {
    /// Create a detection. Raises ValueError on an empty box or a score
    /// outside [0, 1].
    #[new]
    #[pyo3(signature = (x1, y1, x2, y2, score=1.0, label=0))]
    fn new(x1: i32, y1: i32, x2: i32, y2: i32, score: f32, label: u32) -> PyResult<Self> {
        let inner = Detection::from_corners(x1, y1, x2, y2, score, label).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Box corners as `(x1, y1, x2, y2)`.
    #[getter]
    fn bbox(&self) -> (i32, i32, i32, i32) {
        let b = self.inner.bbox;
        (b.x1, b.y1, b.x2, b.y2)
    }

    #[getter]
    fn score(&self) -> f32 {
        self.inner.score
    }

    #[getter]
    fn label(&self) -> u32 {
        self.inner.label
    }

    #[getter]
    fn centroid(&self) -> (i32, i32) {
        self.inner.centroid().into()
    }

    fn __repr__(&self) -> String {
        let b = self.inner.bbox;
        format!(
            "Detection(({}, {}, {}, {}), score={}, label={})",
            b.x1, b.y1, b.x2, b.y2, self.inner.score, self.inner.label
        )
    }
}

impl PyDetection {
    pub(crate) fn from_detection(inner: Detection) -> Self {
        Self { inner }
    }
}
