//! Python wrapper for AlertPolicy.

use pyo3::prelude::*;

use super::detection::PyDetection;
use crate::AlertPolicy;

/// Flags detections whose class label is restricted.
#[pyclass(name = "AlertPolicy")]
pub struct PyAlertPolicy {
    inner: AlertPolicy,
}

#[pymethods]
impl PyAlertPolicy {
    /// Args:
    ///     restricted: Class labels that trigger an alert. Default: knife
    ///         and scissors (COCO 43 and 76).
    #[new]
    #[pyo3(signature = (restricted=None))]
    fn new(restricted: Option<Vec<u32>>) -> Self {
        let inner = match restricted {
            Some(labels) => AlertPolicy::new(labels),
            None => AlertPolicy::default(),
        };
        Self { inner }
    }

    /// A policy that never triggers.
    #[staticmethod]
    fn disabled() -> Self {
        Self {
            inner: AlertPolicy::disabled(),
        }
    }

    /// Returns:
    ///     `(triggered, matching_detections)`.
    fn evaluate(&self, detections: Vec<PyDetection>) -> (bool, Vec<PyDetection>) {
        let detections: Vec<_> = detections.iter().map(|d| d.inner).collect();
        let alert = self.inner.evaluate(&detections);
        let matches = alert
            .matches
            .into_iter()
            .map(PyDetection::from_detection)
            .collect();
        (alert.triggered, matches)
    }

    fn is_restricted(&self, label: u32) -> bool {
        self.inner.is_restricted(label)
    }

    #[getter]
    fn restricted(&self) -> Vec<u32> {
        self.inner.restricted().iter().copied().collect()
    }
}
