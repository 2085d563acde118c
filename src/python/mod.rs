//! Python bindings for occupancy-rs using PyO3.
//!
//! Exposes the tracker, crossing counter, alert policy and per-stream
//! pipeline as plain Python classes. Positions cross the boundary as
//! `(x, y)` tuples; detections as `Detection` objects.

use pyo3::prelude::*;

mod alert;
mod counter;
mod detection;
mod pipeline;
mod tracked_object;
mod tracker;

pub use alert::PyAlertPolicy;
pub use counter::PyCrossingCounter;
pub use detection::PyDetection;
pub use pipeline::PyStreamPipeline;
pub use tracked_object::PyTrackedObject;
pub use tracker::PyTracker;

/// Python module for occupancy-rs.
///
/// Named `_occupancy_rs` with an underscore prefix for mixed Python/Rust
/// projects.
#[pymodule]
fn _occupancy_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core classes
    m.add_class::<PyDetection>()?;
    m.add_class::<PyTrackedObject>()?;
    m.add_class::<PyTracker>()?;

    // Counting and alerting
    m.add_class::<PyCrossingCounter>()?;
    m.add_class::<PyAlertPolicy>()?;
    m.add_class::<PyStreamPipeline>()?;

    m.add("COCO_PERSON", crate::COCO_PERSON)?;
    m.add("COCO_KNIFE", crate::COCO_KNIFE)?;
    m.add("COCO_SCISSORS", crate::COCO_SCISSORS)?;

    // Version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

/// Convert a library error into a Python `ValueError`.
pub(crate) fn to_py_err(err: crate::Error) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}
