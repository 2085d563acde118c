//! Python wrapper for StreamPipeline.
//!
//! Frames are produced on the Python side; each call to `process` takes the
//! frame width and the detector output and returns the frame report as a
//! JSON string.

use pyo3::prelude::*;

use super::detection::PyDetection;
use super::to_py_err;
use crate::{PipelineConfig, StreamPipeline};

#[pyclass(name = "StreamPipeline")]
pub struct PyStreamPipeline {
    inner: StreamPipeline,
}

#[pymethods]
impl PyStreamPipeline {
    /// Args:
    ///     config_json: Optional JSON configuration. Keys left out take
    ///         their defaults.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => PipelineConfig::from_json_str(json).map_err(to_py_err)?,
            None => PipelineConfig::default(),
        };
        let inner = StreamPipeline::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Run one frame and return its report serialized as JSON.
    fn process(&mut self, frame_width: u32, detections: Vec<PyDetection>) -> PyResult<String> {
        let detections: Vec<_> = detections.iter().map(|d| d.inner).collect();
        let report = self.inner.process(frame_width, &detections);
        serde_json::to_string(&report).map_err(|e| to_py_err(e.into()))
    }

    #[getter]
    fn total_in(&self) -> u64 {
        self.inner.counter().total_in()
    }

    #[getter]
    fn total_out(&self) -> u64 {
        self.inner.counter().total_out()
    }

    #[getter]
    fn occupancy(&self) -> i64 {
        self.inner.counter().occupancy()
    }
}
