//! Per-stream frame pump.
//!
//! Wires a frame source and a detector into one private tracker, crossing
//! counter and alert policy. Each stream gets its own `StreamPipeline`;
//! pipelines share no state, so independent streams can run on separate
//! threads.

use log::{debug, info};
use serde::Serialize;

use crate::alert::{Alert, AlertPolicy};
use crate::boundary::BoundaryResolver;
use crate::centroid::Centroid;
use crate::config::PipelineConfig;
use crate::counter::{Crossing, CrossingCounter};
use crate::detection::Detection;
use crate::tracker::{Tracker, TrackerConfig};
use crate::Result;

/// Minimal view of a video frame needed by the pipeline.
pub trait Frame {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Produces frames for one stream.
///
/// `Ok(None)` signals end-of-stream; `Err` is a read failure and ends the
/// pump without retry.
pub trait FrameSource {
    type Frame: Frame;

    fn next_frame(&mut self) -> Result<Option<Self::Frame>>;
}

/// External object detector: one frame in, ordered detections out.
pub trait Detector<F: ?Sized> {
    fn detect(&mut self, frame: &F) -> Result<Vec<Detection>>;
}

impl<F: ?Sized, T> Detector<F> for T
where
    T: FnMut(&F) -> Result<Vec<Detection>>,
{
    fn detect(&mut self, frame: &F) -> Result<Vec<Detection>> {
        self(frame)
    }
}

/// One tracked object as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObjectReport {
    pub id: u64,
    pub x: i32,
    pub y: i32,
    pub disappeared_count: u32,
    /// Matched in this frame.
    pub visible: bool,
}

/// Everything the presentation layer receives for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame_index: u64,
    pub boundary_x: i32,
    pub objects: Vec<ObjectReport>,
    pub crossings: Vec<Crossing>,
    pub evicted: Vec<u64>,
    pub total_in: u64,
    pub total_out: u64,
    pub occupancy: i64,
    pub alert: Alert,
}

/// Tracking and counting state for a single video stream.
#[derive(Debug)]
pub struct StreamPipeline {
    config: PipelineConfig,
    tracker: Tracker,
    counter: CrossingCounter,
    alert_policy: AlertPolicy,
    boundary: BoundaryResolver,
    frame_index: u64,
}

impl StreamPipeline {
    /// Create a pipeline from a validated configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let tracker_config = config.tracker_config();
        Self::with_tracker_config(config, tracker_config)
    }

    /// Create a pipeline with an explicit tracker configuration, e.g. one
    /// carrying a custom assigner.
    pub fn with_tracker_config(config: PipelineConfig, tracker_config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        let tracker = Tracker::new(tracker_config)?;

        Ok(Self {
            alert_policy: config.alert_policy(),
            boundary: BoundaryResolver::new(config.boundary),
            counter: CrossingCounter::new(),
            tracker,
            config,
            frame_index: 0,
        })
    }

    /// Run one frame through alerting, tracking and counting.
    ///
    /// The update is applied completely or not at all; there is no failure
    /// path once detections have been produced.
    pub fn process(&mut self, frame_width: u32, detections: &[Detection]) -> FrameReport {
        let alert = self.alert_policy.evaluate(detections);

        let centroids: Vec<Centroid> = detections
            .iter()
            .filter(|d| self.config.tracks_class(d.label) && d.score >= self.config.min_score)
            .map(Detection::centroid)
            .collect();

        let boundary_x = self.boundary.resolve(frame_width);

        let (objects, crossings) = {
            let tracked = self.tracker.update(&centroids);
            let crossings = self
                .counter
                .update(tracked.iter().map(|o| (o.id, o.position)), boundary_x);
            let objects: Vec<ObjectReport> = tracked
                .iter()
                .map(|o| ObjectReport {
                    id: o.id,
                    x: o.position.x,
                    y: o.position.y,
                    disappeared_count: o.disappeared_count,
                    visible: o.is_visible(),
                })
                .collect();
            (objects, crossings)
        };

        let evicted = self.tracker.evicted().to_vec();
        self.counter.prune(&evicted);

        let report = FrameReport {
            frame_index: self.frame_index,
            boundary_x,
            objects,
            crossings,
            evicted,
            total_in: self.counter.total_in(),
            total_out: self.counter.total_out(),
            occupancy: self.counter.occupancy(),
            alert,
        };

        debug!(
            "Frame {}: {} tracked, in={} out={} inside={}",
            report.frame_index,
            report.objects.len(),
            report.total_in,
            report.total_out,
            report.occupancy
        );

        self.frame_index += 1;
        report
    }

    /// Pump frames until end-of-stream or the first failure.
    ///
    /// `sink` receives every frame with its report. Source and detector
    /// errors are returned as-is; frames processed before the failure keep
    /// their effect on the counters.
    ///
    /// # Returns
    /// Number of frames processed.
    pub fn run<S, D, K>(&mut self, source: &mut S, detector: &mut D, mut sink: K) -> Result<u64>
    where
        S: FrameSource,
        D: Detector<S::Frame>,
        K: FnMut(&S::Frame, &FrameReport),
    {
        let mut processed = 0;

        while let Some(frame) = source.next_frame()? {
            let detections = detector.detect(&frame)?;
            let report = self.process(frame.width(), &detections);
            sink(&frame, &report);
            processed += 1;
        }

        info!(
            "Stream ended after {} frames: in={} out={} inside={}",
            processed,
            self.counter.total_in(),
            self.counter.total_out(),
            self.counter.occupancy()
        );
        Ok(processed)
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn counter(&self) -> &CrossingCounter {
        &self.counter
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Index the next processed frame will get.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryStrategy;
    use crate::Error;

    struct TestFrame {
        width: u32,
        people_x: Vec<i32>,
    }

    impl Frame for TestFrame {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            100
        }
    }

    struct VecSource {
        frames: std::vec::IntoIter<TestFrame>,
        fail_at_end: bool,
    }

    impl VecSource {
        fn new(frames: Vec<TestFrame>) -> Self {
            Self {
                frames: frames.into_iter(),
                fail_at_end: false,
            }
        }
    }

    impl FrameSource for VecSource {
        type Frame = TestFrame;

        fn next_frame(&mut self) -> Result<Option<TestFrame>> {
            match self.frames.next() {
                Some(frame) => Ok(Some(frame)),
                None if self.fail_at_end => Err(Error::FrameSource("camera unplugged".into())),
                None => Ok(None),
            }
        }
    }

    fn person(x: i32) -> Detection {
        Detection::from_corners(x - 10, 40, x + 10, 60, 0.9, 0).unwrap()
    }

    fn detect_people(frame: &TestFrame) -> Result<Vec<Detection>> {
        Ok(frame.people_x.iter().map(|&x| person(x)).collect())
    }

    fn frames(xs: &[&[i32]]) -> Vec<TestFrame> {
        xs.iter()
            .map(|people| TestFrame {
                width: 200,
                people_x: people.to_vec(),
            })
            .collect()
    }

    #[test]
    fn test_process_counts_crossing() {
        let mut pipeline = StreamPipeline::new(PipelineConfig::default()).unwrap();

        let r0 = pipeline.process(200, &[person(90)]);
        assert_eq!(r0.boundary_x, 100);
        assert_eq!(r0.frame_index, 0);
        assert!(r0.crossings.is_empty());

        let r1 = pipeline.process(200, &[person(110)]);
        assert_eq!(r1.frame_index, 1);
        assert_eq!(r1.crossings.len(), 1);
        assert_eq!((r1.total_in, r1.total_out, r1.occupancy), (1, 0, 1));
        assert_eq!(r1.objects[0].id, 0);
        assert_eq!(r1.objects[0].x, 110);
    }

    #[test]
    fn test_process_filters_untracked_classes() {
        let mut pipeline = StreamPipeline::new(PipelineConfig::default()).unwrap();
        let car = Detection::from_corners(0, 0, 50, 50, 0.9, 2).unwrap();

        let report = pipeline.process(200, &[car, person(30)]);
        assert_eq!(report.objects.len(), 1);
        assert_eq!((report.objects[0].x, report.objects[0].y), (30, 50));
    }

    #[test]
    fn test_process_min_score() {
        let mut config = PipelineConfig::default();
        config.min_score = 0.5;
        let mut pipeline = StreamPipeline::new(config).unwrap();
        let weak = Detection::from_corners(0, 0, 20, 20, 0.3, 0).unwrap();

        assert!(pipeline.process(200, &[weak]).objects.is_empty());
    }

    #[test]
    fn test_process_alert_independent_of_tracking() {
        let mut pipeline = StreamPipeline::new(PipelineConfig::default()).unwrap();
        let knife = Detection::from_corners(5, 5, 15, 15, 0.8, 43).unwrap();

        let report = pipeline.process(200, &[knife]);
        assert!(report.alert.triggered);
        assert_eq!(report.alert.matches, vec![knife]);
        assert!(report.objects.is_empty(), "knife is not tracked");
    }

    #[test]
    fn test_process_prunes_evicted_history() {
        let mut config = PipelineConfig::default();
        config.max_disappeared = 1;
        let mut pipeline = StreamPipeline::new(config).unwrap();

        assert!(pipeline.process(200, &[person(50)]).objects[0].visible);
        assert_eq!(pipeline.counter().history_len(), 1);

        pipeline.process(200, &[]);
        let missing = pipeline.process(200, &[]);
        assert!(!missing.objects[0].visible);
        assert_eq!(missing.objects[0].disappeared_count, 1);

        let report = pipeline.process(200, &[]);
        assert_eq!(report.evicted, vec![0]);
        assert_eq!(pipeline.counter().history_len(), 0);
    }

    #[test]
    fn test_pinned_boundary() {
        let mut config = PipelineConfig::default();
        config.boundary = BoundaryStrategy::PinnedHalfWidth;
        let mut pipeline = StreamPipeline::new(config).unwrap();

        assert_eq!(pipeline.process(200, &[]).boundary_x, 100);
        assert_eq!(pipeline.process(400, &[]).boundary_x, 100);
    }

    #[test]
    fn test_run_until_end_of_stream() {
        let mut pipeline = StreamPipeline::new(PipelineConfig::default()).unwrap();
        let mut source = VecSource::new(frames(&[&[80], &[95], &[105], &[120], &[90]]));
        let mut detector = detect_people;

        let mut occupancy = Vec::new();
        let processed = pipeline
            .run(&mut source, &mut detector, |_, report| occupancy.push(report.occupancy))
            .unwrap();

        assert_eq!(processed, 5);
        assert_eq!(occupancy, vec![0, 0, 1, 1, 0]);
        assert_eq!(pipeline.counter().total_in(), 1);
        assert_eq!(pipeline.counter().total_out(), 1);
        assert_eq!(pipeline.frame_index(), 5);
    }

    #[test]
    fn test_run_stops_on_read_failure() {
        let mut pipeline = StreamPipeline::new(PipelineConfig::default()).unwrap();
        let mut source = VecSource::new(frames(&[&[80], &[120]]));
        source.fail_at_end = true;
        let mut detector = detect_people;

        let result = pipeline.run(&mut source, &mut detector, |_, _| {});

        assert!(matches!(result, Err(Error::FrameSource(_))));
        // Frames before the failure were applied
        assert_eq!(pipeline.counter().total_in(), 1);
    }

    #[test]
    fn test_run_stops_on_detector_failure() {
        let mut pipeline = StreamPipeline::new(PipelineConfig::default()).unwrap();
        let mut source = VecSource::new(frames(&[&[80], &[120], &[130]]));
        let mut calls = 0;
        let mut detector = |frame: &TestFrame| {
            calls += 1;
            if calls == 2 {
                return Err(Error::Detector("inference failed".into()));
            }
            detect_people(frame)
        };

        let result = pipeline.run(&mut source, &mut detector, |_, _| {});
        assert!(matches!(result, Err(Error::Detector(_))));
        assert_eq!(pipeline.frame_index(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.boundary = BoundaryStrategy::Fixed(-5);
        assert!(StreamPipeline::new(config).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let mut pipeline = StreamPipeline::new(PipelineConfig::default()).unwrap();
        let report = pipeline.process(200, &[person(40)]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["boundary_x"], 100);
        assert_eq!(json["objects"][0]["id"], 0);
        assert_eq!(json["alert"]["triggered"], false);
    }
}
