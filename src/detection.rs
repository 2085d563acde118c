//! Detection struct for input to the tracker.

use serde::{Deserialize, Serialize};

use crate::centroid::Centroid;
use crate::{Error, Result};

/// Axis-aligned integer bounding box, `x1 < x2` and `y1 < y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    /// Create a bounding box from corner coordinates.
    ///
    /// Rejects empty or inverted boxes.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Self> {
        if x1 >= x2 || y1 >= y2 {
            return Err(Error::InvalidDetection(format!(
                "Bounding box ({}, {}, {}, {}) must satisfy x1 < x2 and y1 < y2",
                x1, y1, x2, y2
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn width(&self) -> i64 {
        i64::from(self.x2) - i64::from(self.x1)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.y2) - i64::from(self.y1)
    }

    pub fn centroid(&self) -> Centroid {
        Centroid::from_box(self)
    }
}

impl TryFrom<[i32; 4]> for BoundingBox {
    type Error = Error;

    fn try_from([x1, y1, x2, y2]: [i32; 4]) -> Result<Self> {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// A detection produced by the external detector for one frame.
///
/// Fixed shape and validated once on construction, so the tracking code
/// never re-checks individual fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDetection")]
pub struct Detection {
    /// Bounding box in pixel coordinates.
    pub bbox: BoundingBox,

    /// Confidence score in [0, 1].
    pub score: f32,

    /// Integer class label (COCO index for the usual detectors).
    pub label: u32,
}

impl Detection {
    /// Create a detection, validating the score range.
    pub fn new(bbox: BoundingBox, score: f32, label: u32) -> Result<Self> {
        if !(0.0..=1.0).contains(&score) {
            return Err(Error::InvalidDetection(format!(
                "Score {} outside [0, 1]",
                score
            )));
        }
        Ok(Self { bbox, score, label })
    }

    /// Create a detection from raw corner coordinates.
    pub fn from_corners(
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        score: f32,
        label: u32,
    ) -> Result<Self> {
        Self::new(BoundingBox::new(x1, y1, x2, y2)?, score, label)
    }

    pub fn centroid(&self) -> Centroid {
        self.bbox.centroid()
    }
}

#[derive(Deserialize)]
struct RawDetection {
    bbox: BoundingBox,
    score: f32,
    label: u32,
}

impl TryFrom<RawDetection> for Detection {
    type Error = Error;

    fn try_from(raw: RawDetection) -> Result<Self> {
        Detection::new(raw.bbox, raw.score, raw.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_new() {
        let b = BoundingBox::new(1, 2, 11, 22).unwrap();
        assert_eq!(b.width(), 10);
        assert_eq!(b.height(), 20);
    }

    #[test]
    fn test_bbox_rejects_degenerate() {
        assert!(BoundingBox::new(5, 0, 5, 10).is_err(), "zero width");
        assert!(BoundingBox::new(0, 5, 10, 5).is_err(), "zero height");
        assert!(BoundingBox::new(10, 0, 0, 10).is_err(), "inverted x");
    }

    #[test]
    fn test_detection_score_range() {
        let b = BoundingBox::new(0, 0, 10, 10).unwrap();
        assert!(Detection::new(b, 0.0, 0).is_ok());
        assert!(Detection::new(b, 1.0, 0).is_ok());
        assert!(Detection::new(b, 1.01, 0).is_err());
        assert!(Detection::new(b, -0.1, 0).is_err());
        assert!(Detection::new(b, f32::NAN, 0).is_err());
    }

    #[test]
    fn test_detection_centroid() {
        let det = Detection::from_corners(100, 100, 151, 201, 0.9, 0).unwrap();
        assert_eq!(det.centroid(), Centroid::new(125, 150));
    }

    #[test]
    fn test_detection_deserialize() {
        let det: Detection =
            serde_json::from_str(r#"{"bbox": [0, 0, 20, 40], "score": 0.75, "label": 43}"#)
                .unwrap();
        assert_eq!(det.bbox, BoundingBox::new(0, 0, 20, 40).unwrap());
        assert_eq!(det.label, 43);
    }

    #[test]
    fn test_detection_deserialize_rejects_invalid() {
        let bad_box = serde_json::from_str::<Detection>(
            r#"{"bbox": [20, 0, 10, 40], "score": 0.5, "label": 0}"#,
        );
        assert!(bad_box.is_err());

        let bad_score = serde_json::from_str::<Detection>(
            r#"{"bbox": [0, 0, 10, 40], "score": 1.5, "label": 0}"#,
        );
        assert!(bad_score.is_err());
    }
}
