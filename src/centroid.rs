//! Centroid points and bounding box centroid extraction.

use serde::{Deserialize, Serialize};

use crate::detection::BoundingBox;

/// An integer 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Centroid {
    pub x: i32,
    pub y: i32,
}

impl Centroid {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Midpoint of the box diagonal, truncated toward zero.
    ///
    /// The sum is taken in `i64` so boxes near the `i32` limits do not overflow.
    pub fn from_box(bbox: &BoundingBox) -> Self {
        let x = (i64::from(bbox.x1) + i64::from(bbox.x2)) / 2;
        let y = (i64::from(bbox.y1) + i64::from(bbox.y2)) / 2;
        Self {
            x: x as i32,
            y: y as i32,
        }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Centroid) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Centroid {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Centroid> for (i32, i32) {
    fn from(c: Centroid) -> Self {
        (c.x, c.y)
    }
}

/// Extract one centroid per box, preserving order.
pub fn centroids<'a, I>(boxes: I) -> Vec<Centroid>
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    boxes.into_iter().map(Centroid::from_box).collect()
}
