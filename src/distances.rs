//! Distance computation between tracked positions and candidate centroids.

use nalgebra::DMatrix;

use crate::centroid::Centroid;

/// Euclidean (L2) distance between two centroids.
#[inline]
pub fn euclidean(a: &Centroid, b: &Centroid) -> f64 {
    a.distance(b)
}

/// Compute the pairwise Euclidean distance matrix.
///
/// # Arguments
/// * `objects` - Positions of tracked objects, in registry order
/// * `candidates` - Candidate centroids for this frame, in detector order
///
/// # Returns
/// Distance matrix of shape (n_objects, n_candidates).
/// Entry (i, j) is the distance between object i and candidate j.
pub fn distance_matrix(objects: &[Centroid], candidates: &[Centroid]) -> DMatrix<f64> {
    DMatrix::from_fn(objects.len(), candidates.len(), |i, j| {
        euclidean(&objects[i], &candidates[j])
    })
}
