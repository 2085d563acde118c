//! Optimal minimum-cost assignment (Hungarian / Kuhn-Munkres).
#![allow(clippy::needless_range_loop)]

use nalgebra::DMatrix;

use super::{Assigner, Matches};

/// Cost substituted for non-finite entries so the solver always terminates.
const INVALID_COST: f64 = 1.0e12;

/// Globally optimal assignment minimising the summed distance.
///
/// Matches exactly `min(n_rows, n_cols)` pairs. Runs in O(n^2 m) for an
/// n x m matrix with n <= m (the matrix is transposed otherwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HungarianAssigner;

impl HungarianAssigner {
    pub fn new() -> Self {
        Self
    }
}

impl Assigner for HungarianAssigner {
    fn assign(&self, distances: &DMatrix<f64>) -> Matches {
        let (n_rows, n_cols) = distances.shape();
        if n_rows == 0 || n_cols == 0 {
            return Matches::none(n_rows, n_cols);
        }

        let cost = distances.map(|d| if d.is_finite() { d } else { INVALID_COST });

        let mut pairs: Vec<(usize, usize)> = if n_rows <= n_cols {
            solve(&cost)
                .into_iter()
                .enumerate()
                .filter_map(|(row, col)| col.map(|c| (row, c)))
                .collect()
        } else {
            solve(&cost.transpose())
                .into_iter()
                .enumerate()
                .filter_map(|(col, row)| row.map(|r| (r, col)))
                .collect()
        };
        pairs.sort_unstable();

        Matches::from_pairs(pairs, n_rows, n_cols)
    }
}

/// Shortest augmenting path with row/column potentials.
///
/// Requires `cost.nrows() <= cost.ncols()`. Returns the column assigned to
/// each row.
fn solve(cost: &DMatrix<f64>) -> Vec<Option<usize>> {
    let n = cost.nrows();
    let m = cost.ncols();
    debug_assert!(n <= m);

    // 1-based: index 0 is the virtual source row/column
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; m + 1];
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0;
        let mut minv = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;

            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cur = cost[(i0 - 1, j - 1)] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Augment along the alternating path
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![None; n];
    for j in 1..=m {
        if p[j] != 0 {
            assignment[p[j] - 1] = Some(j - 1);
        }
    }
    assignment
}
