//! Greedy row-minimum assignment.

use std::cmp::Ordering;

use nalgebra::DMatrix;

use super::{Assigner, Matches};

/// Greedy assignment ordered by each row's nearest candidate.
///
/// Rows are resolved in ascending order of their minimum distance (ties keep
/// row order); each row claims its arg-min column (first column on ties) if
/// neither is taken yet, otherwise the row is skipped for this frame.
///
/// This does not guarantee a minimal total distance: a row whose nearest
/// column was claimed earlier stays unmatched even if another column is free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyAssigner;

impl GreedyAssigner {
    pub fn new() -> Self {
        Self
    }
}

/// Index and value of the first minimum of a row.
fn row_argmin(distances: &DMatrix<f64>, row: usize) -> (usize, f64) {
    let mut best_col = 0;
    let mut best = distances[(row, 0)];
    for col in 1..distances.ncols() {
        let d = distances[(row, col)];
        if d.total_cmp(&best) == Ordering::Less {
            best = d;
            best_col = col;
        }
    }
    (best_col, best)
}

impl Assigner for GreedyAssigner {
    fn assign(&self, distances: &DMatrix<f64>) -> Matches {
        let (n_rows, n_cols) = distances.shape();
        if n_rows == 0 || n_cols == 0 {
            return Matches::none(n_rows, n_cols);
        }

        let nearest: Vec<(usize, f64)> = (0..n_rows).map(|r| row_argmin(distances, r)).collect();

        // Stable sort keeps registry order among equal minima
        let mut order: Vec<usize> = (0..n_rows).collect();
        order.sort_by(|&a, &b| nearest[a].1.total_cmp(&nearest[b].1));

        // from_pairs skips rows whose arg-min column is already taken
        Matches::from_pairs(order.into_iter().map(|row| (row, nearest[row].0)), n_rows, n_cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assign(rows: usize, cols: usize, values: &[f64]) -> Matches {
        GreedyAssigner.assign(&DMatrix::from_row_slice(rows, cols, values))
    }

    #[test]
    fn test_perfect_matches() {
        let m = assign(3, 3, &[
            0.5, 0.9, 0.8,
            0.9, 0.3, 0.7,
            0.8, 0.7, 0.4,
        ]);

        // Row order by minimum: row 1 (0.3), row 2 (0.4), row 0 (0.5)
        assert_eq!(m.pairs, vec![(1, 1), (2, 2), (0, 0)]);
        assert!(m.unmatched_rows.is_empty());
        assert!(m.unmatched_cols.is_empty());
    }

    #[test]
    fn test_empty() {
        let m = assign(0, 0, &[]);
        assert!(m.is_empty());

        let m = GreedyAssigner.assign(&DMatrix::zeros(2, 0));
        assert!(m.is_empty());
        assert_eq!(m.unmatched_rows, vec![0, 1]);
    }

    #[test]
    fn test_contested_column_skips_row() {
        // Both rows prefer column 0; row 1 is closer so it wins,
        // row 0 is skipped even though column 1 is free
        let m = assign(2, 2, &[
            2.0, 3.0,
            1.0, 9.0,
        ]);

        assert_eq!(m.pairs, vec![(1, 0)]);
        assert_eq!(m.unmatched_rows, vec![0]);
        assert_eq!(m.unmatched_cols, vec![1]);
    }

    #[test]
    fn test_more_columns_than_rows() {
        let m = assign(2, 4, &[
            0.5, 2.0, 1.5, 3.0,
            1.8, 0.6, 2.5, 2.2,
        ]);

        assert_eq!(m.pairs, vec![(0, 0), (1, 1)]);
        assert_eq!(m.unmatched_cols, vec![2, 3]);
    }

    #[test]
    fn test_more_rows_than_columns() {
        let m = assign(3, 1, &[
            4.0,
            1.0,
            2.0,
        ]);

        assert_eq!(m.pairs, vec![(1, 0)]);
        assert_eq!(m.unmatched_rows, vec![0, 2]);
    }

    #[test]
    fn test_ties_resolved_by_order() {
        // Equal row minima: earlier row resolves first; equal columns: first column wins
        let m = assign(2, 2, &[
            1.0, 1.0,
            1.0, 1.0,
        ]);

        assert_eq!(m.pairs, vec![(0, 0)]);
        assert_eq!(m.unmatched_rows, vec![1]);
        assert_eq!(m.unmatched_cols, vec![1]);
    }

    #[test]
    fn test_one_to_one() {
        let m = assign(4, 3, &[
            0.1, 0.2, 0.3,
            0.1, 0.2, 0.3,
            0.3, 0.1, 0.2,
            0.2, 0.3, 0.1,
        ]);

        let rows: HashSet<_> = m.pairs.iter().map(|p| p.0).collect();
        let cols: HashSet<_> = m.pairs.iter().map(|p| p.1).collect();
        assert_eq!(rows.len(), m.len());
        assert_eq!(cols.len(), m.len());
        assert_eq!(m.len() + m.unmatched_rows.len(), 4);
        assert_eq!(m.len() + m.unmatched_cols.len(), 3);
    }

    #[test]
    fn test_deterministic() {
        let matrix = DMatrix::from_fn(6, 5, |i, j| ((i * 7 + j * 3) % 5) as f64);
        let first = GreedyAssigner.assign(&matrix);
        for _ in 0..10 {
            assert_eq!(GreedyAssigner.assign(&matrix), first);
        }
    }
}
