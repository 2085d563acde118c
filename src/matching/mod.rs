//! Detection-to-object assignment strategies.
//!
//! This module provides:
//! - `Assigner` trait for all assignment implementations
//! - `GreedyAssigner` - row-minimum greedy matching (default)
//! - `HungarianAssigner` - globally optimal minimum-cost matching
//! - `AssignerEnum` - static dispatch over the built-in strategies, with an
//!   escape hatch for user supplied assigners

mod greedy;
mod hungarian;

pub use greedy::GreedyAssigner;
pub use hungarian::HungarianAssigner;

use std::fmt;
use std::sync::Arc;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Result of assigning rows (tracked objects) to columns (detections).
///
/// Always one-to-one: no row and no column appears in more than one pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    /// Committed (row, col) pairs, in commit order.
    pub pairs: Vec<(usize, usize)>,
    /// Rows left without a column, ascending.
    pub unmatched_rows: Vec<usize>,
    /// Columns left without a row, ascending.
    pub unmatched_cols: Vec<usize>,
}

impl Matches {
    /// Build a match result from candidate pairs.
    ///
    /// Pairs that fall outside the matrix or reuse an already committed row or
    /// column are dropped, so the result is one-to-one whatever the source.
    pub fn from_pairs<I>(pairs: I, n_rows: usize, n_cols: usize) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut used_rows = vec![false; n_rows];
        let mut used_cols = vec![false; n_cols];
        let mut committed = Vec::new();

        for (row, col) in pairs {
            if row >= n_rows || col >= n_cols || used_rows[row] || used_cols[col] {
                log::debug!("Dropping conflicting assignment ({}, {})", row, col);
                continue;
            }
            used_rows[row] = true;
            used_cols[col] = true;
            committed.push((row, col));
        }

        Self {
            pairs: committed,
            unmatched_rows: (0..n_rows).filter(|&i| !used_rows[i]).collect(),
            unmatched_cols: (0..n_cols).filter(|&j| !used_cols[j]).collect(),
        }
    }

    /// No pairs; every row and column unmatched.
    pub fn none(n_rows: usize, n_cols: usize) -> Self {
        Self {
            pairs: Vec::new(),
            unmatched_rows: (0..n_rows).collect(),
            unmatched_cols: (0..n_cols).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Trait for assignment strategies used by the tracker.
///
/// Implementations receive a distance matrix of shape (n_objects, n_detections)
/// and decide which object takes which detection. Lifecycle handling
/// (aging, eviction, registration) stays in the tracker.
pub trait Assigner: Send + Sync + fmt::Debug {
    fn assign(&self, distances: &DMatrix<f64>) -> Matches;
}

/// Serializable name of a built-in assignment strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    #[default]
    Greedy,
    Hungarian,
}

/// Enum-based assigner for static dispatch of the built-in strategies.
#[derive(Clone, Debug)]
pub enum AssignerEnum {
    Greedy(GreedyAssigner),
    Hungarian(HungarianAssigner),
    Custom(Arc<dyn Assigner>),
}

impl AssignerEnum {
    /// Wrap a user supplied strategy.
    pub fn custom<A: Assigner + 'static>(assigner: A) -> Self {
        AssignerEnum::Custom(Arc::new(assigner))
    }

    #[inline]
    pub fn assign(&self, distances: &DMatrix<f64>) -> Matches {
        match self {
            AssignerEnum::Greedy(a) => a.assign(distances),
            AssignerEnum::Hungarian(a) => a.assign(distances),
            AssignerEnum::Custom(a) => a.assign(distances),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssignerEnum::Greedy(_) => "greedy",
            AssignerEnum::Hungarian(_) => "hungarian",
            AssignerEnum::Custom(_) => "custom",
        }
    }
}

impl Default for AssignerEnum {
    fn default() -> Self {
        AssignerEnum::Greedy(GreedyAssigner::new())
    }
}

impl From<AssignmentKind> for AssignerEnum {
    fn from(kind: AssignmentKind) -> Self {
        match kind {
            AssignmentKind::Greedy => AssignerEnum::Greedy(GreedyAssigner::new()),
            AssignmentKind::Hungarian => AssignerEnum::Hungarian(HungarianAssigner::new()),
        }
    }
}

impl From<GreedyAssigner> for AssignerEnum {
    fn from(a: GreedyAssigner) -> Self {
        AssignerEnum::Greedy(a)
    }
}

impl From<HungarianAssigner> for AssignerEnum {
    fn from(a: HungarianAssigner) -> Self {
        AssignerEnum::Hungarian(a)
    }
}

impl Assigner for AssignerEnum {
    #[inline]
    fn assign(&self, distances: &DMatrix<f64>) -> Matches {
        AssignerEnum::assign(self, distances)
    }
}
