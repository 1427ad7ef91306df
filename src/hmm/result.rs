//!
//! DP result definitions
//!
//! * `ForwardResult`: table of `F[i][q]`
//! * `BackwardResult`: table of `Bk[i][q]`
//! * `ViterbiResult`: table of `V[i][q]` and the backpointers
//!
//! Every table is `n x |Q|`, i.e. `table.row(i)` corresponds to `emissions[i]`.
//!
use crate::common::{first_argmax, Path, State};
use crate::error::{HmmError, Result};
use ndarray::{Array2, ArrayView1};
use serde::Serialize;

/// Struct that stores Forward algorithm result for the given emissions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardResult {
    pub table: Array2<f64>,
}

impl ForwardResult {
    /// The number of emissions that this result stores.
    pub fn n_emissions(&self) -> usize {
        self.table.nrows()
    }
    /// `F[i]`
    pub fn row(&self, i: usize) -> ArrayView1<f64> {
        self.table.row(i)
    }
    ///
    /// Full probability `P(x) = \sum_q F[n-1][q]`
    ///
    pub fn full_prob(&self) -> f64 {
        self.table.row(self.n_emissions() - 1).sum()
    }
}

/// Struct that stores Backward algorithm result for the given emissions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackwardResult {
    pub table: Array2<f64>,
}

impl BackwardResult {
    /// The number of emissions that this result stores.
    pub fn n_emissions(&self) -> usize {
        self.table.nrows()
    }
    /// `Bk[i]`
    pub fn row(&self, i: usize) -> ArrayView1<f64> {
        self.table.row(i)
    }
}

///
/// Struct that stores the Viterbi DP.
///
/// * `scores[i][q]` = max probability of a path ending at q emitting `x[0..=i]`
/// * `pointers[i][q]` = the predecessor state at `i-1` achieving the max
///   (row 0 is unused and filled with 0)
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViterbiResult {
    pub scores: Array2<f64>,
    pub pointers: Array2<State>,
}

impl ViterbiResult {
    /// The number of emissions that this result stores.
    pub fn n_emissions(&self) -> usize {
        self.scores.nrows()
    }
    ///
    /// The last state and its score `max_q V[n-1][q]`
    /// (the first maximum in state order).
    ///
    pub fn best_last(&self) -> Result<(State, f64)> {
        let last = self.n_emissions() - 1;
        match first_argmax(self.scores.row(last).iter().copied()) {
            Some((q, score)) if score > 0.0 => Ok((q, score)),
            _ => Err(HmmError::NoViablePath { position: last }),
        }
    }
    ///
    /// Probability of the most probable path, `max_π P(x, π)`
    ///
    pub fn best_prob(&self) -> Result<f64> {
        self.best_last().map(|(_, score)| score)
    }
    ///
    /// Recover the most probable path by following the pointers from the best
    /// last state back to position 0.
    ///
    pub fn traceback(&self) -> Result<Path> {
        let (last, _) = self.best_last()?;
        let n = self.n_emissions();
        let mut path = Vec::with_capacity(n);
        path.push(last);
        let mut q = last;
        for i in (1..n).rev() {
            q = self.pointers[[i, q]];
            path.push(q);
        }
        path.reverse();
        Ok(path)
    }
}
