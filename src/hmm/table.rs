//!
//! Table definitions
//!
//! ## TransitionTable
//!
//! `A[p][q]` = P(next state is q | current state is p), a `|Q| x |Q|` matrix
//!
//! ## EmissionTable
//!
//! `B[q][c]` = P(emits symbol c | in state q), a `|Q| x |Σ|` matrix
//!
//! Each row with nonzero mass is a probability distribution. A row of zeros
//! is allowed and means "no outgoing transitions" (absorbing or terminal
//! state) or "emits nothing" (silent state).
//!
use crate::common::{State, Symbol};
use crate::error::{invalid, Result};
use ndarray::{Array2, ArrayView1};
use serde::Serialize;

/// Tolerance of row sums when a table is given from outside (e.g. loaded from
/// a text table with 3-digit rounded values).
pub const LOAD_TOLERANCE: f64 = 1e-2;

/// Tolerance of row sums of tables produced by normalization.
pub const NORMALIZED_TOLERANCE: f64 = 1e-9;

///
/// Matrix whose rows are probability distributions (or all zero).
///
/// Shared accessors of `TransitionTable` and `EmissionTable`.
///
pub trait RowStochastic {
    /// underlying `rows x columns` matrix
    fn probs(&self) -> &Array2<f64>;
    /// the number of rows (states)
    fn n_rows(&self) -> usize {
        self.probs().nrows()
    }
    /// the number of columns
    fn n_cols(&self) -> usize {
        self.probs().ncols()
    }
    /// view of the `row`-th distribution
    fn row(&self, row: usize) -> ArrayView1<f64> {
        self.probs().row(row)
    }
    /// sum of the `row`-th distribution (1 or 0 in a valid table)
    fn row_sum(&self, row: usize) -> f64 {
        self.probs().row(row).sum()
    }
    /// true if the row has no mass
    fn is_empty_row(&self, row: usize) -> bool {
        self.row_sum(row) == 0.0
    }
    ///
    /// The first row whose sum is neither 0 nor 1 (within `epsilon`), if any.
    ///
    fn first_unnormalized_row(&self, epsilon: f64) -> Option<usize> {
        (0..self.n_rows()).find(|&r| {
            let s = self.row_sum(r);
            s != 0.0 && (s - 1.0).abs() > epsilon
        })
    }
    /// every row is either a distribution or all zero
    fn is_stochastic(&self, epsilon: f64) -> bool {
        self.first_unnormalized_row(epsilon).is_none()
    }
}

///
/// Check the cells are finite probabilities and the rows are distributions.
///
fn validate(probs: &Array2<f64>, name: &str, epsilon: f64) -> Result<()> {
    if let Some(((r, c), v)) = probs
        .indexed_iter()
        .find(|(_, v)| !v.is_finite() || !(0.0..=1.0).contains(*v))
    {
        return Err(invalid(format!(
            "{} table has a value {} out of [0,1] at ({}, {})",
            name, v, r, c
        )));
    }
    for (r, row) in probs.outer_iter().enumerate() {
        let s = row.sum();
        if s != 0.0 && (s - 1.0).abs() > epsilon {
            return Err(invalid(format!(
                "{} table row {} sums to {}, expected 1",
                name, r, s
            )));
        }
    }
    Ok(())
}

///
/// Transition probability table `A[p][q]`
///
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransitionTable {
    probs: Array2<f64>,
}

impl TransitionTable {
    ///
    /// Constructor with validation.
    /// The matrix should be square and rows should sum to 1 (or 0) within
    /// `LOAD_TOLERANCE`.
    ///
    pub fn new(probs: Array2<f64>) -> Result<TransitionTable> {
        if probs.nrows() != probs.ncols() {
            return Err(invalid(format!(
                "transition table should be square, but is {}x{}",
                probs.nrows(),
                probs.ncols()
            )));
        }
        validate(&probs, "transition", LOAD_TOLERANCE)?;
        Ok(TransitionTable { probs })
    }
    ///
    /// Constructor without validation, for tables built by normalization.
    ///
    pub(crate) fn from_normalized(probs: Array2<f64>) -> TransitionTable {
        debug_assert_eq!(probs.nrows(), probs.ncols());
        TransitionTable { probs }
    }
    /// uniform transitions `A[p][q] = 1/|Q|`
    pub fn uniform(n_states: usize) -> TransitionTable {
        let p = 1.0 / n_states as f64;
        TransitionTable {
            probs: Array2::from_elem((n_states, n_states), p),
        }
    }
    /// the number of states
    pub fn n_states(&self) -> usize {
        self.probs.nrows()
    }
    /// `A[from][to]`
    #[inline]
    pub fn p(&self, from: State, to: State) -> f64 {
        self.probs[[from, to]]
    }
}

impl RowStochastic for TransitionTable {
    fn probs(&self) -> &Array2<f64> {
        &self.probs
    }
}

///
/// Emission probability table `B[q][c]`
///
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmissionTable {
    probs: Array2<f64>,
}

impl EmissionTable {
    ///
    /// Constructor with validation (rows sum to 1 or 0 within `LOAD_TOLERANCE`).
    ///
    pub fn new(probs: Array2<f64>) -> Result<EmissionTable> {
        validate(&probs, "emission", LOAD_TOLERANCE)?;
        Ok(EmissionTable { probs })
    }
    pub(crate) fn from_normalized(probs: Array2<f64>) -> EmissionTable {
        EmissionTable { probs }
    }
    /// uniform emissions `B[q][c] = 1/|Σ|`
    pub fn uniform(n_states: usize, n_symbols: usize) -> EmissionTable {
        let p = 1.0 / n_symbols as f64;
        EmissionTable {
            probs: Array2::from_elem((n_states, n_symbols), p),
        }
    }
    /// the number of states
    pub fn n_states(&self) -> usize {
        self.probs.nrows()
    }
    /// the number of symbols
    pub fn n_symbols(&self) -> usize {
        self.probs.ncols()
    }
    /// `B[state][symbol]`
    #[inline]
    pub fn p(&self, state: State, symbol: Symbol) -> f64 {
        self.probs[[state, symbol]]
    }
}

impl RowStochastic for EmissionTable {
    fn probs(&self) -> &Array2<f64> {
        &self.probs
    }
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn transition_table_validation() {
        let t = TransitionTable::new(array![[0.9, 0.1], [0.0, 0.0]]).unwrap();
        assert_eq!(t.n_states(), 2);
        assert_eq!(t.p(0, 1), 0.1);
        assert!(t.is_empty_row(1));
        assert!(t.is_stochastic(NORMALIZED_TOLERANCE));

        // not square
        assert!(TransitionTable::new(array![[0.5, 0.5]]).is_err());
        // row sum is not 1
        assert!(TransitionTable::new(array![[0.5, 0.3], [0.5, 0.5]]).is_err());
        // negative
        assert!(TransitionTable::new(array![[1.5, -0.5], [0.5, 0.5]]).is_err());
        // rounded values are accepted
        assert!(TransitionTable::new(array![[0.333, 0.667], [0.5, 0.5]]).is_ok());
    }

    #[test]
    fn emission_table_validation() {
        let e = EmissionTable::new(array![[0.2, 0.3, 0.5], [0.0, 0.0, 0.0]]).unwrap();
        assert_eq!(e.n_states(), 2);
        assert_eq!(e.n_symbols(), 3);
        assert_eq!(e.p(0, 2), 0.5);
        assert!(EmissionTable::new(array![[0.2, 0.3, 0.6]]).is_err());
        assert!(EmissionTable::new(array![[f64::NAN, 1.0]]).is_err());
    }

    #[test]
    fn uniform_tables() {
        let t = TransitionTable::uniform(4);
        let e = EmissionTable::uniform(4, 3);
        for r in 0..4 {
            assert_abs_diff_eq!(t.row_sum(r), 1.0, epsilon = NORMALIZED_TOLERANCE);
            assert_abs_diff_eq!(e.row_sum(r), 1.0, epsilon = NORMALIZED_TOLERANCE);
        }
        assert_eq!(t.first_unnormalized_row(NORMALIZED_TOLERANCE), None);
    }
}
