//!
//! Calculate state/transition usage frequencies (posteriors)
//! from the result of Forward/Backward.
//!
//! - **Posterior** (for each position and each state)
//!     The probability that the hidden state at the position is the state,
//!     given the whole emissions.
//!
//! - **Edge freq** (for each pair of states)
//!     The expected value of the usage frequency of each transition, while
//!     emitting the emissions.
//!
//! - **Emission freq** (for each state and symbol)
//!     The expected value of the number of times the state emits the symbol.
//!
use super::model::HmmModel;
use super::result::{BackwardResult, ForwardResult};
use crate::common::{Freq, Symbol};
use crate::error::{HmmError, Result};
use ndarray::Array2;
use serde::Serialize;

/// Struct for storing the results of forward and backward.
///
#[derive(Debug, Clone, Serialize)]
pub struct HmmOutput {
    /// Result of forward run
    pub forward: ForwardResult,
    /// Result of backward run
    pub backward: BackwardResult,
}

///
/// methods to generate HmmOutput from HmmModel
///
impl HmmModel {
    ///
    /// Run forward and backward for the emissions and returns HmmOutput.
    ///
    pub fn run(&self, emissions: &[Symbol]) -> Result<HmmOutput> {
        let forward = self.forward(emissions)?;
        let backward = self.backward(emissions)?;
        Ok(HmmOutput { forward, backward })
    }
    ///
    /// Soft decoding: `P(π_i = q | x)` as a `n x |Q|` matrix.
    ///
    pub fn soft_decode(&self, emissions: &[Symbol]) -> Result<Array2<f64>> {
        self.run(emissions)?.to_posteriors()
    }
}

//
// For full probability
//

impl HmmOutput {
    /// The number of emissions
    pub fn n_emissions(&self) -> usize {
        self.forward.n_emissions()
    }
    ///
    /// ```text
    /// \sum_q F[i][q] Bk[i][q]
    /// ```
    ///
    /// which is `P(x)` for every position `i` (up to rounding).
    ///
    pub fn normalizer(&self, i: usize) -> f64 {
        (&self.forward.row(i) * &self.backward.row(i)).sum()
    }
    /// Calculate the full probability `P(x)` from **forward** result.
    ///
    /// ```text
    /// P(x) = \sum_q F[n-1][q]
    /// ```
    pub fn full_prob_forward(&self) -> f64 {
        self.forward.full_prob()
    }
    /// Calculate the full probability `P(x)` from **backward** result.
    ///
    /// ```text
    /// P(x) = \sum_q (1/|Q|) B[q][x[0]] Bk[0][q] = \sum_q F[0][q] Bk[0][q]
    /// ```
    pub fn full_prob_backward(&self) -> f64 {
        self.normalizer(0)
    }
    fn checked_normalizer(&self, i: usize) -> Result<f64> {
        let p = self.normalizer(i);
        if p > 0.0 {
            Ok(p)
        } else {
            Err(HmmError::NoViablePath { position: i })
        }
    }
}

//
// For hidden states
//

impl HmmOutput {
    ///
    /// `P(π_i = q | x)` for each position `i` and state `q`.
    ///
    /// ```text
    /// P(π_i = q | x) = F[i][q] Bk[i][q] / \sum_q' F[i][q'] Bk[i][q']
    /// ```
    ///
    /// Every row sums to 1. If the emissions are impossible (or underflowed)
    /// at some position, `NoViablePath` is returned.
    ///
    pub fn to_posteriors(&self) -> Result<Array2<f64>> {
        let mut posteriors = &self.forward.table * &self.backward.table;
        for (i, mut row) in posteriors.outer_iter_mut().enumerate() {
            let p = self.checked_normalizer(i)?;
            row /= p;
        }
        Ok(posteriors)
    }
    ///
    /// Expected number of times each state emits each symbol
    ///
    /// `freq[q][c] = \sum_{i: x[i] = c} P(π_i = q | x)`
    ///
    pub fn to_emission_freqs(
        &self,
        emissions: &[Symbol],
        n_symbols: usize,
    ) -> Result<Array2<Freq>> {
        let posteriors = self.to_posteriors()?;
        let mut freqs = Array2::zeros((posteriors.ncols(), n_symbols));
        for (row, &x) in posteriors.outer_iter().zip(emissions.iter()) {
            let mut column = freqs.column_mut(x);
            column += &row;
        }
        Ok(freqs)
    }
}

//
// For transitions
//

impl HmmOutput {
    ///
    /// Calculate the expected value of the usage frequency of each transition
    ///
    /// `freq[q][q']`
    /// = \sum_i P(π_i = q, π_{i+1} = q' | x)
    ///
    /// ```text
    /// P(π_i = q, π_{i+1} = q' | x)
    ///   = F[i][q] A[q][q'] B[q'][x[i+1]] Bk[i+1][q'] / \sum_s F[i][s] Bk[i][s]
    /// ```
    ///
    /// summed over `i = 0..n-1` (the n-1 transitions of the emissions).
    ///
    pub fn to_edge_freqs(&self, model: &HmmModel, emissions: &[Symbol]) -> Result<Array2<Freq>> {
        let n_states = model.n_states();
        let mut freqs = Array2::zeros((n_states, n_states));
        for i in 0..self.n_emissions().saturating_sub(1) {
            let p = self.checked_normalizer(i)?;
            let f = self.forward.row(i);
            let b = self.backward.row(i + 1);
            let x = emissions[i + 1];
            for q in 0..n_states {
                for r in 0..n_states {
                    freqs[[q, r]] += f[q] * model.p_trans(q, r) * model.p_emit(r, x) * b[r] / p;
                }
            }
        }
        Ok(freqs)
    }
}
