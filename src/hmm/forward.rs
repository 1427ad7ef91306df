//!
//! Forward algorithm definitions
//!
use super::model::HmmModel;
use super::result::ForwardResult;
use crate::common::Symbol;
use crate::error::Result;
use ndarray::{Array1, Array2, ArrayView1};

impl HmmModel {
    ///
    /// Run Forward algorithm to the emissions
    ///
    /// `F[i][q]` = P(emits `x[0..=i] = x[0],...,x[i]` and now in state `q`)
    ///
    pub fn forward(&self, emissions: &[Symbol]) -> Result<ForwardResult> {
        self.check_emissions(emissions)?;
        let mut table = Array2::zeros((emissions.len(), self.n_states()));
        table.row_mut(0).assign(&self.f_init(emissions[0]));
        for i in 1..emissions.len() {
            let row = self.f_step(emissions[i], table.row(i - 1));
            table.row_mut(i).assign(&row);
        }
        Ok(ForwardResult { table })
    }
    ///
    /// Likelihood of the emissions `P(x) = \sum_π P(x, π)`
    ///
    pub fn likelihood(&self, emissions: &[Symbol]) -> Result<f64> {
        self.forward(emissions).map(|r| r.full_prob())
    }
    ///
    /// Create the first row of the forward table
    ///
    /// ```text
    /// F[0][q] = (1/|Q|) B[q][x[0]]
    /// ```
    ///
    fn f_init(&self, emission: Symbol) -> Array1<f64> {
        let p_init = self.init_prob();
        (0..self.n_states())
            .map(|q| p_init * self.p_emit(q, emission))
            .collect()
    }
    ///
    /// Calculate the row from the previous row
    ///
    /// ```text
    /// F[i][q] = \sum_p F[i-1][p] A[p][q] B[q][x[i]]
    /// ```
    ///
    fn f_step(&self, emission: Symbol, prev: ArrayView1<f64>) -> Array1<f64> {
        (0..self.n_states())
            .map(|q| {
                (0..self.n_states())
                    .map(|p| prev[p] * self.p_trans(p, q) * self.p_emit(q, emission))
                    .sum()
            })
            .collect()
    }
}
