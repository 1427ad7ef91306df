//!
//! Backward algorithm definitions
//!
use super::model::HmmModel;
use super::result::BackwardResult;
use crate::common::Symbol;
use crate::error::Result;
use ndarray::{Array1, Array2, ArrayView1};

///
/// Backward Algorithm
///
impl HmmModel {
    ///
    /// Run Backward algorithm to the emissions
    ///
    /// `Bk[i][q]` = P(emits `x[i+1..n] = x[i+1], ..., x[n-1]` | in state `q` at `i`)
    ///
    /// The table is filled from the end, and `table.row(i)` corresponds to
    /// `emissions[i]`.
    ///
    pub fn backward(&self, emissions: &[Symbol]) -> Result<BackwardResult> {
        self.check_emissions(emissions)?;
        let n = emissions.len();
        let mut table = Array2::zeros((n, self.n_states()));
        table.row_mut(n - 1).assign(&self.b_init());
        for i in (0..n - 1).rev() {
            let row = self.b_step(emissions[i + 1], table.row(i + 1));
            table.row_mut(i).assign(&row);
        }
        Ok(BackwardResult { table })
    }
    ///
    /// ```text
    /// Bk[n-1][q] = 1
    /// ```
    ///
    fn b_init(&self) -> Array1<f64> {
        Array1::ones(self.n_states())
    }
    ///
    /// Calculate `Bk[i]` from `Bk[i+1]`
    ///
    /// ```text
    /// Bk[i][q] = \sum_q' A[q][q'] B[q'][x[i+1]] Bk[i+1][q']
    /// ```
    ///
    fn b_step(&self, next_emission: Symbol, next: ArrayView1<f64>) -> Array1<f64> {
        (0..self.n_states())
            .map(|q| {
                (0..self.n_states())
                    .map(|r| next[r] * self.p_trans(q, r) * self.p_emit(r, next_emission))
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::hmm::mocks::mock_sticky;

    #[test]
    fn backward_two_steps_by_hand() {
        let m = mock_sticky();
        let r = m.backward(&[0, 1]).unwrap();
        assert_eq!(r.n_emissions(), 2);
        assert_eq!(r.table[[1, 0]], 1.0);
        assert_eq!(r.table[[1, 1]], 1.0);
        // Bk[0][A] = 0.9*0.2 + 0.1*0.8
        assert_abs_diff_eq!(r.table[[0, 0]], 0.26, epsilon = 1e-12);
        // Bk[0][B] = 0.1*0.2 + 0.9*0.8
        assert_abs_diff_eq!(r.table[[0, 1]], 0.74, epsilon = 1e-12);
    }
}
