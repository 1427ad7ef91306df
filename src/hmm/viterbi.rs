//!
//! Viterbi algorithm definitions
//!
use super::model::HmmModel;
use super::result::ViterbiResult;
use crate::common::{first_argmax, Path, State, Symbol};
use crate::error::{HmmError, Result};
use ndarray::{Array1, Array2, ArrayView1};

impl HmmModel {
    ///
    /// Run Viterbi algorithm to the emissions
    ///
    /// `V[i][q]` = max over state paths ending at `q` of
    /// P(emits `x[0..=i]` along the path)
    ///
    /// Ties between predecessors are broken in favor of the state declared
    /// first. If every state has probability zero at some position the
    /// emissions cannot be explained and `NoViablePath` is returned.
    ///
    pub fn viterbi(&self, emissions: &[Symbol]) -> Result<ViterbiResult> {
        self.check_emissions(emissions)?;
        let n = emissions.len();
        let mut scores = Array2::zeros((n, self.n_states()));
        let mut pointers = Array2::zeros((n, self.n_states()));
        scores.row_mut(0).assign(&self.v_init(emissions[0]));
        check_viable(scores.row(0), 0)?;
        for i in 1..n {
            let (row, from) = self.v_step(emissions[i], scores.row(i - 1));
            check_viable(row.view(), i)?;
            scores.row_mut(i).assign(&row);
            pointers.row_mut(i).assign(&from);
        }
        Ok(ViterbiResult { scores, pointers })
    }
    ///
    /// The most probable hidden path of the emissions
    ///
    pub fn viterbi_path(&self, emissions: &[Symbol]) -> Result<Path> {
        self.viterbi(emissions)?.traceback()
    }
    ///
    /// ```text
    /// V[0][q] = (1/|Q|) B[q][x[0]]
    /// ```
    ///
    fn v_init(&self, emission: Symbol) -> Array1<f64> {
        let p_init = self.init_prob();
        (0..self.n_states())
            .map(|q| p_init * self.p_emit(q, emission))
            .collect()
    }
    ///
    /// ```text
    /// V[i][q] = max_p V[i-1][p] A[p][q] B[q][x[i]]
    /// ```
    ///
    /// returns the row and the argmax predecessor of each state
    ///
    fn v_step(&self, emission: Symbol, prev: ArrayView1<f64>) -> (Array1<f64>, Array1<State>) {
        let n_states = self.n_states();
        let mut row = Array1::zeros(n_states);
        let mut from = Array1::zeros(n_states);
        for q in 0..n_states {
            let candidates =
                (0..n_states).map(|p| prev[p] * self.p_trans(p, q) * self.p_emit(q, emission));
            // n_states is never zero, so there is always a maximum
            if let Some((p, score)) = first_argmax(candidates) {
                row[q] = score;
                from[q] = p;
            }
        }
        (row, from)
    }
}

fn check_viable(row: ArrayView1<f64>, position: usize) -> Result<()> {
    if row.iter().all(|&v| v == 0.0) {
        Err(HmmError::NoViablePath { position })
    } else {
        Ok(())
    }
}
