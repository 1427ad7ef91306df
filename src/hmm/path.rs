//!
//! Probabilities of a given hidden path
//!
//! * `Pr(π) = (1/|Q|) \prod_i A[π_i][π_{i+1}]`
//! * `Pr(x|π) = \prod_i B[π_i][x_i]`
//! * `Pr(x, π) = Pr(π) Pr(x|π)`, the value Viterbi maximizes.
//!
use super::model::HmmModel;
use super::table::{EmissionTable, TransitionTable};
use crate::common::{State, Symbol};
use crate::error::{invalid, Result};
use itertools::Itertools;

impl TransitionTable {
    ///
    /// `Pr(π)` under the uniform initial distribution over `n_states`
    ///
    pub fn path_prob(&self, path: &[State]) -> f64 {
        let p_init = 1.0 / self.n_states() as f64;
        path.iter()
            .tuple_windows()
            .fold(p_init, |p, (&from, &to)| p * self.p(from, to))
    }
}

impl EmissionTable {
    ///
    /// `Pr(x|π)`
    ///
    pub fn outcome_prob(&self, emissions: &[Symbol], path: &[State]) -> f64 {
        path.iter()
            .zip(emissions.iter())
            .fold(1.0, |p, (&q, &x)| p * self.p(q, x))
    }
}

impl HmmModel {
    ///
    /// Probability of the hidden path `Pr(π)`
    ///
    pub fn path_prob(&self, path: &[State]) -> Result<f64> {
        self.check_path(path)?;
        Ok(self.transition.path_prob(path))
    }
    ///
    /// Probability of the emissions given the hidden path `Pr(x|π)`
    ///
    pub fn outcome_prob_given_path(&self, emissions: &[Symbol], path: &[State]) -> Result<f64> {
        self.check_aligned(emissions, path)?;
        Ok(self.emission.outcome_prob(emissions, path))
    }
    ///
    /// Joint probability `Pr(x, π)`
    ///
    pub fn joint_prob(&self, emissions: &[Symbol], path: &[State]) -> Result<f64> {
        self.check_aligned(emissions, path)?;
        Ok(self.transition.path_prob(path) * self.emission.outcome_prob(emissions, path))
    }
    fn check_aligned(&self, emissions: &[Symbol], path: &[State]) -> Result<()> {
        self.check_emissions(emissions)?;
        self.check_path(path)?;
        if emissions.len() != path.len() {
            return Err(invalid(format!(
                "emission sequence (length {}) and path (length {}) differ in length",
                emissions.len(),
                path.len()
            )));
        }
        Ok(())
    }
}
