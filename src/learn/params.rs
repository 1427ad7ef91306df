//!
//! LearnParams for iterative learners
//!
use crate::error::{invalid, Result};
use serde::{Deserialize, Serialize};

///
/// Parameters of Viterbi learning and Baum-Welch
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnParams {
    ///
    /// number of re-estimation rounds. 0 returns the input model as is.
    pub n_iterations: usize,
}

/// rounds of `LearnParams::default()`
pub const DEFAULT_N_ITERATIONS: usize = 100;

/// upper bound of rounds accepted from outside
pub const MAX_N_ITERATIONS: usize = 1_000_000;

impl LearnParams {
    pub fn new(n_iterations: usize) -> Result<LearnParams> {
        if n_iterations > MAX_N_ITERATIONS {
            return Err(invalid(format!(
                "number of iterations {} exceeds {}",
                n_iterations, MAX_N_ITERATIONS
            )));
        }
        Ok(LearnParams { n_iterations })
    }
}

impl std::default::Default for LearnParams {
    fn default() -> Self {
        LearnParams {
            n_iterations: DEFAULT_N_ITERATIONS,
        }
    }
}

impl std::fmt::Display for LearnParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "n_iterations: {}", self.n_iterations)
    }
}
