//!
//! Discrete hidden Markov model and its inference algorithms
//!
//! # Overview of calculation
//!
//! x = x[0],...,x[n-1] : Emissions of length n
//! Q : ordered set of hidden states, with uniform initial distribution 1/|Q|
//! A[p][q] : transition probability, B[q][c] : emission probability
//!
//! Viterbi
//! V[i][q]
//!  = max over paths of P(emits x[0..=i] along the path and ends at q)
//!
//! Forward
//! F[i][q]
//!  = P(emits x[0..=i] and ends at q)
//!
//! Backward
//! Bk[i][q]
//!  = P(emits x[i+1..n] | in state q at i)     (Bk[n-1][q] = 1)
//!
//! Posterior (soft decoding)
//! P(π_i = q | x)
//!  = F[i][q] Bk[i][q] / \sum_q' F[i][q'] Bk[i][q']
//!
//! All probabilities are plain `f64` products; long sequences can underflow
//! to zero, which is reported as `HmmError::NoViablePath` where a path or a
//! posterior is required.
//!
pub mod backward;
pub mod forward;
pub mod mocks;
pub mod model;
pub mod path;
pub mod posterior;
pub mod result;
pub mod table;
pub mod viterbi;

pub use model::HmmModel;
pub use posterior::HmmOutput;
pub use result::{BackwardResult, ForwardResult, ViterbiResult};
pub use table::{EmissionTable, RowStochastic, TransitionTable};
